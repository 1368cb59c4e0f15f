use clap::{Args, Subcommand};

use crate::bootstrap::{init, StartupOptions};
use crate::cli::{display_count, OutputFormat};
use crate::core::descriptor::DatabaseDescriptor;
use crate::core::types::DatabaseKind;

#[derive(Args)]
pub struct DatabasesArgs {
    #[command(subcommand)]
    pub command: DatabasesCommands,
}

#[derive(Subcommand)]
pub enum DatabasesCommands {
    /// List all databases in the catalog
    List {
        /// Only list databases of this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Show details of a specific database
    Show {
        /// Database identifier (path relative to the database directory)
        #[arg(required = true)]
        id: String,
    },
}

/// Database kind argument for CLI
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    Nucleotide,
    Protein,
}

impl From<KindArg> for DatabaseKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Nucleotide => Self::Nucleotide,
            KindArg::Protein => Self::Protein,
        }
    }
}

/// Run a databases subcommand
///
/// # Errors
///
/// Returns an error if startup fails or the requested database does not exist.
pub fn run(
    args: DatabasesArgs,
    options: StartupOptions,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    match args.command {
        DatabasesCommands::List { kind } => run_list(options, kind.map(Into::into), format, verbose),
        DatabasesCommands::Show { id } => run_show(options, &id, format),
    }
}

fn run_list(
    options: StartupOptions,
    kind: Option<DatabaseKind>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let started = init(options)?;
    let catalog = started.registry.all();

    let filtered: Vec<&DatabaseDescriptor> = catalog
        .iter()
        .filter(|db| kind.map_or(true, |k| db.kind == k))
        .collect();

    match format {
        OutputFormat::Text => {
            let id_width = filtered
                .iter()
                .map(|db| db.identifier.0.len())
                .max()
                .unwrap_or(2)
                .max(2);
            let title_width = filtered
                .iter()
                .map(|db| db.title.len().min(40))
                .max()
                .unwrap_or(5)
                .max(5);

            let total_width = id_width + title_width + 10 + 12 + 15 + 4;

            println!("Database Catalog ({} databases)\n", filtered.len());
            println!(
                "{:<id_w$} {:<title_w$} {:<10} {:>12} {:>15}",
                "ID",
                "Title",
                "Kind",
                "Sequences",
                "Residues",
                id_w = id_width,
                title_w = title_width
            );
            println!("{}", "-".repeat(total_width));

            for db in &filtered {
                println!(
                    "{:<id_w$} {:<title_w$} {:<10} {:>12} {:>15}",
                    db.identifier.0,
                    truncate(&db.title, title_width),
                    db.kind.to_string(),
                    display_count(db.sequence_count),
                    display_count(db.total_length),
                    id_w = id_width,
                    title_w = title_width
                );
                if verbose {
                    println!("  └─ {}", db.path.display());
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        OutputFormat::Tsv => {
            println!("id\ttitle\tkind\tsequence_count\ttotal_length\tpath");
            for db in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    db.identifier,
                    db.title,
                    db.kind,
                    db.sequence_count.map(|c| c.to_string()).unwrap_or_default(),
                    db.total_length.map(|c| c.to_string()).unwrap_or_default(),
                    db.path.display()
                );
            }
        }
    }

    Ok(())
}

fn run_show(options: StartupOptions, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    let started = init(options)?;
    let db = started.registry.find(id)?;

    match format {
        OutputFormat::Text => {
            println!("Database: {}\n", db.title);
            println!("ID:        {}", db.identifier);
            println!("Kind:      {}", db.kind);
            println!("Path:      {}", db.path.display());
            println!("Sequences: {}", display_count(db.sequence_count));
            println!("Residues:  {}", display_count(db.total_length));
            if let Some(created) = &db.created {
                println!("Created:   {created}");
            }
            println!("Scanned:   {}", db.discovered_at.to_rfc3339());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&db)?);
        }
        OutputFormat::Tsv => {
            println!("field\tvalue");
            println!("id\t{}", db.identifier);
            println!("title\t{}", db.title);
            println!("kind\t{}", db.kind);
            println!("path\t{}", db.path.display());
            println!("sequence_count\t{}", display_count(db.sequence_count));
            println!("total_length\t{}", display_count(db.total_length));
        }
    }

    Ok(())
}

/// Truncate a title to fit a column, marking the cut with an ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
    }

    #[test]
    fn test_kind_arg_conversion() {
        assert_eq!(DatabaseKind::from(KindArg::Protein), DatabaseKind::Protein);
        assert_eq!(
            DatabaseKind::from(KindArg::Nucleotide),
            DatabaseKind::Nucleotide
        );
    }
}
