use crate::bootstrap::{init, StartupOptions};
use crate::cli::OutputFormat;
use crate::core::types::DatabaseKind;

/// Run startup and print a summary of the catalog
///
/// # Errors
///
/// Returns the `BootstrapError` if startup fails.
pub fn run(options: StartupOptions, format: OutputFormat) -> anyhow::Result<()> {
    let started = init(options)?;
    let catalog = started.registry.all();
    let nucleotide = catalog.of_kind(DatabaseKind::Nucleotide).count();
    let protein = catalog.of_kind(DatabaseKind::Protein).count();

    match format {
        OutputFormat::Text => {
            println!(
                "{} database(s) ready in {} ({nucleotide} nucleotide, {protein} protein, {} rejected)",
                catalog.len(),
                started.report.root.display(),
                started.report.rejected.len()
            );
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "ready": true,
                "database_dir": started.report.root,
                "databases": catalog.len(),
                "nucleotide": nucleotide,
                "protein": protein,
                "rejected": started.report.rejected.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("database_dir\tdatabases\tnucleotide\tprotein\trejected");
            println!(
                "{}\t{}\t{nucleotide}\t{protein}\t{}",
                started.report.root.display(),
                catalog.len(),
                started.report.rejected.len()
            );
        }
    }

    Ok(())
}
