use clap::Args;

use crate::bootstrap::{Bootstrap, StartupOptions};
use crate::cli::{display_count, OutputFormat};
use crate::core::descriptor::DatabaseDescriptor;

#[derive(Args)]
pub struct ScanArgs {
    /// Only report rejected candidates
    #[arg(long)]
    pub rejected: bool,
}

/// Scan the configured database directory and report every outcome.
///
/// Unlike the other commands this does not require a usable database; it is
/// meant for finding out why one is missing.
///
/// # Errors
///
/// Returns an error if the configuration cannot be resolved or the database
/// directory cannot be read.
pub fn run(args: ScanArgs, options: StartupOptions, format: OutputFormat) -> anyhow::Result<()> {
    let mut bootstrap = Bootstrap::new(options);
    let config = bootstrap.resolve_config()?;
    let report = bootstrap.scan(&config)?;

    let accepted: &[DatabaseDescriptor] = if args.rejected {
        &[]
    } else {
        &report.accepted[..]
    };

    match format {
        OutputFormat::Text => {
            println!(
                "Scanned {}: {} accepted, {} rejected\n",
                report.root.display(),
                report.accepted.len(),
                report.rejected.len()
            );
            for db in accepted {
                println!(
                    "  ok        {} [{}] {} sequences",
                    db.identifier,
                    db.kind,
                    display_count(db.sequence_count)
                );
            }
            for rejection in &report.rejected {
                println!("  rejected  {rejection}");
            }
        }
        OutputFormat::Json => {
            let rejected: Vec<_> = report
                .rejected
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "path": r.path,
                        "reason": r.reason.to_string(),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "root": report.root,
                "scanned_at": report.scanned_at.to_rfc3339(),
                "accepted": accepted,
                "rejected": rejected,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("status\tid_or_path\tkind_or_reason");
            for db in accepted {
                println!("accepted\t{}\t{}", db.identifier, db.kind);
            }
            for r in &report.rejected {
                println!("rejected\t{}\t{}", r.path.display(), r.reason);
            }
        }
    }

    Ok(())
}
