use crate::utility;
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use vellum::Db;

use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl GenerateCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<()> {
        let migrator = db.migrator();
        let plan = migrator.plan().await?;

        if plan.is_empty() {
            eprintln!(
                "  {}",
                style("The database matches the schema. No migration needed.")
                    .magenta()
                    .dim()
            );
            return Ok(());
        }

        let script = migrator.compile(&plan)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &script)
                    .with_context(|| format!("failed to write {}", path.display()))?;

                utility::heading("Generate Migration");
                utility::print_drift(&plan);
                println!(
                    "  {} {}",
                    style("✓").green().bold(),
                    style(format!(
                        "Wrote {} step(s) to {}",
                        plan.steps.len(),
                        path.display()
                    ))
                    .dim()
                );
                println!();
            }
            // The script alone goes to stdout so it can be piped
            None => print!("{script}"),
        }

        Ok(())
    }
}
