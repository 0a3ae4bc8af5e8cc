use crate::utility;
use anyhow::Result;
use clap::Parser;
use console::style;
use vellum::Db;

#[derive(Parser, Debug)]
pub struct ApplyCommand {}

impl ApplyCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<()> {
        utility::heading("Apply Migration");

        let migrator = db.migrator();
        let plan = migrator.plan().await?;
        utility::print_drift(&plan);

        if plan.is_empty() {
            println!(
                "  {}",
                style("Database is up to date.").green().dim()
            );
            println!();
            return Ok(());
        }

        for line in plan.to_string().lines() {
            println!("  {} {}", style("→").cyan(), line);
        }

        migrator.execute(&plan).await?;

        println!();
        println!(
            "  {}",
            style(format!("Applied {} step(s)", plan.steps.len()))
                .green()
                .bold()
        );
        println!();

        Ok(())
    }
}
