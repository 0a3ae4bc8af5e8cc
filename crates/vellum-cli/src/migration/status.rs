use crate::utility;
use anyhow::Result;
use clap::Parser;
use console::style;
use vellum::Db;

#[derive(Parser, Debug)]
pub struct StatusCommand {}

impl StatusCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<()> {
        utility::heading("Migration Status");

        let plan = db.migrator().plan().await?;

        if plan.is_empty() {
            println!("  {}", style("No pending changes.").green().dim());
        } else {
            println!(
                "  {} {} pending step(s)",
                style("→").cyan(),
                plan.steps.len()
            );
            for line in plan.to_string().lines() {
                println!("    {}", style(line).dim());
            }
        }

        utility::print_drift(&plan);
        println!();

        Ok(())
    }
}
