mod apply;
pub use apply::*;

mod generate;
pub use generate::*;

mod status;
pub use status::*;

use anyhow::Result;
use clap::Parser;
use vellum::Db;

#[derive(Parser, Debug)]
pub struct MigrationCommand {
    #[command(subcommand)]
    subcommand: MigrationSubcommand,
}

#[derive(Parser, Debug)]
enum MigrationSubcommand {
    /// Print the DDL that would bring the database up to date
    Generate(GenerateCommand),

    /// Bring the database up to date
    Apply(ApplyCommand),

    /// Show pending schema changes and type drift
    Status(StatusCommand),
}

impl MigrationCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<()> {
        match self.subcommand {
            MigrationSubcommand::Generate(cmd) => cmd.run(db).await,
            MigrationSubcommand::Apply(cmd) => cmd.run(db).await,
            MigrationSubcommand::Status(cmd) => cmd.run(db).await,
        }
    }
}
