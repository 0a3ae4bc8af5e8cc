mod migration;
pub use migration::*;

mod utility;

use anyhow::{Context, Result};
use clap::Parser;
use vellum::{Config, Db};

use std::path::PathBuf;

/// Vellum CLI library for building custom command-line tools
pub struct VellumCli {
    db: Db,
}

impl VellumCli {
    /// Create a new VellumCli instance over an open database
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Opens the database described by a configuration file and URL.
    pub fn open(config: &Config, url: &str) -> Result<Self> {
        let redacted = utility::redact_url_password(url);
        tracing::debug!(url = %redacted, models = config.models.len(), "opening database");

        let mut builder = Db::builder();
        config.apply(&mut builder)?;

        let db = builder
            .connect(url)
            .with_context(|| format!("failed to open {redacted}"))?;

        Ok(Self::new(db))
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run() -> Result<()> {
        Cli::parse().run().await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::parse_from(args).run().await
    }
}

#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(about = "Vellum CLI - schema migration tool")]
#[command(version)]
pub struct Cli {
    /// Configuration file describing the adapter and models
    #[arg(short, long, global = true, default_value = "vellum.toml")]
    config: PathBuf,

    /// Database URL, e.g. `sqlite:app.db`
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Database migration commands
    Migration(migration::MigrationCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;

        let url = self
            .url
            .context("no database URL; pass --url")?;

        let cli = VellumCli::open(&config, &url)?;

        match self.command {
            Command::Migration(cmd) => cmd.run(cli.db()).await,
        }
    }
}
