use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;
use vellum_cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.run().await {
        eprintln!("{} {err:#}", style("error:").red().bold());
        std::process::exit(1);
    }
}
