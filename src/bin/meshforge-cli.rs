use clap::{Parser, Subcommand};

use meshforge::cli::commands::{cluster, config, dlq, migrate, silo};
use meshforge::cli::Result;

/// meshforge - operate and inspect a local meshforge silo
#[derive(Parser)]
#[command(name = "meshforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a single in-memory silo and join the cluster
    Start(silo::StartArgs),

    /// List cluster members
    ListSilos(cluster::ListSilosArgs),

    /// Inspect or replay dead letters
    #[command(subcommand)]
    Dlq(dlq::DlqCommand),

    /// Inspect in-flight actor migrations
    Migrate(migrate::StatusArgs),

    /// Load and validate a silo configuration file
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Start(args) => silo::execute(args).await,
        Commands::ListSilos(args) => cluster::execute(args).await,
        Commands::Dlq(command) => dlq::execute(command).await,
        Commands::Migrate(args) => migrate::execute(args).await,
        Commands::Config(args) => config::execute(args).await,
    }
}
