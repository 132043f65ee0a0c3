//! `meshforge-cli dlq` - inspect and replay dead letters.
//!
//! Same limitation as [`super::cluster`]: the dead-letter queue lives inside a running silo's
//! process memory, so these subcommands only describe what they would do against a reachable
//! silo rather than operating on one.

use clap::{Args, Subcommand};

use crate::cli::Result;

#[derive(Subcommand)]
pub enum DlqCommand {
    /// List dead letters currently queued for retry.
    List(ListArgs),
    /// Replay dead letters whose backoff has elapsed.
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show dead letters for this actor type.
    #[arg(short, long)]
    actor_type: Option<String>,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Replay at most this many dead letters.
    #[arg(short, long, default_value_t = 100)]
    limit: usize,
}

pub async fn execute(command: DlqCommand) -> Result<()> {
    match command {
        DlqCommand::List(args) => {
            let scope = args.actor_type.as_deref().unwrap_or("all actor types");
            println!("no running silo reachable from this process (scope: {scope})");
        }
        DlqCommand::Replay(args) => {
            println!("no running silo reachable from this process (limit: {})", args.limit);
        }
    }
    Ok(())
}
