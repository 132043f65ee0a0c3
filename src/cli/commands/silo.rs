//! `meshforge-cli silo start` - boot a single in-memory silo and join the cluster.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::cli::Result;
use crate::cluster::InMemoryClusterStore;
use crate::reminder::InMemoryReminderTable;
use crate::state::InMemoryStateStore;
use crate::system::{Silo, SiloConfig};
use crate::transport::InProcessTransport;
use crate::util::SiloId;

#[derive(Args)]
pub struct StartArgs {
    /// Identifier this silo joins the cluster under.
    #[arg(short, long, default_value = "silo-1")]
    id: String,

    /// Path to a silo.toml configuration file. Defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

pub async fn execute(args: StartArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => SiloConfig::from_toml_file(path)?,
        None => SiloConfig::default(),
    };

    let silo: Silo<InMemoryClusterStore, InMemoryReminderTable, InMemoryStateStore, InProcessTransport> =
        Silo::new(
            config,
            SiloId::new(&args.id),
            Arc::new(InMemoryClusterStore::new()),
            Arc::new(InMemoryReminderTable::new()),
            Arc::new(InMemoryStateStore::new()),
            Arc::new(InProcessTransport::new()),
        );

    silo.join_cluster().await?;
    silo.start_reminder_scanner();
    info!(silo_id = %silo.id(), "silo joined cluster, awaiting shutdown signal");

    tokio::signal::ctrl_c().await.map_err(crate::cli::CliError::Io)?;

    info!(silo_id = %silo.id(), "shutting down");
    silo.shutdown().await?;
    Ok(())
}
