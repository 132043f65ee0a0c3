//! `meshforge-cli migrate status` - inspect in-flight actor migrations.

use clap::Args;

use crate::cli::Result;

#[derive(Args)]
pub struct StatusArgs {
    /// Show only migrations targeting this silo.
    #[arg(short, long)]
    target_silo: Option<String>,
}

pub async fn execute(args: StatusArgs) -> Result<()> {
    let scope = args.target_silo.as_deref().unwrap_or("all silos");
    println!("no running silo reachable from this process (scope: {scope})");
    Ok(())
}
