//! `meshforge-cli cluster list-silos` - inspect cluster membership.

use clap::Args;

use crate::cli::Result;

#[derive(Args)]
pub struct ListSilosArgs {}

pub async fn execute(_args: ListSilosArgs) -> Result<()> {
    // This binary's `silo start` uses an in-process `InMemoryClusterStore`, which only a silo
    // running in the same process can observe. Listing members of an already-running, separate
    // silo process requires a networked `ClusterStore`/`Transport`, which this crate does not
    // ship.
    println!("no shared cluster backend reachable from this process");
    Ok(())
}
