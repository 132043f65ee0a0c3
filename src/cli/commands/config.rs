//! `meshforge-cli config` - load and validate a silo configuration file.

use std::path::PathBuf;

use clap::Args;

use crate::cli::Result;
use crate::system::SiloConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Path to a silo.toml configuration file. Defaults are used if omitted.
    #[arg(short, long)]
    path: Option<PathBuf>,
}

pub async fn execute(args: ConfigArgs) -> Result<()> {
    let config = match &args.path {
        Some(path) => SiloConfig::from_toml_file(path)?,
        None => SiloConfig::default(),
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
