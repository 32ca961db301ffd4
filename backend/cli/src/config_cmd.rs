//! CLI Config Subcommands

use std::path::Path;

use anyhow::{bail, Result};
use clap::Subcommand;

use ontodash_config::{apply_all_defaults, write_config, OntodashConfig};

use crate::terminal_output::{note_info, note_success};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (file, env and defaults merged)
    Show,
    /// Write a config file populated with defaults
    Init {
        /// Overwrite an existing file (a `.bak` copy is kept)
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(cmd: ConfigCommands, effective: &OntodashConfig, path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            note_info(&format!("Config file: {}", path.display()));
            println!("API base URL: {}\n", effective.api_base_url());
            print!("{}", serde_yaml::to_string(effective)?);
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
            write_config(&apply_all_defaults(OntodashConfig::default()), path).await?;
            note_success(&format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}
