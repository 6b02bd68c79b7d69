pub mod wal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{env, Config};
use crate::Result;

/// Waltool command
#[derive(Parser, Debug)]
#[command(version, propagate_version = true, subcommand_required = true)]
pub struct WaltoolCommand {
    /// Configuration file path
    #[arg(long, short = 'C', env = env::CONFIG_PATH, global = true)]
    pub config: Option<PathBuf>,
    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// WAL introspection tools
    Wal(wal::WalCommand),
}

/// Parse command line args
pub fn parse() -> WaltoolCommand {
    WaltoolCommand::parse()
}

impl WaltoolCommand {
    /// Load the configuration file given by `-C`, or the defaults.
    pub async fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_config_file(path).await,
            None => Ok(Config::default()),
        }
    }

    /// Whether verbose output was requested on the command line or in the
    /// configuration file.
    pub fn verbose(&self, config: &Config) -> bool {
        let flag = match &self.command {
            Command::Wal(wal) => wal.verbose,
        };
        flag || config.dump.verbose.unwrap_or(false)
    }

    pub async fn run(self, config: Config) -> Result<()> {
        let WaltoolCommand { command, .. } = self;

        match command {
            Command::Wal(wal) => wal.run(&config).await,
        }
    }
}
