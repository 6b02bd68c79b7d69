mod dump;
pub use dump::DumpCommand;

use clap::{ArgAction, Args, Subcommand};

use crate::config::Config;
use crate::Result;

#[derive(Args, Debug)]
pub struct WalCommand {
    /// Verbose output
    #[arg(long, short = 'v', action = ArgAction::SetTrue, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print WAL contents
    Dump(DumpCommand),
}

impl WalCommand {
    pub async fn run(self, config: &Config) -> Result<()> {
        let WalCommand { verbose, command } = self;

        match command {
            Command::Dump(dump) => dump.run(config, verbose).await,
        }
    }
}
