use std::path::PathBuf;

use clap::Args;

use crate::common::debug;
use crate::config::{env, Config};
use crate::dump::Dumper;
use crate::format::{KeyFormatter, ValueFormatter};
use crate::Result;

/// Dump WAL files
#[derive(Args, Debug)]
pub struct DumpCommand {
    /// Paths to WAL files
    #[arg(required = true, value_name = "WAL_FILES")]
    pub(crate) paths: Vec<PathBuf>,

    /// Key formatter, one of a fixed mode set: quoted, pretty, hex, size, text, null
    /// (aliases %x, %X, %q, %s; general format strings are not supported)
    #[arg(long, env = env::KEY_FORMAT)]
    pub(crate) key: Option<KeyFormatter>,

    /// Value formatter, one of a fixed mode set: size, quoted, pretty, hex, text, null
    /// (aliases %x, %X, %q, %s; general format strings are not supported)
    #[arg(long, env = env::VALUE_FORMAT)]
    pub(crate) value: Option<ValueFormatter>,
}

impl DumpCommand {
    pub async fn run(self, config: &Config, verbose: bool) -> Result<()> {
        let DumpCommand { paths, key, value } = self;

        let formatter = config.formatter_config(key, value, verbose)?;
        debug!("Dump {} files with {:?}", paths.len(), formatter);

        let mut dumper = Dumper::new(formatter, std::io::stdout(), std::io::stderr());
        let summary = dumper.run(&paths).await?;

        summary.into_result()
    }
}
