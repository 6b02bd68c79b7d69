use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::common::{debug, Error, ErrorKind};
use crate::format::{FormatterConfig, KeyFormatter, ValueFormatter};
use crate::Result;

/// Optional configuration file.
///
/// ```yaml
/// dump:
///   key: hex
///   value: quoted
///   verbose: true
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dump: DumpConfig,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct DumpConfig {
    pub key: Option<String>,
    pub value: Option<String>,
    pub verbose: Option<bool>,
}

impl Config {
    pub async fn load_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load = async {
            let buf = fs::read(path).await?;
            let config = serde_yaml::from_slice::<Config>(&buf)?;
            Ok::<_, Error>(config)
        };

        let config = load.await.map_err(|source| {
            Error::from(ErrorKind::ConfigLoad {
                path: path.to_owned(),
                source: Box::new(source),
            })
        })?;
        debug!("{:?}", config);

        Ok(config)
    }

    /// Resolve formatter settings. Command line values take precedence over
    /// the file, which takes precedence over the defaults.
    pub fn formatter_config(
        &self,
        key: Option<KeyFormatter>,
        value: Option<ValueFormatter>,
        verbose: bool,
    ) -> Result<FormatterConfig> {
        let key = match key {
            Some(key) => key,
            None => match &self.dump.key {
                Some(mode) => mode.parse()?,
                None => KeyFormatter::default(),
            },
        };
        let value = match value {
            Some(value) => value,
            None => match &self.dump.value {
                Some(mode) => mode.parse()?,
                None => ValueFormatter::default(),
            },
        };

        Ok(FormatterConfig {
            key,
            value,
            verbose: verbose || self.dump.verbose.unwrap_or(false),
        })
    }
}
