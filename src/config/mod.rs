mod config;
pub use config::{Config, DumpConfig};

pub mod env {
    /// Tracing filter directive, e.g. `waltool=debug`.
    pub const LOG_DIRECTIVE: &str = "WALTOOL_LOG";
    pub const CONFIG_PATH: &str = "WALTOOL_CONFIG";
    pub const KEY_FORMAT: &str = "WALTOOL_KEY_FORMAT";
    pub const VALUE_FORMAT: &str = "WALTOOL_VALUE_FORMAT";
}
