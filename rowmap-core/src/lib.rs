pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigValue, FromConfigValue, RowmapConfig};
pub use logging::init_tracing;
