pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use config::toml_config::{OutputFormat, TomlConfig};
pub use domain::{
    order::{Order, TAX_RATE},
    registry::OrderRegistry,
};
pub use utils::error::{OrderError, Result};
