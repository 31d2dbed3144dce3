#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{OrderError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use toml_config::{OutputFormat, TomlConfig};

/// Effective settings after command line flags are layered over the TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub orders_file: String,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    pub output_format: OutputFormat,
}

impl Settings {
    pub fn resolve(file_flag: Option<&str>, json_flag: bool, toml: &TomlConfig) -> Result<Self> {
        let orders_file = file_flag
            .or_else(|| toml.orders_file())
            .ok_or_else(|| {
                OrderError::config("no orders file given (use --file or [orders] file)")
            })?
            .to_string();

        let output_format = if json_flag {
            OutputFormat::Json
        } else {
            toml.output_format()
        };

        Ok(Self {
            orders_file,
            log_level: toml.log_level().map(str::to_string),
            log_format: toml.log_format(),
            output_format,
        })
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("orders.file", &self.orders_file)?;
        validate_file_extension("orders.file", &self.orders_file, &["csv"])?;
        Ok(())
    }
}
