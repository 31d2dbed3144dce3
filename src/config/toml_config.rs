use crate::utils::error::{OrderError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_one_of, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];
const OUTPUT_FORMATS: [&str; 2] = ["table", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub orders: OrdersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersConfig {
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| OrderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| OrderError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the value of the environment variable; unknown
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| OrderError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn orders_file(&self) -> Option<&str> {
        self.orders.file.as_deref()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }

    pub fn log_format(&self) -> LogFormat {
        match self.logging.format.as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.output.format.as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(level) = self.log_level() {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        if let Some(format) = self.logging.format.as_deref() {
            validate_one_of("logging.format", format, &LOG_FORMATS)?;
        }
        if let Some(format) = self.output.format.as_deref() {
            validate_one_of("output.format", format, &OUTPUT_FORMATS)?;
        }
        Ok(())
    }
}
