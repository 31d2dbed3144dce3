use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No order with id {id}")]
    NotFound { id: i64 },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidArgument,
    Io,
    NotFound,
    Config,
}

impl OrderError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        OrderError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        OrderError::Config {
            message: message.into(),
        }
    }

    /// Prefixes an `InvalidArgument` message with the CSV line it came from.
    /// Other variants pass through untouched.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            OrderError::InvalidArgument { message } => OrderError::InvalidArgument {
                message: format!("line {}: {}", line, message),
            },
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            OrderError::InvalidArgument { .. } | OrderError::Csv(_) => {
                ErrorCategory::InvalidArgument
            }
            OrderError::Io { .. } => ErrorCategory::Io,
            OrderError::NotFound { .. } => ErrorCategory::NotFound,
            OrderError::Config { .. } | OrderError::Serialization(_) => ErrorCategory::Config,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OrderError::InvalidArgument { message } => format!("Malformed order data ({})", message),
            OrderError::Io { path, .. } => format!("Could not read orders file '{}'", path),
            OrderError::NotFound { id } => format!("Order {} does not exist", id),
            OrderError::Csv(e) => format!("The orders file is not valid CSV ({})", e),
            OrderError::Config { message } => format!("Configuration problem: {}", message),
            OrderError::Serialization(e) => format!("Could not render output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::InvalidArgument => {
                "Each line must look like: <id>,<name>:<price>;<name>:<price>"
            }
            ErrorCategory::Io => "Check that the file exists and is readable",
            ErrorCategory::NotFound => "Run `grocery list` to see the loaded order ids",
            ErrorCategory::Config => "Check the TOML config file and command line flags",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::InvalidArgument | ErrorCategory::Config => 1,
            ErrorCategory::NotFound => 2,
            ErrorCategory::Io => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_only_touches_invalid_argument() {
        let err = OrderError::invalid_argument("bad id 'x'").at_line(7);
        assert_eq!(err.to_string(), "Invalid argument: line 7: bad id 'x'");

        let err = OrderError::NotFound { id: 3 }.at_line(7);
        assert!(matches!(err, OrderError::NotFound { id: 3 }));
    }

    #[test]
    fn test_categories_and_exit_codes() {
        let not_found = OrderError::NotFound { id: 500 };
        assert_eq!(not_found.category(), ErrorCategory::NotFound);
        assert_eq!(not_found.exit_code(), 2);

        let io = OrderError::Io {
            path: "missing.csv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(io.category(), ErrorCategory::Io);
        assert_eq!(io.exit_code(), 3);
        assert!(io.user_friendly_message().contains("missing.csv"));

        assert_eq!(OrderError::config("x").exit_code(), 1);
    }
}
