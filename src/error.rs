//! Error types and handling for the degree day calculator

use thiserror::Error;

/// Main error type for the `Gradtage` library
#[derive(Error, Debug)]
pub enum GradtageError {
    /// Bad caller input; aborts a whole batch before any fetch
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Transport-level failure while talking to the weather archive
    #[error("Network error: {message}")]
    Network { message: String },

    /// The archive answered, but not in the expected shape
    #[error("Unexpected data format: {message}")]
    DataFormat { message: String },

    /// No usable readings remained after dropping missing values
    #[error("No valid temperature data for {location}")]
    NoData { location: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GradtageError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new data format error
    pub fn data_format<S: Into<String>>(message: S) -> Self {
        Self::DataFormat {
            message: message.into(),
        }
    }

    /// Create a new no-data error for a location
    pub fn no_data<S: Into<String>>(location: S) -> Self {
        Self::NoData {
            location: location.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether a caller may reasonably try the same request again.
    /// Nothing in this crate retries on its own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, GradtageError::Network { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GradtageError::Validation { message } => format!("Invalid input: {message}"),
            GradtageError::Network { .. } => {
                "Unable to reach the weather archive. Please check your internet connection."
                    .to_string()
            }
            GradtageError::DataFormat { .. } => {
                "The weather archive returned data in an unexpected format.".to_string()
            }
            GradtageError::NoData { location } => {
                format!("No temperature data available for {location} in the requested period.")
            }
            GradtageError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}

impl From<reqwest_middleware::Error> for GradtageError {
    fn from(err: reqwest_middleware::Error) -> Self {
        GradtageError::network(err.to_string())
    }
}

impl From<reqwest::Error> for GradtageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GradtageError::data_format(err.to_string())
        } else {
            GradtageError::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GradtageError {
    fn from(err: serde_json::Error) -> Self {
        GradtageError::data_format(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let validation_err = GradtageError::validation("invalid coordinates");
        assert!(matches!(validation_err, GradtageError::Validation { .. }));

        let network_err = GradtageError::network("connection refused");
        assert!(matches!(network_err, GradtageError::Network { .. }));

        let no_data = GradtageError::no_data("Berlin");
        assert_eq!(no_data.to_string(), "No valid temperature data for Berlin");
    }

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(GradtageError::network("timeout").is_retryable());
        assert!(!GradtageError::data_format("missing daily").is_retryable());
        assert!(!GradtageError::no_data("Hamburg").is_retryable());
        assert!(!GradtageError::validation("bad date").is_retryable());
    }

    #[test]
    fn test_user_messages() {
        let network_err = GradtageError::network("test");
        assert!(network_err.user_message().contains("Unable to reach"));

        let validation_err = GradtageError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let no_data = GradtageError::no_data("München");
        assert!(no_data.user_message().contains("München"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: GradtageError = json_err.into();
        assert!(matches!(err, GradtageError::DataFormat { .. }));
    }
}
