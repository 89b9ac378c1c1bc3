//! Error types and handling for the `CityWeather` library

use thiserror::Error;

/// Main error type for the `CityWeather` library
#[derive(Error, Debug)]
pub enum WeatherError {
    /// HTTP request that reached the server but came back with a
    /// non-success status code
    #[error("Weather service returned HTTP {status}")]
    Transport { status: u16 },

    /// Network-level failures (connectivity loss, timeouts, DNS)
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// Response body that could not be deserialized into the expected shape
    #[error("Invalid response: {message}")]
    Decode { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl WeatherError {
    /// Create a new transport error from an HTTP status code
    pub fn transport(status: u16) -> Self {
        Self::Transport { status }
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error carries an HTTP status code and should be
    /// surfaced through the error reporter rather than swallowed
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, WeatherError::Transport { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Transport { status } => {
                format!("Weather service error ({}: {})", status, status_text(*status))
            }
            WeatherError::Network { .. } => {
                "Unable to connect to the weather service. Please check your internet connection."
                    .to_string()
            }
            WeatherError::Decode { .. } => {
                "Received malformed data from the weather service.".to_string()
            }
            WeatherError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            WeatherError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

/// Textual form of an HTTP status code, e.g. `404` -> `"Not Found"`
#[must_use]
pub fn status_text(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
}
