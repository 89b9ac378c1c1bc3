//! Configuration management for the `CityWeather` service
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `CityWeather` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityWeatherConfig {
    /// Weather API configuration
    pub weather: WeatherApiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// Weather API key
    pub api_key: String,
    /// Endpoint for current weather requests
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// Endpoint for forecast requests
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Endpoint for time zone lookups
    #[serde(default = "default_timezone_url")]
    pub timezone_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_forecast_url() -> String {
    "https://api.openweathermap.org/data/2.5/forecast".to_string()
}

fn default_timezone_url() -> String {
    "https://maps.googleapis.com/maps/api/timezone/json".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CityWeatherConfig {
    fn default() -> Self {
        Self {
            weather: WeatherApiConfig {
                api_key: String::new(),
                weather_url: default_weather_url(),
                forecast_url: default_forecast_url(),
                timezone_url: default_timezone_url(),
                timeout_seconds: default_timeout(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
        }
    }
}

impl CityWeatherConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides, e.g. CITYWEATHER_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("CITYWEATHER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: CityWeatherConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cityweather").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_log_level()?;
        Ok(())
    }

    /// Validate the API key
    fn validate_api_key(&self) -> Result<()> {
        if self.weather.api_key.is_empty() {
            return Err(WeatherError::config(
                "Weather API key is required. Set it in the config file or via CITYWEATHER_WEATHER__API_KEY."
            ).into());
        }

        if self.weather.api_key.len() < 8 {
            return Err(WeatherError::config(
                "Weather API key appears to be invalid (too short). Please check your API key.",
            )
            .into());
        }

        Ok(())
    }

    /// Validate endpoint URLs
    fn validate_urls(&self) -> Result<()> {
        for (name, url) in [
            ("weather_url", &self.weather.weather_url),
            ("forecast_url", &self.weather.forecast_url),
            ("timezone_url", &self.weather.timezone_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 {
            return Err(
                WeatherError::config("Weather API timeout must be greater than zero").into(),
            );
        }

        if self.weather.timeout_seconds > 300 {
            return Err(
                WeatherError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate the log level value
    fn validate_log_level(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> CityWeatherConfig {
        let mut config = CityWeatherConfig::default();
        config.weather.api_key = "valid_api_key_123".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = CityWeatherConfig::default();
        assert!(
            config
                .weather
                .weather_url
                .contains("openweathermap.org/data/2.5/weather")
        );
        assert!(config.weather.forecast_url.ends_with("/forecast"));
        assert!(config.weather.timezone_url.contains("timezone"));
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = CityWeatherConfig::default();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key"));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = config_with_key();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = config_with_key();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut config = config_with_key();
        config.weather.forecast_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("forecast_url"));
    }

    #[test]
    fn test_validation_timeout_range() {
        let mut config = config_with_key();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = CityWeatherConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("cityweather"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
