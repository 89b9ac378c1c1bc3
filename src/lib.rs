//! `CityWeather` - Weather data initialization for city weather display
//!
//! This library orchestrates the dependent fetches that populate a city's
//! weather view (time zone, current weather, forecast) and exposes their
//! aggregate readiness through an observable snapshot.

pub mod api;
pub mod config;
pub mod error;
pub mod init;
pub mod models;

// Re-export core types for public API
pub use api::{OpenWeatherClient, Units, WeatherDataClient};
pub use config::CityWeatherConfig;
pub use error::{WeatherError, status_text};
pub use init::{
    ErrorReporter, InitializationState, LogErrorReporter, WeatherInitializer, WeatherSnapshot,
};
pub use models::{City, Coordinates, CurrentWeather, Forecast, TimeZoneInfo};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
