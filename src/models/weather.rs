//! Current weather snapshot model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weather snapshot for a city at a point in time
///
/// Used both for the current conditions and for the individual periods of a
/// forecast. `city_name` starts out unset and is stamped by the
/// initialization sequence once the owning city is known.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentWeather {
    /// Timestamp of this observation or forecast period
    pub timestamp: DateTime<Utc>,
    /// Temperature in the requested unit system
    pub temperature: f32,
    /// Minimum temperature over the observation area
    pub temperature_min: f32,
    /// Maximum temperature over the observation area
    pub temperature_max: f32,
    /// Atmospheric pressure in hPa
    pub pressure: f32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Human-readable description of conditions
    pub description: String,
    /// Weather condition icon id from the API
    pub icon: Option<String>,
    /// Wind speed in the requested unit system
    pub wind_speed: f32,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_direction: u16,
    /// Sunrise time (current conditions only)
    pub sunrise: Option<DateTime<Utc>>,
    /// Sunset time (current conditions only)
    pub sunset: Option<DateTime<Utc>>,
    /// Name of the owning city, set during forecast tagging
    pub city_name: Option<String>,
}

impl CurrentWeather {
    /// Convert wind direction from degrees to cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
        match degrees {
            0..=22 | 338..=360 => "N",
            23..=67 => "NE",
            68..=112 => "E",
            113..=157 => "SE",
            158..=202 => "S",
            203..=247 => "SW",
            248..=292 => "W",
            293..=337 => "NW",
            _ => "Unknown",
        }
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        let direction = Self::wind_direction_to_cardinal(self.wind_direction);
        format!("{:.1} {direction}", self.wind_speed)
    }
}
