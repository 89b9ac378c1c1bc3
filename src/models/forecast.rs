//! Forecast model: ordered weather periods for a city

use serde::{Deserialize, Serialize};

use super::weather::CurrentWeather;

/// Weather forecast as an ordered sequence of periods
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Forecast {
    /// City name as reported by the provider
    pub city_name: String,
    /// Forecast periods in chronological order
    pub entries: Vec<CurrentWeather>,
}

impl Forecast {
    /// Stamp every forecast entry with the owning city's display name
    ///
    /// The provider does not repeat the city name per period, but the
    /// consuming layer renders each period standalone, so the name is
    /// attached to every entry after the fetch completes.
    pub fn tag_with_city(&mut self, name: &str) {
        for entry in &mut self.entries {
            entry.city_name = Some(name.to_string());
        }
    }

    /// Number of forecast periods
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the forecast contains no periods
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn period(description: &str) -> CurrentWeather {
        CurrentWeather {
            timestamp: Utc::now(),
            temperature: 10.0,
            temperature_min: 8.0,
            temperature_max: 12.0,
            pressure: 1010.0,
            humidity: 70,
            description: description.to_string(),
            icon: None,
            wind_speed: 3.0,
            wind_direction: 180,
            sunrise: None,
            sunset: None,
            city_name: None,
        }
    }

    #[test]
    fn test_tag_with_city() {
        let mut forecast = Forecast {
            city_name: "Warszawa".to_string(),
            entries: vec![period("light rain"), period("overcast clouds")],
        };

        forecast.tag_with_city("Warsaw");

        assert_eq!(forecast.len(), 2);
        for entry in &forecast.entries {
            assert_eq!(entry.city_name.as_deref(), Some("Warsaw"));
        }
    }

    #[test]
    fn test_tag_empty_forecast() {
        let mut forecast = Forecast {
            city_name: String::new(),
            entries: Vec::new(),
        };
        forecast.tag_with_city("Warsaw");
        assert!(forecast.is_empty());
    }
}
