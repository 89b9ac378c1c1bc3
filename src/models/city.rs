//! City model for geographic identity and coordinates

use serde::{Deserialize, Serialize};

/// Geographic coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Format coordinates as the `lat,lon` pair used in API requests
    #[must_use]
    pub fn as_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A city tracked by the weather service
///
/// Immutable input to the initialization sequence. The id matches the
/// weather provider's city identifier.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct City {
    /// Provider city id
    pub id: u64,
    /// Display name (e.g. "Warsaw")
    pub name: String,
    /// Geographic coordinates
    pub coordinates: Coordinates,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: Option<String>,
}

impl City {
    /// Create a new city
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates: Coordinates {
                latitude,
                longitude,
            },
            country: None,
        }
    }

    /// Create a city with country code
    #[must_use]
    pub fn with_country(
        id: u64,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        country: impl Into<String>,
    ) -> Self {
        Self {
            country: Some(country.into()),
            ..Self::new(id, name, latitude, longitude)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_query_value() {
        let coordinates = Coordinates {
            latitude: 52.23,
            longitude: 21.01,
        };
        assert_eq!(coordinates.as_query_value(), "52.23,21.01");
    }

    #[test]
    fn test_city_with_country() {
        let city = City::with_country(756135, "Warsaw", 52.23, 21.01, "PL");
        assert_eq!(city.id, 756135);
        assert_eq!(city.name, "Warsaw");
        assert_eq!(city.country, Some("PL".to_string()));
        assert_eq!(city.coordinates.latitude, 52.23);
    }
}
