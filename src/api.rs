//! Weather API client for city weather data
//!
//! This module provides the typed client consumed by the initialization
//! sequence: current weather and forecast from an OpenWeatherMap-style API
//! and time zone lookups from a Google-TimeZone-style API. The
//! [`WeatherDataClient`] trait is the seam the sequencer depends on, so
//! tests can substitute a scripted client.

use crate::config::CityWeatherConfig;
use crate::models::{City, Coordinates, CurrentWeather, Forecast, TimeZoneInfo};
use crate::{Result, WeatherError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Unit system for temperature and wind speed values
///
/// Promoted to an explicit request parameter rather than read from ambient
/// regional settings at fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    /// Celsius and meters per second
    Metric,
    /// Fahrenheit and miles per hour
    Imperial,
}

impl Units {
    /// Build from a "is metric region" flag
    #[must_use]
    pub fn from_metric(is_metric: bool) -> Self {
        if is_metric {
            Units::Metric
        } else {
            Units::Imperial
        }
    }

    /// Value of the `units` query parameter
    #[must_use]
    pub fn as_query_param(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

/// Typed fetches the initialization sequence depends on
#[async_trait]
pub trait WeatherDataClient: Send + Sync {
    /// Fetch current weather for a city
    async fn current_weather(&self, city: &City, units: Units) -> Result<CurrentWeather>;

    /// Fetch the forecast for a city
    async fn forecast(&self, city: &City, units: Units) -> Result<Forecast>;

    /// Fetch time zone information for coordinates at a UTC timestamp
    /// (seconds since epoch)
    async fn time_zone(&self, coordinates: &Coordinates, timestamp: i64) -> Result<TimeZoneInfo>;
}

/// HTTP implementation of [`WeatherDataClient`]
pub struct OpenWeatherClient {
    /// HTTP client
    client: reqwest::Client,
    /// API configuration
    config: CityWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new weather API client
    pub fn new(config: CityWeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cityweather/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Perform a parameterized GET request and deserialize the JSON body
    ///
    /// Non-success status codes become [`WeatherError::Transport`];
    /// undeserializable bodies become [`WeatherError::Decode`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {url}");

        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Request to {url} failed with HTTP {status}");
            return Err(WeatherError::transport(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse response from {url}: {e}");
            WeatherError::decode(format!("unexpected response shape: {e}"))
        })
    }
}

/// Query parameters for the current-weather and forecast endpoints
fn weather_params(api_key: &str, city: &City, units: Units) -> Vec<(&'static str, String)> {
    vec![
        ("appid", api_key.to_string()),
        ("id", city.id.to_string()),
        ("units", units.as_query_param().to_string()),
    ]
}

/// Query parameters for the time zone endpoint
fn timezone_params(coordinates: &Coordinates, timestamp: i64) -> Vec<(&'static str, String)> {
    vec![
        ("location", coordinates.as_query_value()),
        ("timestamp", timestamp.to_string()),
        ("sensor", "false".to_string()),
    ]
}

#[async_trait]
impl WeatherDataClient for OpenWeatherClient {
    async fn current_weather(&self, city: &City, units: Units) -> Result<CurrentWeather> {
        info!("Fetching current weather for {} (id {})", city.name, city.id);

        let params = weather_params(&self.config.weather.api_key, city, units);
        let response: openweather::WeatherEntry = self
            .get_json(&self.config.weather.weather_url, &params)
            .await?;

        Ok(response.into_current_weather())
    }

    async fn forecast(&self, city: &City, units: Units) -> Result<Forecast> {
        info!("Fetching forecast for {} (id {})", city.name, city.id);

        let params = weather_params(&self.config.weather.api_key, city, units);
        let response: openweather::ForecastResponse = self
            .get_json(&self.config.weather.forecast_url, &params)
            .await?;

        let forecast = response.into_forecast();
        debug!("Forecast contains {} periods", forecast.len());
        Ok(forecast)
    }

    async fn time_zone(&self, coordinates: &Coordinates, timestamp: i64) -> Result<TimeZoneInfo> {
        info!(
            "Fetching time zone for {} at timestamp {timestamp}",
            coordinates.as_query_value()
        );

        let params = timezone_params(coordinates, timestamp);
        let response: openweather::TimeZoneResponse = self
            .get_json(&self.config.weather.timezone_url, &params)
            .await?;

        response.into_time_zone()
    }
}

/// Wire formats of the weather and time zone APIs, and conversions into
/// the internal models
mod openweather {
    use crate::models::{CurrentWeather, Forecast, TimeZoneInfo};
    use crate::{Result, WeatherError};
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    /// A current-weather response, or one period of a forecast list
    #[derive(Debug, Deserialize)]
    pub struct WeatherEntry {
        /// Observation timestamp, seconds since epoch
        pub dt: i64,
        pub main: MainData,
        #[serde(default)]
        pub weather: Vec<Condition>,
        pub wind: Option<WindData>,
        pub sys: Option<SysData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        pub temp: f32,
        pub temp_min: f32,
        pub temp_max: f32,
        pub pressure: f32,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub description: String,
        pub icon: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WindData {
        pub speed: f32,
        /// Direction in degrees; the API omits it in calm conditions
        pub deg: Option<f32>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SysData {
        pub sunrise: Option<i64>,
        pub sunset: Option<i64>,
    }

    /// Forecast response: a list of periods plus city metadata
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub city: ForecastCity,
        #[serde(default)]
        pub list: Vec<WeatherEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastCity {
        pub name: String,
    }

    /// Time zone response
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TimeZoneResponse {
        pub status: String,
        pub time_zone_id: Option<String>,
        pub time_zone_name: Option<String>,
        #[serde(default)]
        pub raw_offset: i32,
        #[serde(default)]
        pub dst_offset: i32,
    }

    fn epoch_to_utc(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
    }

    impl WeatherEntry {
        /// Convert one wire entry into the internal snapshot model
        pub fn into_current_weather(self) -> CurrentWeather {
            let condition = self.weather.into_iter().next();
            let wind = self.wind.unwrap_or(WindData {
                speed: 0.0,
                deg: None,
            });
            let sys = self.sys.unwrap_or(SysData {
                sunrise: None,
                sunset: None,
            });

            CurrentWeather {
                timestamp: epoch_to_utc(self.dt),
                temperature: self.main.temp,
                temperature_min: self.main.temp_min,
                temperature_max: self.main.temp_max,
                pressure: self.main.pressure,
                humidity: self.main.humidity,
                description: condition
                    .as_ref()
                    .map(|c| c.description.clone())
                    .unwrap_or_default(),
                icon: condition.and_then(|c| c.icon),
                wind_speed: wind.speed,
                wind_direction: wind.deg.map(|d| d.rem_euclid(360.0) as u16).unwrap_or(0),
                sunrise: sys.sunrise.map(epoch_to_utc),
                sunset: sys.sunset.map(epoch_to_utc),
                city_name: None,
            }
        }
    }

    impl ForecastResponse {
        /// Convert the wire forecast into the internal model
        pub fn into_forecast(self) -> Forecast {
            Forecast {
                city_name: self.city.name,
                entries: self
                    .list
                    .into_iter()
                    .map(WeatherEntry::into_current_weather)
                    .collect(),
            }
        }
    }

    impl TimeZoneResponse {
        /// Convert the wire response, rejecting non-OK API statuses
        pub fn into_time_zone(self) -> Result<TimeZoneInfo> {
            if self.status != "OK" {
                return Err(WeatherError::decode(format!(
                    "time zone lookup returned status {}",
                    self.status
                )));
            }

            Ok(TimeZoneInfo {
                timezone_id: self.time_zone_id.unwrap_or_default(),
                timezone_name: self.time_zone_name.unwrap_or_default(),
                raw_offset_seconds: self.raw_offset,
                dst_offset_seconds: self.dst_offset,
            })
        }
    }
}
