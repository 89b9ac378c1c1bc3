//! Data models for the `CityWeather` library
//!
//! This module contains the core domain models organized by concern:
//! - City: Geographic identity and coordinates of a tracked city
//! - Weather: Current weather snapshot and measurements
//! - Forecast: Ordered forecast periods and city tagging
//! - TimeZone: UTC offset information for a city

pub mod city;
pub mod forecast;
pub mod timezone;
pub mod weather;

// Re-export all public types for convenient access
pub use city::{City, Coordinates};
pub use forecast::Forecast;
pub use timezone::TimeZoneInfo;
pub use weather::CurrentWeather;
