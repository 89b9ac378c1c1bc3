//! Weather data initialization sequence
//!
//! This module orchestrates the three dependent fetches that populate a
//! city's weather view: time zone, current weather, then forecast, in that
//! order. Results accumulate in a shared [`WeatherSnapshot`] published
//! through a watch channel; the aggregate only counts as ready once all
//! three results are present. A failed fetch aborts the rest of the
//! sequence and leaves the snapshot in progress.
//!
//! Re-invoking [`WeatherInitializer::initialize`] while a prior run is in
//! flight supersedes it: each run owns a generation number and stores from
//! an outdated generation are discarded, so interleaved completions cannot
//! mix results from different runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::api::{Units, WeatherDataClient};
use crate::error::status_text;
use crate::models::{City, CurrentWeather, Forecast, TimeZoneInfo};
use crate::{Result, WeatherError};

/// Aggregate readiness of the weather data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializationState {
    /// At least one of the three results is still missing
    InProgress,
    /// Time zone, current weather and forecast are all present
    Ready,
}

/// The three fetch results owned by the initialization sequence
#[derive(Debug, Clone, Default)]
pub struct WeatherSnapshot {
    /// Current weather, cleared at the start of every run
    pub current_weather: Option<CurrentWeather>,
    /// Forecast with city-tagged entries, cleared at the start of every run
    pub forecast: Option<Forecast>,
    /// Time zone, retained from the previous run until overwritten
    pub time_zone: Option<TimeZoneInfo>,
}

impl WeatherSnapshot {
    /// Derive the aggregate state; never cached, recomputed per call
    #[must_use]
    pub fn state(&self) -> InitializationState {
        if self.is_ready() {
            InitializationState::Ready
        } else {
            InitializationState::InProgress
        }
    }

    /// Whether all three results are present
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.current_weather.is_some() && self.forecast.is_some() && self.time_zone.is_some()
    }
}

/// Collaborator that surfaces transport failures to the user-facing layer
pub trait ErrorReporter: Send + Sync {
    /// Report a failed request with its HTTP status code and textual form
    fn report(&self, status: u16, message: &str);
}

/// Default reporter that writes failures to the log
pub struct LogErrorReporter;

impl ErrorReporter for LogErrorReporter {
    fn report(&self, status: u16, message: &str) {
        error!("Weather service failure: {status} {message}");
    }
}

/// Orchestrates the ordered fetches and publishes the shared snapshot
pub struct WeatherInitializer {
    client: Arc<dyn WeatherDataClient>,
    reporter: Arc<dyn ErrorReporter>,
    snapshot: watch::Sender<WeatherSnapshot>,
    generation: AtomicU64,
}

impl WeatherInitializer {
    /// Create a new initializer around a data client and error reporter
    #[must_use]
    pub fn new(client: Arc<dyn WeatherDataClient>, reporter: Arc<dyn ErrorReporter>) -> Self {
        let (snapshot, _) = watch::channel(WeatherSnapshot::default());
        Self {
            client,
            reporter,
            snapshot,
            generation: AtomicU64::new(0),
        }
    }

    /// Subscribe to snapshot changes
    ///
    /// The receiver is notified on the initial clear and after every stored
    /// result; readiness is derived from the received snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WeatherSnapshot> {
        self.snapshot.subscribe()
    }

    /// Current copy of the snapshot
    #[must_use]
    pub fn snapshot(&self) -> WeatherSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Current aggregate state
    #[must_use]
    pub fn state(&self) -> InitializationState {
        self.snapshot.borrow().state()
    }

    /// Run the initialization sequence for a city
    ///
    /// Never returns an error: transport failures go to the error reporter,
    /// anything else is logged and swallowed. Observers learn about
    /// progress through the watch channel.
    pub async fn initialize(&self, city: &City, units: Units) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Initializing weather data for {}", city.name);

        // Previous weather results are stale now; the time zone keeps its
        // old value until the new lookup lands.
        self.snapshot.send_modify(|snapshot| {
            snapshot.current_weather = None;
            snapshot.forecast = None;
        });

        match self.run(generation, city, units).await {
            Ok(true) => info!("Weather data for {} is ready", city.name),
            Ok(false) => {
                debug!("Initialization for {} superseded, results discarded", city.name);
            }
            Err(err) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    debug!("Superseded initialization for {} failed: {err}", city.name);
                } else if let WeatherError::Transport { status } = err {
                    self.reporter.report(status, status_text(status));
                } else {
                    warn!("Weather initialization for {} failed: {err}", city.name);
                }
            }
        }
    }

    /// The fetch chain itself: time zone, current weather, forecast
    ///
    /// Returns `Ok(false)` when the run was superseded part-way through.
    async fn run(&self, generation: u64, city: &City, units: Units) -> Result<bool> {
        let timestamp = Utc::now().timestamp();
        let time_zone = self.client.time_zone(&city.coordinates, timestamp).await?;
        if !self.store(generation, |s| s.time_zone = Some(time_zone)) {
            return Ok(false);
        }

        let current = self.client.current_weather(city, units).await?;
        if !self.store(generation, |s| s.current_weather = Some(current)) {
            return Ok(false);
        }

        let mut forecast = self.client.forecast(city, units).await?;
        forecast.tag_with_city(&city.name);
        if !self.store(generation, |s| s.forecast = Some(forecast)) {
            return Ok(false);
        }

        Ok(true)
    }

    /// Store one result if this run still owns the latest generation
    ///
    /// The check runs inside the watch channel's modification lock, so a
    /// newer run's clear cannot interleave with a stale store.
    fn store(&self, generation: u64, write: impl FnOnce(&mut WeatherSnapshot)) -> bool {
        let mut applied = false;
        self.snapshot.send_if_modified(|snapshot| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            write(snapshot);
            applied = true;
            true
        });
        applied
    }
}
