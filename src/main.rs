use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cityweather::{
    City, CityWeatherConfig, CurrentWeather, LogErrorReporter, OpenWeatherClient, Units,
    WeatherInitializer, WeatherSnapshot,
};
use tracing_subscriber::EnvFilter;

fn parse_city(args: &[String]) -> Result<(City, Units)> {
    if args.len() < 4 {
        bail!("usage: cityweather <city-id> <name> <lat> <lon> [--imperial]");
    }

    let id = args[0]
        .parse::<u64>()
        .with_context(|| format!("Invalid city id: {}", args[0]))?;
    let lat = args[2]
        .parse::<f64>()
        .with_context(|| format!("Invalid latitude: {}", args[2]))?;
    let lon = args[3]
        .parse::<f64>()
        .with_context(|| format!("Invalid longitude: {}", args[3]))?;

    let units = Units::from_metric(!args.iter().any(|a| a == "--imperial"));
    Ok((City::new(id, args[1].clone(), lat, lon), units))
}

fn print_summary(city: &City, snapshot: &WeatherSnapshot) {
    if let Some(tz) = &snapshot.time_zone {
        println!("{}: {} ({})", city.name, tz.timezone_name, tz.timezone_id);
    }
    if let Some(current) = &snapshot.current_weather {
        println!(
            "Now: {:.1}° {} wind {}",
            current.temperature,
            current.description,
            current.format_wind()
        );
    }
    if let Some(forecast) = &snapshot.forecast {
        println!("Forecast ({} periods):", forecast.len());
        for entry in forecast.entries.iter().take(8) {
            print_period(entry);
        }
    }
}

fn print_period(entry: &CurrentWeather) {
    println!(
        "  {}  {:>6.1}°  {}",
        entry.timestamp.format("%a %H:%M"),
        entry.temperature,
        entry.description
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = CityWeatherConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (city, units) = parse_city(&args)?;

    let client = Arc::new(OpenWeatherClient::new(config)?);
    let initializer = Arc::new(WeatherInitializer::new(client, Arc::new(LogErrorReporter)));

    // Fire-and-forget: the sequence reports its own failures, the caller
    // observes progress through the watch channel.
    let mut changes = initializer.subscribe();
    let mut worker = {
        let initializer = Arc::clone(&initializer);
        let city = city.clone();
        tokio::spawn(async move {
            initializer.initialize(&city, units).await;
        })
    };

    loop {
        if changes.borrow_and_update().is_ready() {
            break;
        }
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = &mut worker => break,
        }
    }

    let snapshot = initializer.snapshot();
    if !snapshot.is_ready() {
        bail!("Weather data for {} could not be fully loaded", city.name);
    }

    print_summary(&city, &snapshot);
    Ok(())
}
