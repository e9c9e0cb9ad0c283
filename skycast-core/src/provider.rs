use crate::{
    Config,
    error::ApiError,
    model::{CurrentConditions, Forecast},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// One weather data source.
///
/// The view drives every fetch through this trait, so tests can
/// substitute a recording double for the real HTTP client.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city name.
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, ApiError>;

    /// Short-term forecast for a city name.
    async fn forecast_by_city(&self, city: &str) -> Result<Forecast, ApiError>;

    /// Current conditions for a coordinate pair.
    async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentConditions, ApiError>;
}

/// Construct the provider from config, failing fast when no API key
/// can be resolved.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key()?;
    Ok(Box::new(OpenWeatherClient::new(api_key)))
}
