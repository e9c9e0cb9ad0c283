//! Core library for the `skycast` terminal weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client behind the [`WeatherProvider`] trait
//! - Shared domain models (queries, conditions, forecasts)
//! - IP-based geolocation
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{ApiError, ApiErrorKind};
pub use location::Coordinates;
pub use model::{CurrentConditions, Forecast, ForecastEntry, Query};
pub use provider::{OpenWeatherClient, WeatherProvider, provider_from_config};
