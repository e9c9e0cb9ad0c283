use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The city name or coordinate pair currently driving fetches.
///
/// Exactly one query is active at a time; the last one entered wins.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

/// Point-in-time weather snapshot for a location.
///
/// Produced fresh on every successful fetch and fully replaced (never
/// merged) by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub description: String,
    pub icon: String,
}

impl CurrentConditions {
    /// Image URL for this snapshot's icon code, per the provider's
    /// icon-code-to-image convention.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}.png", self.icon)
    }
}

/// One predicted weather sample at a specific future time.
///
/// The timestamp is the provider's naive local time for the forecast
/// location, rendered as time-of-day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub description: String,
}

/// Ordered forecast samples, as received from the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub entries: Vec<ForecastEntry>,
}
