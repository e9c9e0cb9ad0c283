use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::ApiError,
    model::{CurrentConditions, Forecast, ForecastEntry},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Timestamp format of the forecast endpoint's `dt_txt` field.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host (mock server in tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// Single best-effort GET against one endpoint: no retry, no
    /// timeout, no caching. The query pairs are percent-encoded by
    /// reqwest, so city names with spaces survive intact.
    async fn get_json<T>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = res.status();
        let body = res.text().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, ApiError> {
        tracing::debug!(%city, "fetching current conditions");
        let parsed: OwCurrentResponse = self.get_json("weather", &[("q", city)]).await?;
        current_from_wire(parsed)
    }

    async fn forecast_by_city(&self, city: &str) -> Result<Forecast, ApiError> {
        tracing::debug!(%city, "fetching forecast");
        let parsed: OwForecastResponse = self.get_json("forecast", &[("q", city)]).await?;
        forecast_from_wire(parsed)
    }

    async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentConditions, ApiError> {
        tracing::debug!(lat, lon, "fetching current conditions by position");
        let parsed: OwCurrentResponse = self
            .get_json("weather", &[("lat", &lat.to_string()), ("lon", &lon.to_string())])
            .await?;
        current_from_wire(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwEntryMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwEntryWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwEntryMain,
    weather: Vec<OwEntryWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn current_from_wire(raw: OwCurrentResponse) -> Result<CurrentConditions, ApiError> {
    let leading = raw
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Decode("empty weather array".to_string()))?;

    Ok(CurrentConditions {
        location_name: raw.name,
        temperature_c: raw.main.temp,
        humidity_pct: raw.main.humidity,
        pressure_hpa: raw.main.pressure,
        description: leading.description,
        icon: leading.icon,
    })
}

fn forecast_from_wire(raw: OwForecastResponse) -> Result<Forecast, ApiError> {
    let mut entries = Vec::with_capacity(raw.list.len());

    for item in raw.list {
        let timestamp = NaiveDateTime::parse_from_str(&item.dt_txt, DT_TXT_FORMAT)
            .map_err(|e| ApiError::Decode(format!("bad dt_txt '{}': {e}", item.dt_txt)))?;

        let description = item
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| ApiError::Decode("empty weather array in forecast entry".to_string()))?;

        entries.push(ForecastEntry {
            timestamp,
            temperature_c: item.main.temp,
            description,
        });
    }

    Ok(Forecast { entries })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
