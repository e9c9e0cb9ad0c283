//! Pure rendering of [`ViewState`] to terminal text. The loop owns
//! the printing.

use skycast_core::{CurrentConditions, Forecast};

use crate::app::{Phase, ViewState};

/// Number of forecast entries shown, regardless of how many the
/// provider returns.
pub const FORECAST_SHOWN: usize = 5;

pub const LOADING: &str = "Loading...";

pub fn view(state: &ViewState) -> String {
    let mut out = String::new();

    if state.phase == Phase::Loading {
        out.push_str(LOADING);
        out.push('\n');
    }

    if let Some(message) = state.error {
        out.push_str(message);
        out.push('\n');
    }

    if let Some(conditions) = &state.conditions {
        out.push_str(&conditions_panel(conditions));
    }

    if let Some(forecast) = &state.forecast {
        out.push_str(&forecast_panel(forecast));
    }

    out
}

fn conditions_panel(conditions: &CurrentConditions) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", conditions.location_name));
    out.push_str(&format!(
        "{} ({})\n",
        conditions.description,
        conditions.icon_url()
    ));
    out.push_str(&format!("Temperature: {}°C\n", conditions.temperature_c));
    out.push_str(&format!("Humidity: {}%\n", conditions.humidity_pct));
    out.push_str(&format!("Pressure: {} hPa\n", conditions.pressure_hpa));
    out
}

fn forecast_panel(forecast: &Forecast) -> String {
    let mut out = String::from("Forecast\n");
    for entry in forecast.entries.iter().take(FORECAST_SHOWN) {
        out.push_str(&format!(
            "  {}  {}  {}°C\n",
            entry.timestamp.format("%H:%M:%S"),
            entry.description,
            entry.temperature_c
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use skycast_core::{ApiError, ForecastEntry, Query};

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            location_name: "Lahore".to_string(),
            temperature_c: 31.2,
            humidity_pct: 40,
            pressure_hpa: 1006,
            description: "haze".to_string(),
            icon: "50d".to_string(),
        }
    }

    fn forecast(len: usize) -> Forecast {
        let midnight = NaiveDate::from_ymd_opt(2026, 8, 8)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Forecast {
            entries: (0..len)
                .map(|i| ForecastEntry {
                    timestamp: midnight + chrono::Duration::hours(3 * i as i64),
                    temperature_c: 25.0 + i as f64,
                    description: "clear sky".to_string(),
                })
                .collect(),
        }
    }

    fn loading_state() -> ViewState {
        let mut state = ViewState::default();
        state.begin(Query::City("Lahore".to_string()));
        state
    }

    fn success_state(forecast_len: usize) -> ViewState {
        let mut state = ViewState::default();
        let ticket = state.begin(Query::City("Lahore".to_string()));
        state.apply(ticket, Ok((conditions(), forecast(forecast_len))));
        state
    }

    fn error_state() -> ViewState {
        let mut state = ViewState::default();
        let ticket = state.begin(Query::City("Atlantis".to_string()));
        state.apply(
            ticket,
            Err(ApiError::Status {
                status: 404,
                body: "city not found".to_string(),
            }),
        );
        state
    }

    #[test]
    fn loading_state_shows_indicator_only() {
        assert_eq!(view(&loading_state()), "Loading...\n");
    }

    #[test]
    fn error_state_shows_fixed_message_without_panels() {
        let out = view(&error_state());
        assert_eq!(out, "City not found or API error\n");
    }

    #[test]
    fn success_state_shows_conditions_and_forecast() {
        let out = view(&success_state(3));
        assert!(out.contains("Lahore"));
        assert!(out.contains("haze (https://openweathermap.org/img/wn/50d.png)"));
        assert!(out.contains("Temperature: 31.2°C"));
        assert!(out.contains("Humidity: 40%"));
        assert!(out.contains("Pressure: 1006 hPa"));
        assert!(out.contains("Forecast\n"));
        assert!(out.contains("00:00:00  clear sky  25°C"));
        assert!(out.contains("06:00:00  clear sky  27°C"));
    }

    #[test]
    fn forecast_panel_truncates_to_five_entries() {
        // Three-hourly feed: the provider returns 40 entries.
        let out = forecast_panel(&forecast(40));

        assert_eq!(out.lines().count(), 1 + FORECAST_SHOWN);
        assert!(out.contains("12:00:00"));
        assert!(!out.contains("15:00:00"));
    }

    #[test]
    fn forecast_entries_render_in_received_order() {
        let out = forecast_panel(&forecast(5));
        let first = out.lines().nth(1).unwrap();
        let last = out.lines().nth(5).unwrap();

        assert!(first.contains("00:00:00"));
        assert!(last.contains("12:00:00"));
    }
}
