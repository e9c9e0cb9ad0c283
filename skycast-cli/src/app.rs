//! View state machine and the interactive loop driving it.
//!
//! All mutation of what the terminal shows goes through
//! [`ViewState::begin`] and [`ViewState::apply`]; the async drivers
//! ([`search`], [`locate`]) run one full query cycle each.

use inquire::InquireError;
use skycast_core::{
    ApiError, ApiErrorKind, Coordinates, CurrentConditions, Forecast, Query, WeatherProvider,
    location,
};

use crate::render;

/// Fixed user-facing message for any failed fetch. The underlying
/// error kind is logged, never rendered.
pub const FETCH_ERROR_MESSAGE: &str = "City not found or API error";

/// Request lifecycle of the active query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything the view renders.
#[derive(Debug, Default)]
pub struct ViewState {
    pub phase: Phase,
    pub query: Option<Query>,
    pub conditions: Option<CurrentConditions>,
    pub forecast: Option<Forecast>,
    pub error: Option<&'static str>,
    /// Kind of the last failure, kept for logging and tests only.
    pub last_error_kind: Option<ApiErrorKind>,
    /// Sequence number of the most recently issued query.
    seq: u64,
}

impl ViewState {
    /// Start a new query cycle. Returns the ticket its completion must
    /// present to [`ViewState::apply`]. Any stale error display is
    /// cleared immediately.
    pub fn begin(&mut self, query: Query) -> u64 {
        self.seq += 1;
        self.phase = Phase::Loading;
        self.query = Some(query);
        self.error = None;
        self.seq
    }

    /// Finish the cycle for `ticket`. A completion for anything but
    /// the latest issued query is discarded silently, so overlapping
    /// fetches can never show a superseded result.
    pub fn apply(
        &mut self,
        ticket: u64,
        outcome: Result<(CurrentConditions, Forecast), ApiError>,
    ) {
        if ticket != self.seq {
            tracing::debug!(ticket, latest = self.seq, "discarding stale fetch result");
            return;
        }

        match outcome {
            Ok((conditions, forecast)) => {
                self.phase = Phase::Success;
                self.conditions = Some(conditions);
                self.forecast = Some(forecast);
                self.error = None;
                self.last_error_kind = None;
            }
            Err(err) => {
                self.last_error_kind = Some(err.kind());
                tracing::warn!(
                    query = ?self.query,
                    kind = ?self.last_error_kind,
                    error = %err,
                    "fetch failed"
                );
                self.phase = Phase::Error;
                self.conditions = None;
                self.forecast = None;
                self.error = Some(FETCH_ERROR_MESSAGE);
            }
        }
    }
}

/// Run one search cycle for `city`. Whitespace-only input is a no-op:
/// no fetch is issued and the displayed state is left unchanged.
pub async fn search(state: &mut ViewState, provider: &dyn WeatherProvider, city: &str) {
    let city = city.trim();
    if city.is_empty() {
        return;
    }

    let ticket = state.begin(Query::City(city.to_string()));
    let outcome = fetch_city(provider, city).await;
    state.apply(ticket, outcome);
}

/// Run one geolocation cycle. Conditions come from the resolved
/// position; the forecast still uses the typed city (see DESIGN.md).
/// A failed position lookup surfaces exactly like a failed fetch.
pub async fn locate(
    state: &mut ViewState,
    provider: &dyn WeatherProvider,
    typed_city: &str,
    position: Result<Coordinates, ApiError>,
) {
    match position {
        Ok(position) => {
            let ticket = state.begin(Query::Coordinates {
                lat: position.lat,
                lon: position.lon,
            });
            let outcome = fetch_at_position(provider, position, typed_city).await;
            state.apply(ticket, outcome);
        }
        Err(err) => {
            let ticket = state.begin(Query::City(typed_city.to_string()));
            state.apply(ticket, Err(err));
        }
    }
}

/// Both halves of a city query, sequentially: the forecast is not
/// requested when the current-conditions call already failed. Partial
/// success is not success.
async fn fetch_city(
    provider: &dyn WeatherProvider,
    city: &str,
) -> Result<(CurrentConditions, Forecast), ApiError> {
    let conditions = provider.current_by_city(city).await?;
    let forecast = provider.forecast_by_city(city).await?;
    Ok((conditions, forecast))
}

async fn fetch_at_position(
    provider: &dyn WeatherProvider,
    position: Coordinates,
    typed_city: &str,
) -> Result<(CurrentConditions, Forecast), ApiError> {
    let conditions = provider
        .current_by_coordinates(position.lat, position.lon)
        .await?;
    let forecast = provider.forecast_by_city(typed_city).await?;
    Ok((conditions, forecast))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Locate,
    Quit,
}

impl Action {
    const fn all() -> &'static [Action] {
        &[Action::Search, Action::Locate, Action::Quit]
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Action::Search => "Search for a city",
            Action::Locate => "Use my location",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// The interactive view: one full cycle for the startup city, then a
/// prompt loop until the user quits.
pub async fn run(provider: &dyn WeatherProvider, initial_city: &str) -> anyhow::Result<()> {
    let mut state = ViewState::default();
    let mut typed_city = initial_city.to_string();

    println!("{}", render::LOADING);
    search(&mut state, provider, &typed_city).await;
    println!("{}", render::view(&state));

    loop {
        let action = match inquire::Select::new("skycast", Action::all().to_vec()).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match action {
            Action::Search => {
                let input = match inquire::Text::new("City:")
                    .with_initial_value(&typed_city)
                    .prompt()
                {
                    Ok(input) => input,
                    Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };

                if input.trim().is_empty() {
                    continue;
                }

                typed_city = input.trim().to_string();
                println!("{}", render::LOADING);
                search(&mut state, provider, &typed_city).await;
            }
            Action::Locate => {
                println!("{}", render::LOADING);
                let position = location::current_position().await;
                locate(&mut state, provider, &typed_city, position).await;
            }
            Action::Quit => break,
        }

        println!("{}", render::view(&state));
    }

    Ok(())
}
