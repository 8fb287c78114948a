//! Text rendering of a weather snapshot.

use std::fmt;

use crate::model::OneCallResponse;

pub const INVALID_MODE: &str = "Error: Invalid Mode";

/// Output style selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Small,
    Full,
    Forecast,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Small => "small",
            Mode::Full => "full",
            Mode::Forecast => "forecast",
        }
    }

    pub const fn all() -> &'static [Mode] {
        &[Mode::Small, Mode::Full, Mode::Forecast]
    }

    /// Exact, case-sensitive match; unknown modes are `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.as_str() == value)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `weather` for `location_name` in the style named by `mode`.
///
/// Unknown modes render as [`INVALID_MODE`].
pub fn render(mode: &str, location_name: &str, weather: &OneCallResponse) -> String {
    match Mode::parse(mode) {
        Some(Mode::Small) => small(location_name, weather),
        Some(Mode::Full) => full(location_name, weather),
        Some(Mode::Forecast) => forecast(location_name, weather),
        None => INVALID_MODE.to_string(),
    }
}

/// `London: 15.3°C clear sky`
fn small(name: &str, weather: &OneCallResponse) -> String {
    let current = &weather.current;
    let condition = current.primary_condition();

    format!(
        "{name}: {}°C {}",
        temperature(current.temp),
        condition.description
    )
}

// "hpa" on humidity is kept as printed by earlier releases even though the value is a percentage.
fn full(name: &str, weather: &OneCallResponse) -> String {
    let current = &weather.current;
    let condition = current.primary_condition();

    format!(
        "{name}: \n\t{}, {}\n\tTemperature: {} °C\n\tHumidity: {} hpa\n\tPressure: {}\n\tWind: {:.6} m/s from {}",
        condition.main,
        condition.description,
        temperature(current.temp),
        current.humidity,
        current.pressure,
        current.wind_speed,
        current.wind_deg,
    )
}

// TODO: render `weather.hourly` once a forecast layout is agreed on.
fn forecast(_name: &str, _weather: &OneCallResponse) -> String {
    String::new()
}

/// Shortest representation that round-trips, so `21.0` prints as `21`.
fn temperature(value: f64) -> String {
    format!("{value}")
}
