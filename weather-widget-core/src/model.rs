use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One match returned by the direct geocoding endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeCandidate {
    pub name: String,
    /// Language code -> localized name, e.g. `"de" -> "London"`.
    pub local_names: Option<HashMap<String, String>>,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    pub state: Option<String>,
}

/// Response of the One Call endpoint with `minutely`, `daily` and `alerts` excluded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneCallResponse {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub timezone_offset: i64,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyConditions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: i64,
    pub humidity: i64,
    pub dew_point: f64,
    pub uvi: f64,
    pub clouds: i64,
    pub visibility: i64,
    pub wind_speed: f64,
    pub wind_deg: i64,
    pub wind_gust: f64,
    pub weather: Vec<Condition>,
}

impl CurrentConditions {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.dt, 0)
    }

    /// First condition entry, or an empty one when the upstream sent none.
    pub fn primary_condition(&self) -> Condition {
        self.weather.first().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snow {
    #[serde(rename = "1h")]
    pub one_hour: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyConditions {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: i64,
    pub humidity: i64,
    pub dew_point: f64,
    pub uvi: f64,
    pub clouds: i64,
    pub visibility: i64,
    pub wind_speed: f64,
    pub wind_deg: i64,
    pub wind_gust: f64,
    pub weather: Vec<Condition>,
    /// Probability of precipitation, 0.0..=1.0.
    pub pop: f64,
    pub snow: Option<Snow>,
}
