use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    config::Settings,
    error::WeatherError,
    format,
    model::{GeocodeCandidate, OneCallResponse},
    transport::Transport,
};

/// Geocodes a location, fetches its weather and renders it as text.
#[derive(Debug)]
pub struct WeatherClient<T: Transport> {
    settings: Settings,
    transport: T,
}

impl<T: Transport> WeatherClient<T> {
    pub fn new(settings: Settings, transport: T) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Resolve `location`, fetch its current weather and format it for `mode`.
    ///
    /// Both requests are made for every mode, so an unknown mode still fails on
    /// transport errors and only afterwards renders as `Error: Invalid Mode`.
    pub async fn weather_text(&self, mode: &str, location: &str) -> Result<String, WeatherError> {
        let place = self.geocode(location).await?;
        let weather = self.fetch_weather(place.lat, place.lon).await?;

        Ok(format::render(mode, &place.name, &weather))
    }

    /// First geocoding match for `location`.
    pub async fn geocode(&self, location: &str) -> Result<GeocodeCandidate, WeatherError> {
        if location.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }

        let url = Url::parse_with_params(
            self.settings.geocode_url.as_str(),
            &[
                ("q", location),
                ("limit", "1"),
                ("appid", self.settings.api_key.as_str()),
            ],
        )?;

        let candidates: Vec<GeocodeCandidate> = self.get_json(&url, "geocode").await?;
        let place = candidates
            .into_iter()
            .next()
            .ok_or(WeatherError::NoLocations)?;

        tracing::debug!(
            name = %place.name,
            country = %place.country,
            lat = place.lat,
            lon = place.lon,
            "resolved location"
        );

        Ok(place)
    }

    /// Current conditions and hourly forecast at the given coordinates, in metric units.
    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<OneCallResponse, WeatherError> {
        let url = Url::parse_with_params(
            self.settings.onecall_url.as_str(),
            &[
                ("lat", lat.to_string().as_str()),
                ("lon", lon.to_string().as_str()),
                ("exclude", "minutely,daily,alerts"),
                ("appid", self.settings.api_key.as_str()),
                ("units", "metric"),
            ],
        )?;

        let weather: OneCallResponse = self.get_json(&url, "onecall").await?;

        if let Some(observed) = weather.current.observed_at() {
            tracing::debug!(%observed, timezone = %weather.timezone, "weather observed");
        }

        Ok(weather)
    }

    /// GET `url` and decode the body, falling back to the default value when it does not parse.
    async fn get_json<D>(&self, url: &Url, what: &str) -> Result<D, WeatherError>
    where
        D: DeserializeOwned + Default,
    {
        tracing::debug!(url = %redact(url), "requesting {what}");

        let body = self.transport.get(url).await?;

        Ok(serde_json::from_slice(&body).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring malformed {what} response");
            D::default()
        }))
    }
}

/// `url` with the `appid` query value masked, for logging.
fn redact(url: &Url) -> Url {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "appid" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked
}
