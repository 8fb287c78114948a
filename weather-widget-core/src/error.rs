use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single HTTP round-trip.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Error while making request: {0}")]
    Request(#[source] reqwest::Error),

    /// Carries the status line, e.g. `404 Not Found`.
    #[error("Response was not 200 OK, got: {0}")]
    Status(String),

    #[error("Response body was empty.")]
    Body(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load .env file: {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("path to .env file not given")]
    MissingPath,

    #[error("{0} is not set in the .env file")]
    MissingKey(&'static str),

    #[error("Invalid {key} '{value}': {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Could not determine platform config directory")]
    NoConfigDir,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No valid locations found!")]
    NoLocations,

    #[error("Location must not be empty")]
    EmptyLocation,

    #[error("Failed to build request URL: {0}")]
    Url(#[from] url::ParseError),
}
