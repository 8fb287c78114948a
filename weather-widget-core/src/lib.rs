//! Core library for the `weather-widget` CLI.
//!
//! This crate defines:
//! - `.env` configuration and endpoint settings
//! - An HTTP transport abstraction
//! - OpenWeather geocoding and One Call models
//! - The weather client and its text formats
//!
//! It is used by `weather-widget-cli`, but can also be reused by other binaries.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod transport;

pub use client::WeatherClient;
pub use config::{EnvFile, Settings};
pub use error::{ConfigError, TransportError, WeatherError};
pub use format::Mode;
pub use model::{GeocodeCandidate, OneCallResponse};
pub use transport::{HttpTransport, Transport};
