use std::path::PathBuf;

use clap::Parser;
use weather_widget_core::{
    EnvFile, HttpTransport, Settings, WeatherClient,
    config::{self, ENV_SENTINEL},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-widget",
    version,
    about = "Current weather for a location, as a one-line or full text summary"
)]
pub struct Cli {
    /// Output style: "small", "full" or "forecast".
    pub mode: String,

    /// "City,StateCode,CountryCode", or ".env" to read LOCATION from the config file.
    pub location: String,

    /// Path to the .env file providing API_KEY (and LOCATION).
    pub config: Option<PathBuf>,

    /// Log requests and resolved locations to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Produce the text to print on stdout.
    pub async fn run(self) -> anyhow::Result<String> {
        // The API key is needed for every mode, so configuration is resolved first.
        let env_file = EnvFile::resolve(self.config.as_deref())?;
        let settings = Settings::from_env_file(env_file.as_ref())?;

        let location = config::resolve_location(&self.location, env_file.as_ref())?;
        if self.location == ENV_SENTINEL {
            tracing::debug!(%location, "location taken from env file");
        }

        let client = WeatherClient::new(settings, HttpTransport::new());
        let text = client.weather_text(&self.mode, &location).await?;

        Ok(text)
    }
}
