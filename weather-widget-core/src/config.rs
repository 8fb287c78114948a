use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use url::Url;

use crate::error::ConfigError;

pub const API_KEY: &str = "API_KEY";
pub const LOCATION: &str = "LOCATION";
pub const GEOCODE_URL: &str = "GEOCODE_URL";
pub const ONECALL_URL: &str = "ONECALL_URL";

pub const DEFAULT_GEOCODE_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_ONECALL_URL: &str = "https://api.openweathermap.org/data/2.5/onecall";

/// Name of the location argument that means "read `LOCATION` from the env file".
pub const ENV_SENTINEL: &str = ".env";

/// Key/value pairs read from a `.env` style file.
///
/// The process environment is left untouched; values are only looked up here.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let to_err = |source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        };

        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(to_err)? {
            let (key, value) = item.map_err(to_err)?;
            vars.insert(key, value);
        }

        tracing::debug!(path = %path.display(), keys = vars.len(), "loaded env file");

        Ok(Self { vars })
    }

    /// Load the explicitly given file, or the per-user default one if it exists.
    ///
    /// Returns `None` when no path was given and there is no default file.
    pub fn resolve(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }

        match Self::default_path() {
            Ok(path) if path.exists() => Self::load(&path).map(Some),
            Ok(_) => Ok(None),
            Err(err) => {
                tracing::debug!(error = %err, "skipping default env file");
                Ok(None)
            }
        }
    }

    /// `<config dir>/weather.env`, e.g. `~/.config/weather-widget/weather.env` on Linux.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-widget")
            .ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("weather.env"))
    }

    /// Non-empty value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, key: &'static str) -> Result<&str, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingKey(key))
    }

    #[cfg(test)]
    pub(crate) fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Everything the weather client needs to talk to OpenWeather.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub geocode_url: Url,
    pub onecall_url: Url,
}

impl Settings {
    /// Settings with the default OpenWeather endpoints.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: api_key.into(),
            geocode_url: parse_url(GEOCODE_URL, DEFAULT_GEOCODE_URL)?,
            onecall_url: parse_url(ONECALL_URL, DEFAULT_ONECALL_URL)?,
        })
    }

    /// Build settings from an optional env file.
    ///
    /// `API_KEY` falls back to the process environment when the file does not set it.
    pub fn from_env_file(file: Option<&EnvFile>) -> Result<Self, ConfigError> {
        Self::from_env_file_with(file, |key| std::env::var(key).ok())
    }

    /// Like [`Settings::from_env_file`], with `fallback` looking up `API_KEY` when the file lacks it.
    pub fn from_env_file_with<F>(file: Option<&EnvFile>, fallback: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_file = |key: &str| file.and_then(|f| f.get(key)).map(str::to_owned);

        let api_key = from_file(API_KEY)
            .or_else(|| fallback(API_KEY).filter(|v| !v.is_empty()))
            .ok_or(ConfigError::MissingKey(API_KEY))?;

        let mut settings = Self::new(api_key)?;

        if let Some(raw) = from_file(GEOCODE_URL) {
            settings.geocode_url = parse_url(GEOCODE_URL, &raw)?;
        }
        if let Some(raw) = from_file(ONECALL_URL) {
            settings.onecall_url = parse_url(ONECALL_URL, &raw)?;
        }

        Ok(settings)
    }
}

/// Resolve the location argument, reading `LOCATION` from the env file for the `.env` sentinel.
pub fn resolve_location(arg: &str, file: Option<&EnvFile>) -> Result<String, ConfigError> {
    if arg != ENV_SENTINEL {
        return Ok(arg.to_string());
    }

    let file = file.ok_or(ConfigError::MissingPath)?;
    file.require(LOCATION).map(str::to_owned)
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        key,
        value: raw.to_string(),
        source,
    })
}
