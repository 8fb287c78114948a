//! Binary crate for the `weather-widget` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Printing the result and choosing the exit code

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = match cli::Cli::try_parse() {
        Ok(cmd) => cmd,
        Err(err) => {
            // --help and --version also land here and are not failures.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cmd.verbose);

    let outcome = Outcome::from(cmd.run().await);
    if let Some(text) = &outcome.stdout {
        println!("{text}");
    }
    if let Some(message) = &outcome.stderr {
        eprintln!("{message}");
    }
    outcome.code
}

/// What the process prints and how it exits for a finished run.
#[derive(Debug)]
struct Outcome {
    code: ExitCode,
    stdout: Option<String>,
    stderr: Option<String>,
}

impl From<anyhow::Result<String>> for Outcome {
    fn from(result: anyhow::Result<String>) -> Self {
        match result {
            Ok(text) => Self {
                code: ExitCode::SUCCESS,
                stdout: Some(text),
                stderr: None,
            },
            Err(err) => Self {
                code: ExitCode::FAILURE,
                stdout: None,
                stderr: Some(err.to_string()),
            },
        }
    }
}

/// Logs go to stderr; stdout carries only the weather text.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_widget_core::WeatherError;

    #[test]
    fn success_prints_text_and_exits_zero() {
        let outcome = Outcome::from(Ok("London: 15.3°C clear sky".to_string()));

        assert_eq!(outcome.code, ExitCode::SUCCESS);
        assert_eq!(outcome.stdout.as_deref(), Some("London: 15.3°C clear sky"));
        assert!(outcome.stderr.is_none());
    }

    #[test]
    fn invalid_mode_and_empty_forecast_are_successes() {
        for text in ["Error: Invalid Mode", ""] {
            let outcome = Outcome::from(Ok(text.to_string()));
            assert_eq!(outcome.code, ExitCode::SUCCESS);
            assert_eq!(outcome.stdout.as_deref(), Some(text));
        }
    }

    #[test]
    fn error_exits_one_with_nothing_on_stdout() {
        let outcome = Outcome::from(Err(anyhow::Error::from(WeatherError::NoLocations)));

        assert_eq!(outcome.code, ExitCode::FAILURE);
        assert!(outcome.stdout.is_none());
        assert_eq!(outcome.stderr.as_deref(), Some("No valid locations found!"));
    }
}
