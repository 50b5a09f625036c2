//! Interactive editing of endpoint and HTTP settings.

use std::path::{Path, PathBuf};

use anyhow::Result;
use inquire::{CustomType, Text, validator::Validation};
use meteo_core::Config;

fn is_http_url(input: &str) -> bool {
    let input = input.trim();
    (input.starts_with("http://") || input.starts_with("https://"))
        && !input.contains(char::is_whitespace)
}

fn prompt_url(message: &str, current: &str) -> Result<String> {
    let url = Text::new(message)
        .with_default(current)
        .with_validator(|input: &str| {
            if is_http_url(input) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Expected an http:// or https:// URL".into()))
            }
        })
        .prompt()?;

    Ok(url.trim().to_string())
}

fn prompt_secs(message: &str, current: u64) -> Result<u64> {
    let secs = CustomType::<u64>::new(message)
        .with_default(current)
        .with_error_message("Please type a whole number of seconds")
        .with_validator(|secs: &u64| {
            if *secs == 0 {
                Ok(Validation::Invalid("Timeout must be at least one second".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()?;

    Ok(secs)
}

/// Prompt for every setting, starting from `config`, and save the result.
///
/// Returns the path the configuration was written to.
pub fn run(mut config: Config, path: Option<&Path>) -> Result<PathBuf> {
    config.endpoints.forecast_url = prompt_url("Forecast endpoint:", &config.endpoints.forecast_url)?;
    config.endpoints.history_url = prompt_url("History endpoint:", &config.endpoints.history_url)?;
    config.http.timeout_secs = prompt_secs("Request timeout (seconds):", config.http.timeout_secs)?;
    config.http.connect_timeout_secs =
        prompt_secs("Connect timeout (seconds):", config.http.connect_timeout_secs)?;

    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::config_file_path()?,
    };
    config.save_to(&path)?;

    Ok(path)
}
