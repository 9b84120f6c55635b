use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use dashboard_core::{
    Config, Credential, CredentialStore, DashboardController, LocalCredentialStore, LocalStorage,
    OpenWeatherClient,
};
use inquire::{Password, PasswordDisplayMode, Text, validator::Validation};

use crate::{render, toast::ConsoleNotifier};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-dashboard",
    version,
    about = "Current weather and 5-day forecast for any city"
)]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save the OpenWeatherMap API key.
    Configure,

    /// Print the dashboard once.
    Show {
        /// City to search for; the configured default city is shown if absent.
        city: Option<String>,
    },

    /// Search cities interactively (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let config = Config::load_from(&config_path)?;
        tracing::debug!(
            base_url = %config.base_url,
            default_city = %config.default_city,
            "Configuration loaded"
        );

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(&config, &config_path),
            Command::Show { city } => show(config, city).await,
            Command::Interactive => interactive(config).await,
        }
    }
}

/// Save the API key, and write out the current settings if there is no config file yet.
fn configure(config: &Config, config_path: &Path) -> Result<()> {
    let storage_path = config.storage_file_path()?;
    let store = LocalCredentialStore::new(LocalStorage::new(&storage_path));

    let Some(raw) = prompt_api_key()? else {
        println!("Cancelled; API key unchanged.");
        return Ok(());
    };

    store.save(&Credential::new(raw)?)?;
    println!("API key saved in plain text to {}", storage_path.display());

    if !config_path.exists() {
        config.save_to(config_path)?;
        println!("Default settings written to {}", config_path.display());
    }
    Ok(())
}

async fn show(config: Config, city: Option<String>) -> Result<()> {
    let mut dash = build_controller(config)?;
    dash.start().await?;
    handle_credential_request(&mut dash).await?;

    if let Some(city) = city {
        dash.search(&city).await;
    }

    print!("{}", render::dashboard(&dash.view()));
    Ok(())
}

async fn interactive(config: Config) -> Result<()> {
    let mut dash = build_controller(config)?;
    dash.start().await?;

    loop {
        handle_credential_request(&mut dash).await?;
        println!();
        print!("{}", render::dashboard(&dash.view()));
        println!();

        let input = Text::new("Search for a city:")
            .with_help_message(":key to change the API key, :quit or empty line to exit")
            .prompt_skippable()?;

        match input.as_deref().map(str::trim) {
            None | Some("" | ":quit" | ":q") => break,
            Some(":key") => dash.request_credential(),
            Some(city) => dash.search(city).await,
        }
    }

    Ok(())
}

fn build_controller(config: Config) -> Result<DashboardController> {
    let storage = LocalStorage::new(config.storage_file_path()?);

    Ok(DashboardController::new(
        Box::new(OpenWeatherClient::from_config(&config)),
        Box::new(LocalCredentialStore::new(storage)),
        Arc::new(ConsoleNotifier),
        config,
    ))
}

/// Show the key dialog if the controller asked for it.
async fn handle_credential_request(dash: &mut DashboardController) -> Result<()> {
    if !dash.view().credential_requested {
        return Ok(());
    }

    match prompt_api_key()? {
        Some(raw) => dash.submit_credential(&raw).await,
        None => {
            dash.dismiss_credential_request();
            Ok(())
        }
    }
}

const API_KEY_HELP: &str =
    "Stored in plain text on this machine. Get a free key at https://openweathermap.org/api";

fn prompt_api_key() -> Result<Option<String>> {
    let answer = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(API_KEY_HELP)
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("API key must not be empty".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt_skippable()?;

    Ok(answer)
}
