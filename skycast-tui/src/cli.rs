use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode, Select, Text};
use skycast_core::{
    Config, GeolocationMode,
    geo::{self, BigDataCloudGeocoder},
    provider_from_config,
    view::ViewState,
};
use tracing::info;

use crate::{logging, runtime};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// City to show on startup (defaults to `default_city` from the config file).
    #[arg(long, short, global = true)]
    pub city: Option<String>,

    /// Write logs here instead of the platform data directory.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key, default city and location lookup mode.
    Configure,

    /// Open the weather view (same as running without a subcommand).
    Show {
        /// City to show; overrides --city.
        #[arg(value_name = "CITY")]
        query: Option<String>,
    },
}

impl Cli {
    /// Every route except `configure` leads to the weather view.
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { query }) => show(query.or(self.city), self.log_file).await,
            None => show(self.city, self.log_file).await,
        }
    }
}

async fn show(city: Option<String>, log_file: Option<PathBuf>) -> anyhow::Result<()> {
    let log_path = logging::init(log_file)?;
    let config = Config::load()?;

    // Fail before taking over the terminal.
    let provider = provider_from_config(&config)?;

    let services = runtime::Services {
        provider,
        locator: geo::geolocator_from_config(&config),
        geocoder: Arc::new(BigDataCloudGeocoder::new()),
    };

    let city = city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| config.default_city.clone());

    info!(
        %city,
        fallback = %config.fallback_city,
        geolocation = %config.geolocation.mode,
        log = %log_path.display(),
        "starting weather view"
    );

    let state = ViewState::new(city, config.fallback_city.clone());
    runtime::run(state, services).await
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Leave empty to rely on the WEATHER_API_KEY environment variable")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(key);

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    if !city.trim().is_empty() {
        config.default_city = city.trim().to_string();
    }

    let fallback = Text::new("Fallback city when location lookup fails:")
        .with_default(&config.fallback_city)
        .prompt()
        .context("Failed to read fallback city")?;
    if !fallback.trim().is_empty() {
        config.fallback_city = fallback.trim().to_string();
    }

    let mode = Select::new("Location lookup:", GeolocationMode::all().to_vec())
        .prompt()
        .context("Failed to read location lookup mode")?;
    config.geolocation.mode = mode;

    if mode == GeolocationMode::Fixed {
        let latitude = CustomType::<f64>::new("Latitude:")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .prompt()
            .context("Failed to read longitude")?;
        config.geolocation.latitude = Some(latitude);
        config.geolocation.longitude = Some(longitude);
    }

    config.save_to(&path)?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
