use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weatherdash_core::{
    Config, DashboardView, FetchDisposition, FetchStatus, WeatherStore, provider_from_config,
};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and forecast for a city.
    Show {
        /// City name, e.g. "Karachi".
        city: String,

        /// Print the dashboard as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Interactive dashboard with session favorites.
    Dashboard {
        /// Start with this city in favorites; may be repeated.
        #[arg(long = "favorite", value_name = "CITY")]
        favorites: Vec<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(&city, json).await,
            Command::Dashboard { favorites } => {
                let config = Config::load()?;
                let store = WeatherStore::new(provider_from_config(&config)?)
                    .with_favorites(favorites);
                session::run(store).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    // File contents only; an environment key must never reach disk.
    let mut config = Config::load_from(&Config::config_file_path()?)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(city: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let store = WeatherStore::new(provider_from_config(&config)?);

    if store.fetch_weather(city).await == FetchDisposition::Skipped {
        bail!("City name must not be empty");
    }

    let state = store.snapshot();
    if state.status == FetchStatus::Failed {
        bail!("{}", state.error.as_deref().unwrap_or("Unknown error"));
    }

    let report = state
        .report()
        .context("Fetch finished without weather data")?;
    let view = DashboardView::from_report(&report);

    if json {
        let out = serde_json::to_string_pretty(&view).context("Failed to serialize dashboard")?;
        println!("{out}");
    } else {
        print!("{}", render::dashboard(&view));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_json() {
        let cli = Cli::try_parse_from(["weatherdash", "show", "Lahore", "--json"]).unwrap();
        match cli.command {
            Command::Show { city, json } => {
                assert_eq!(city, "Lahore");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_repeated_favorites() {
        let cli = Cli::try_parse_from([
            "weatherdash",
            "dashboard",
            "--favorite",
            "Lahore",
            "--favorite",
            "Karachi",
        ])
        .unwrap();
        match cli.command {
            Command::Dashboard { favorites } => assert_eq!(favorites, ["Lahore", "Karachi"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_city() {
        assert!(Cli::try_parse_from(["weatherdash", "show"]).is_err());
    }
}
