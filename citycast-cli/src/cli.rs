use anyhow::Context;
use clap::{Parser, Subcommand};
use citycast_core::{Config, WeatherApp};

use crate::ui::{self, TerminalView};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather by city name")]
pub struct Cli {
    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for cities until you quit; recent searches can be picked from the menu.
    Interactive,

    /// Show current weather for a city.
    Show {
        /// City name; several words are joined, e.g. `show new york`.
        city: Vec<String>,
    },

    /// List recent searches, newest first.
    Recent,

    /// Print the config file location and the effective settings.
    Config {
        /// Write a config file with the defaults if none exists yet.
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => {
                let app = start_app(&config)?;
                ui::run_interactive(&app).await?;
            }
            Command::Show { city } => {
                let app = start_app_quiet(&config)?;
                app.search(&city.join(" ")).await;
            }
            Command::Recent => {
                start_app(&config)?;
            }
            Command::Config { init } => show_config(&config, init)?,
        }

        Ok(())
    }
}

fn start_app(config: &Config) -> anyhow::Result<WeatherApp> {
    WeatherApp::from_config(config, Box::new(TerminalView::new())).context("Failed to start")
}

/// Skips printing the restored list; it is printed once the search updates it.
fn start_app_quiet(config: &Config) -> anyhow::Result<WeatherApp> {
    WeatherApp::from_config(config, Box::new(TerminalView::without_startup_list()))
        .context("Failed to start")
}

fn show_config(config: &Config, init: bool) -> anyhow::Result<()> {
    let path = Config::config_file_path()?;

    if init && !path.exists() {
        config.save()?;
        println!("Wrote default config to {}", path.display());
    }

    println!("config file:   {}", path.display());
    println!("geocoding url: {}", config.geocoding_url);
    println!("forecast url:  {}", config.forecast_url);
    println!("data dir:      {}", config.resolved_data_dir()?.display());

    Ok(())
}
