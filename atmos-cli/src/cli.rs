use anyhow::anyhow;
use atmos_core::{
    Config, Coordinates, Preferences, Query, Scene, Theme, WeatherError, WeatherReport,
    fetch_report, fetcher_from_config,
    geolocation::{FixedPosition, PositionProvider},
    icons, position_provider_from_config,
};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::Select;
use std::{io::IsTerminal, path::Path};
use tracing::{debug, warn};

use crate::render::{self, Palette};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "atmos", version, about = "Current conditions and a 5-day outlook")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city or your current location.
    ///
    /// Without a city or location flag the last searched city is used, or
    /// your current location if nothing was searched yet.
    Show {
        /// City name, e.g. `atmos show new york`.
        city: Vec<String>,

        /// Use your current location.
        #[arg(long, conflicts_with_all = ["city", "lat", "lon"])]
        here: bool,

        /// Latitude of a fixed position.
        #[arg(long, requires = "lon", allow_negative_numbers = true, conflicts_with = "city")]
        lat: Option<f64>,

        /// Longitude of a fixed position.
        #[arg(long, requires = "lat", allow_negative_numbers = true, conflicts_with = "city")]
        lon: Option<f64>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Set the color theme. Prompts when no choice is given.
    Theme {
        choice: Option<ThemeChoice>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

/// Where the user asked to look.
#[derive(Debug, Clone, PartialEq)]
enum Target {
    City(String),
    Here,
    Fixed(Coordinates),
}

impl Target {
    fn resolve(
        city: &[String],
        here: bool,
        lat: Option<f64>,
        lon: Option<f64>,
        prefs: &Preferences,
    ) -> Self {
        if let (Some(lat), Some(lon)) = (lat, lon) {
            return Target::Fixed(Coordinates { lat, lon });
        }
        if here {
            return Target::Here;
        }

        let city = city.join(" ");
        if !city.trim().is_empty() {
            return Target::City(city.trim().to_string());
        }

        match prefs.last_city.as_deref() {
            Some(last) => Target::City(last.to_string()),
            None => Target::Here,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, here, lat, lon, json } => {
                let prefs = load_preferences();
                let target = Target::resolve(&city, here, lat, lon, &prefs);

                let report = search(&Config::from_env(), &target)
                    .await
                    .map_err(|e| anyhow!(e.user_message()))?;

                let remembered = Preferences::file_path()
                    .and_then(|path| remember_search(&path, &target, &report.current.location.name));
                if let Err(e) = remembered {
                    warn!("Could not save preferences: {e:#}");
                }

                if json {
                    println!("{}", serde_json::to_string_pretty(&report_json(&report)?)?);
                } else {
                    let palette = Palette::for_theme(prefs.theme, colors_enabled());
                    print!("{}", render::report(&report, &palette)?);
                }
            }
            Command::Theme { choice } => {
                let mut prefs = Preferences::load()?;

                let theme = match choice {
                    Some(ThemeChoice::Light) => Theme::Light,
                    Some(ThemeChoice::Dark) => Theme::Dark,
                    Some(ThemeChoice::Toggle) => prefs.theme.toggled(),
                    None => {
                        let current = Theme::all().iter().position(|t| *t == prefs.theme);
                        Select::new("Theme:", Theme::all().to_vec())
                            .with_starting_cursor(current.unwrap_or(0))
                            .prompt()?
                    }
                };

                prefs.theme = theme;
                prefs.save()?;
                println!("Theme set to {theme}");
            }
        }

        Ok(())
    }
}

/// One search: resolve the position if needed, then fetch both halves.
///
/// The credential is checked first so a missing key is reported before any
/// location lookup or request.
async fn search(config: &Config, target: &Target) -> Result<WeatherReport, WeatherError> {
    let fetcher = fetcher_from_config(config)?;

    let query = match target {
        Target::City(name) => Query::city(name.as_str()),
        Target::Here => position_provider_from_config(config).current_position().await?.into(),
        Target::Fixed(coords) => FixedPosition(*coords).current_position().await?.into(),
    };
    debug!(%query, "searching");

    fetch_report(fetcher.as_ref(), &query).await
}

/// Store the searched city, or the resolved place name for a location search.
///
/// Goes through the saved file rather than the in-memory preferences, so an
/// unreadable file is reported instead of being replaced with defaults.
fn remember_search(path: &Path, target: &Target, resolved_name: &str) -> anyhow::Result<()> {
    let city = match target {
        Target::City(name) => name.as_str(),
        Target::Here | Target::Fixed(_) => resolved_name,
    };
    Preferences::record_city_at(path, city)
}

/// The report plus the backdrop the text view shows as its banner.
fn report_json(report: &WeatherReport) -> serde_json::Result<serde_json::Value> {
    let sample = &report.current.sample;
    let mut value = serde_json::to_value(report)?;
    value["scene"] = serde_json::to_value(Scene::for_condition(sample.condition))?;
    value["night"] = serde_json::Value::Bool(icons::is_night(&sample.icon));
    Ok(value)
}

fn load_preferences() -> Preferences {
    match Preferences::file_path() {
        Ok(path) => load_preferences_from(&path),
        Err(e) => {
            warn!("Ignoring unreadable preferences: {e:#}");
            Preferences::default()
        }
    }
}

fn load_preferences_from(path: &Path) -> Preferences {
    Preferences::load_from(path).unwrap_or_else(|e| {
        warn!("Ignoring unreadable preferences: {e:#}");
        Preferences::default()
    })
}

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}
