//! Core library for the `atmos` weather console.
//!
//! This crate defines:
//! - Configuration and the persisted theme / last-city preferences
//! - The weather-data fetcher and position provider capabilities
//! - Shared domain models and the daily forecast aggregation
//!
//! It is used by `atmos-cli`, but the fetch and aggregation pieces carry no
//! presentation state and can be reused by other front ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod geolocation;
pub mod icons;
pub mod model;
pub mod preferences;
pub mod provider;
pub mod scene;

pub use config::Config;
pub use error::{LocationError, WeatherError};
pub use forecast::daily_summaries;
pub use geolocation::{PositionProvider, position_provider_from_config};
pub use model::{
    Condition, Coordinates, CurrentConditions, DailySummary, Forecast, Location, Mode, Query,
    WeatherReport, WeatherSample,
};
pub use preferences::{Preferences, Theme};
pub use provider::{WeatherFetcher, fetch_report, fetcher_from_config};
pub use scene::Scene;
