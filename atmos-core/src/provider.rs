use crate::{
    Config,
    error::WeatherError,
    forecast::daily_summaries,
    model::{CurrentConditions, Forecast, Mode, Query, WeatherReport},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::instrument;

pub mod openweather;

/// Result of a single-mode fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Current(CurrentConditions),
    Forecast(Forecast),
}

/// Source of current conditions and forecast feeds.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn current(&self, query: &Query) -> Result<CurrentConditions, WeatherError>;

    async fn forecast(&self, query: &Query) -> Result<Forecast, WeatherError>;

    async fn fetch(&self, query: &Query, mode: Mode) -> Result<Fetched, WeatherError> {
        match mode {
            Mode::Current => self.current(query).await.map(Fetched::Current),
            Mode::Forecast => self.forecast(query).await.map(Fetched::Forecast),
        }
    }
}

/// Construct the OpenWeather fetcher, failing early when no API key is set.
pub fn fetcher_from_config(config: &Config) -> Result<Box<dyn WeatherFetcher>, WeatherError> {
    config.require_api_key()?;
    Ok(Box::new(OpenWeatherClient::new(config)))
}

/// Fetch current conditions and forecast together and aggregate the outlook.
///
/// Both requests run concurrently. If either fails the whole operation fails
/// with that error and nothing else is returned.
#[instrument(skip_all, fields(%query))]
pub async fn fetch_report<F>(fetcher: &F, query: &Query) -> Result<WeatherReport, WeatherError>
where
    F: WeatherFetcher + ?Sized,
{
    let (current, forecast) = tokio::try_join!(fetcher.current(query), fetcher.forecast(query))?;

    let daily = daily_summaries(&forecast.samples, forecast.location.timezone_offset);

    Ok(WeatherReport { current, forecast, daily })
}
