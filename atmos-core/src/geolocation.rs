//! Device location behind a narrow async capability.
//!
//! A terminal has no location sensor, so the "platform" lookup is an IP-based
//! geolocation service. Users can also pin a position, or geolocation can be
//! switched off entirely.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, instrument, warn};

use crate::{Config, error::LocationError, model::Coordinates};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves the current position exactly once per call.
#[async_trait]
pub trait PositionProvider: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position lookup via an ip-api compatible JSON endpoint.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Result<Self, LocationError> {
        let http = Client::builder().timeout(LOOKUP_TIMEOUT).build().map_err(|e| {
            warn!("Failed to create geolocation client: {}", e);
            LocationError::Unsupported
        })?;

        Ok(Self { url: url.into(), http })
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl PositionProvider for IpGeolocator {
    #[instrument(skip(self))]
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let response = self.http.get(&self.url).send().await.map_err(|e| {
            debug!("Geolocation request failed: {}", e);
            LocationError::PermissionOrTimeout(if e.is_timeout() {
                "location lookup timed out".to_string()
            } else {
                "location service unreachable".to_string()
            })
        })?;

        if !response.status().is_success() {
            debug!("Geolocation returned status {}", response.status());
            return Err(LocationError::PermissionOrTimeout(format!(
                "location service returned {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response.json().await.map_err(|e| {
            debug!("Geolocation parse error: {}", e);
            LocationError::PermissionOrTimeout("unreadable location response".to_string())
        })?;

        if body.status != "success" {
            let reason = body.message.unwrap_or_else(|| "lookup refused".to_string());
            return Err(LocationError::PermissionOrTimeout(reason));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => {
                debug!(lat, lon, "resolved position");
                Ok(Coordinates { lat, lon })
            }
            _ => Err(LocationError::PermissionOrTimeout("no coordinates in response".to_string())),
        }
    }
}

/// A position supplied by the user.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Geolocation disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl PositionProvider for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// The configured position provider; [`NoGeolocation`] when lookups are off.
pub fn position_provider_from_config(config: &Config) -> Box<dyn PositionProvider> {
    match config.geolocation_url.as_deref() {
        Some(url) => match IpGeolocator::new(url) {
            Ok(geo) => Box::new(geo),
            Err(_) => Box::new(NoGeolocation),
        },
        None => Box::new(NoGeolocation),
    }
}
