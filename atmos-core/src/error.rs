use thiserror::Error;

/// Failures from the device-location capability.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Geolocation is not supported on this system")]
    Unsupported,
    #[error("Unable to retrieve your location: {0}")]
    PermissionOrTimeout(String),
}

/// Everything the fetch path can fail with.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Missing API key. Set {0} in your environment.")]
    Configuration(&'static str),
    #[error("{0}")]
    NotFound(String),
    #[error("Weather provider returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response from weather provider: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Location(#[from] LocationError),
}

impl WeatherError {
    /// The single message shown to the user for this failure.
    ///
    /// Upstream messages are passed through as the provider wrote them, the
    /// rest use their display form.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Upstream { message, .. } => message.clone(),
            WeatherError::Network(err) if err.is_timeout() => {
                "The weather service did not respond in time".to_string()
            }
            WeatherError::Network(_) => "Could not reach the weather service".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::NotFound(_))
    }
}
