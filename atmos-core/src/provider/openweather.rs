use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    config::{API_KEY_ENV, Config},
    error::WeatherError,
    model::{Condition, CurrentConditions, Forecast, Location, Query, WeatherSample},
};

use super::WeatherFetcher;

const CITY_NOT_FOUND: &str = "City not found";
const LOCATION_FAILED: &str = "Failed to fetch weather for your location";

/// OpenWeather 2.5 REST client (`/weather` and `/forecast`, metric units).
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &Query) -> Result<T, WeatherError> {
        // Checked before anything touches the network.
        let api_key = self.api_key.as_deref().ok_or(WeatherError::Configuration(API_KEY_ENV))?;

        let mut params: Vec<(&str, String)> = match query {
            Query::City(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(WeatherError::NotFound("Please enter a city name".to_string()));
                }
                vec![("q", name.to_string())]
            }
            Query::Coordinates(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
        };
        params.push(("units", "metric".to_string()));
        params.push(("appid", api_key.to_string()));

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(endpoint, %query, "requesting OpenWeather");

        // The request URL carries the API key, keep it out of error messages.
        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::Network(e.without_url()))?;

        if !status.is_success() {
            let err = error_from_response(status, &body, query);
            warn!(endpoint, %status, "OpenWeather request failed");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::InvalidResponse(format!("failed to parse {endpoint} JSON: {e}"))
        })
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current(&self, query: &Query) -> Result<CurrentConditions, WeatherError> {
        let parsed: OwCurrentResponse = self.get("weather", query).await?;

        let location = Location {
            name: parsed.name,
            country: parsed.sys.country,
            timezone_offset: parsed.timezone,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
        };
        let sample =
            to_sample(parsed.dt, parsed.main, parsed.weather, parsed.wind, parsed.visibility, None);

        Ok(CurrentConditions { location, sample })
    }

    #[instrument(skip(self))]
    async fn forecast(&self, query: &Query) -> Result<Forecast, WeatherError> {
        let parsed: OwForecastResponse = self.get("forecast", query).await?;

        let location = Location {
            name: parsed.city.name,
            country: parsed.city.country,
            timezone_offset: parsed.city.timezone,
            sunrise: parsed.city.sunrise,
            sunset: parsed.city.sunset,
        };
        let samples = parsed
            .list
            .into_iter()
            .map(|e| to_sample(e.dt, e.main, e.weather, e.wind, e.visibility, e.pop))
            .collect::<Vec<_>>();

        debug!(samples = samples.len(), "forecast received");

        Ok(Forecast { location, samples })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: Condition,
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    #[serde(default)]
    timezone: i32,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    visibility: Option<u32>,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: Option<String>,
    #[serde(default)]
    timezone: i32,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    visibility: Option<u32>,
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

/// Error body: `{"cod": "404", "message": "city not found"}`. `cod` is a
/// string or a number depending on the endpoint, so it is ignored.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

fn to_sample(
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<u32>,
    pop: Option<f64>,
) -> WeatherSample {
    let (condition, description, icon) = weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description, w.icon))
        .unwrap_or_else(|| (Condition::Unknown, "Unknown".to_string(), String::new()));

    WeatherSample {
        dt,
        temp: main.temp,
        temp_min: main.temp_min,
        temp_max: main.temp_max,
        feels_like: main.feels_like,
        humidity_pct: main.humidity,
        pressure_hpa: main.pressure,
        wind_speed_mps: wind.speed,
        visibility_m: visibility,
        condition,
        description,
        icon,
        pop,
    }
}

fn error_from_response(status: StatusCode, body: &str, query: &Query) -> WeatherError {
    let message = serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback_message(query).to_string());

    match query {
        Query::City(_) if status == StatusCode::NOT_FOUND => WeatherError::NotFound(message),
        _ => WeatherError::Upstream { status: status.as_u16(), message },
    }
}

/// Shown when the provider gives no message of its own.
fn fallback_message(query: &Query) -> &'static str {
    match query {
        Query::City(_) => CITY_NOT_FOUND,
        Query::Coordinates(_) => LOCATION_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    #[test]
    fn city_404_is_not_found_with_provider_message() {
        let err = error_from_response(
            StatusCode::NOT_FOUND,
            r#"{"cod":"404","message":"city not found"}"#,
            &Query::city("Atlantis"),
        );
        assert!(matches!(err, WeatherError::NotFound(ref m) if m == "city not found"));
    }

    #[test]
    fn city_404_without_body_uses_fallback() {
        let err = error_from_response(StatusCode::NOT_FOUND, "", &Query::city("Atlantis"));
        assert!(matches!(err, WeatherError::NotFound(ref m) if m == CITY_NOT_FOUND));
    }

    #[test]
    fn coordinate_404_is_upstream() {
        let query = Query::Coordinates(Coordinates { lat: 0.0, lon: 0.0 });
        let err = error_from_response(StatusCode::NOT_FOUND, r#"{"cod":404,"message":"nothing"}"#, &query);
        assert!(matches!(err, WeatherError::Upstream { status: 404, ref message } if message == "nothing"));
    }

    #[test]
    fn city_error_without_message_uses_city_fallback() {
        let body = "<html>bad gateway</html>";
        let err = error_from_response(StatusCode::BAD_GATEWAY, body, &Query::city("Oslo"));
        assert!(
            matches!(err, WeatherError::Upstream { status: 502, ref message } if message == CITY_NOT_FOUND)
        );
    }

    #[test]
    fn coordinate_error_without_message_uses_location_fallback() {
        let query = Query::Coordinates(Coordinates { lat: 1.0, lon: 2.0 });
        let err = error_from_response(StatusCode::SERVICE_UNAVAILABLE, "", &query);
        assert_eq!(err.user_message(), "Failed to fetch weather for your location");
    }

    #[test]
    fn blank_provider_message_uses_fallback() {
        let err = error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"cod":"500","message":"  "}"#,
            &Query::city("Oslo"),
        );
        assert_eq!(err.user_message(), CITY_NOT_FOUND);
    }

    #[test]
    fn sample_without_weather_entry_is_unknown() {
        let main = OwMain {
            temp: 1.0,
            feels_like: 0.0,
            temp_min: 0.5,
            temp_max: 1.5,
            pressure: 1000.0,
            humidity: 90,
        };
        let s = to_sample(10, main, Vec::new(), OwWind::default(), None, None);
        assert_eq!(s.condition, Condition::Unknown);
        assert!(s.icon.is_empty());
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        // Unroutable base URL: reaching the network would produce a Network error instead.
        let cfg = Config::default().with_base_url("http://127.0.0.1:1");
        let client = OpenWeatherClient::new(&cfg);

        let err = client.current(&Query::city("Oslo")).await.unwrap_err();
        assert!(matches!(err, WeatherError::Configuration(API_KEY_ENV)));
    }

    #[tokio::test]
    async fn blank_city_is_rejected_before_request() {
        let cfg = Config::default().with_api_key("KEY").with_base_url("http://127.0.0.1:1");
        let client = OpenWeatherClient::new(&cfg);

        let err = client.forecast(&Query::city("   ")).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
