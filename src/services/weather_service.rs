use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::{env, time::Duration};

use super::enrichment::EnrichmentError;

const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

#[derive(Debug, Deserialize)]
struct GeoMatch {
    lat: f64,
    lon: f64,
}

/// OpenWeatherMap forecast lookup for Indian destinations.
pub struct WeatherService {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherService {
    pub fn new() -> Result<Self, EnrichmentError> {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .map_err(|_| EnrichmentError::MissingConfig("OPENWEATHER_API_KEY"))?;
        let base_url =
            env::var("OPENWEATHER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(api_key, base_url)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, EnrichmentError> {
        let http_client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Five-day forecast for the destination, `None` when geocoding finds nothing.
    pub async fn forecast(&self, destination: &str) -> Result<Option<Value>, EnrichmentError> {
        let geo_url = format!("{}/geo/1.0/direct", self.base_url);
        let matches: Vec<GeoMatch> = self
            .http_client
            .get(&geo_url)
            .query(&[
                ("q", format!("{},IN", destination)),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(location) = matches.first() else {
            log::info!("No coordinates found for {}", destination);
            return Ok(None);
        };

        let forecast_url = format!("{}/data/2.5/forecast", self.base_url);
        let forecast: Value = self
            .http_client
            .get(&forecast_url)
            .query(&[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Some(forecast))
    }
}
