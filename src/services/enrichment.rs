use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use super::{
    knowledge_base, places_service::PlacesService, weather_service::WeatherService,
    wikipedia_service::WikipediaService,
};
use crate::models::preferences::TravelPreferences;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("{0} not set")]
    MissingConfig(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// Context gathered for one request to make the prompt more specific.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentBundle {
    pub weather_forecast: Option<Value>,
    pub places: Option<BTreeMap<String, Value>>,
    pub summary: Option<String>,
    pub cultural_notes: Vec<String>,
    pub heritage_sites: Vec<String>,
}

/// Gathers enrichment. Implementations must not fail: a source that errors
/// leaves its field empty.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    async fn gather(&self, preferences: &TravelPreferences) -> EnrichmentBundle;
}

/// Live sources. A source whose configuration is missing is skipped entirely.
pub struct TravelDataEnricher {
    weather: Option<WeatherService>,
    places: Option<PlacesService>,
    wikipedia: Option<WikipediaService>,
}

impl TravelDataEnricher {
    pub fn new(
        weather: Option<WeatherService>,
        places: Option<PlacesService>,
        wikipedia: Option<WikipediaService>,
    ) -> Self {
        Self {
            weather,
            places,
            wikipedia,
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            available("WeatherService", WeatherService::new()),
            available("PlacesService", PlacesService::new()),
            available("WikipediaService", WikipediaService::new()),
        )
    }
}

fn available<T>(name: &str, service: Result<T, EnrichmentError>) -> Option<T> {
    match service {
        Ok(service) => {
            log::info!("{} initialized", name);
            Some(service)
        }
        Err(e) => {
            log::warn!("{} not available: {}. Prompts will go without it.", name, e);
            None
        }
    }
}

#[async_trait]
impl EnrichmentProvider for TravelDataEnricher {
    async fn gather(&self, preferences: &TravelPreferences) -> EnrichmentBundle {
        let destination = preferences.destination.as_str();

        let weather_forecast = match &self.weather {
            Some(weather) => weather.forecast(destination).await.unwrap_or_else(|e| {
                log::warn!("Error fetching weather for {}: {}", destination, e);
                None
            }),
            None => None,
        };

        let places = match &self.places {
            Some(places) => {
                let found = places.search_destination(destination).await;
                (!found.is_empty()).then_some(found)
            }
            None => None,
        };

        let summary = match &self.wikipedia {
            Some(wikipedia) => match wikipedia.summary(destination).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    log::warn!("Error fetching Wikipedia data for {}: {}", destination, e);
                    None
                }
            },
            None => None,
        };

        EnrichmentBundle {
            weather_forecast,
            places,
            summary,
            cultural_notes: knowledge_base::cultural_insights(destination),
            heritage_sites: knowledge_base::heritage_sites(destination),
        }
    }
}
