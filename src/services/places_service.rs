use reqwest::Client;
use serde_json::Value;
use std::{collections::BTreeMap, env, time::Duration};

use super::enrichment::EnrichmentError;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";
const TEXT_SEARCH_PATH: &str = "/maps/api/place/textsearch/json";

/// Google Places text search over a fixed set of traveller-oriented queries.
pub struct PlacesService {
    http_client: Client,
    api_key: String,
    base_url: String,
}

/// Queries issued per destination. Results are keyed by the query's first word.
pub fn place_queries(destination: &str) -> [String; 4] {
    [
        format!("tourist attractions in {} India", destination),
        format!("restaurants in {} India", destination),
        format!("hotels in {} India", destination),
        format!("cultural sites in {} India", destination),
    ]
}

impl PlacesService {
    pub fn new() -> Result<Self, EnrichmentError> {
        let api_key = env::var("GOOGLE_PLACES_API_KEY")
            .map_err(|_| EnrichmentError::MissingConfig("GOOGLE_PLACES_API_KEY"))?;
        let base_url =
            env::var("GOOGLE_PLACES_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
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

    /// Runs every query; a failing query is logged and left out of the map.
    pub async fn search_destination(&self, destination: &str) -> BTreeMap<String, Value> {
        let mut places = BTreeMap::new();

        for query in place_queries(destination) {
            let category = query.split_whitespace().next().unwrap_or_default().to_string();
            match self.text_search(&query).await {
                Ok(results) => {
                    places.insert(category, results);
                }
                Err(e) => log::warn!("Places query '{}' failed: {}", query, e),
            }
        }

        places
    }

    pub async fn text_search(&self, query: &str) -> Result<Value, EnrichmentError> {
        let url = format!("{}{}", self.base_url, TEXT_SEARCH_PATH);
        let results = self
            .http_client
            .get(&url)
            .query(&[("query", query), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(results)
    }
}
