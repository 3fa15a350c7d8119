use reqwest::Client;
use serde::Deserialize;
use std::{env, time::Duration};
use url::Url;

use super::enrichment::EnrichmentError;

const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
const NO_SUMMARY: &str = "No summary available.";

#[derive(Debug, Deserialize)]
struct PageSummary {
    extract: Option<String>,
}

pub struct WikipediaService {
    http_client: Client,
    base_url: Url,
}

impl WikipediaService {
    pub fn new() -> Result<Self, EnrichmentError> {
        let base_url =
            env::var("WIKIPEDIA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(&base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, EnrichmentError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("intellitravel-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
        })
    }

    fn summary_url(&self, destination: &str) -> Result<Url, EnrichmentError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| EnrichmentError::Payload("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["api", "rest_v1", "page", "summary", destination]);
        Ok(url)
    }

    /// Lead extract of the destination's article.
    pub async fn summary(&self, destination: &str) -> Result<String, EnrichmentError> {
        let page: PageSummary = self
            .http_client
            .get(self.summary_url(destination)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(page.extract.unwrap_or_else(|| NO_SUMMARY.to_string()))
    }
}
