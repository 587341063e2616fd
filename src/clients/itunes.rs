use std::time::Duration;

use log::debug;

use crate::clients::{
    SearchClient,
    entities::{RawTrack, SearchResponse},
    errors::Result,
};

/// Public iTunes search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://itunes.apple.com/search";

#[derive(Clone, Debug)]
pub struct ItunesClient {
    base_url: String,
    http: reqwest::Client,
}

impl ItunesClient {
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        ItunesClient {
            base_url: base_url.into(),
            http,
        }
    }

    // Build a client with its own connection pool and request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(base_url, http))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl SearchClient for ItunesClient {
    async fn search(&self, term: &str, limit: u32) -> Result<Vec<RawTrack>> {
        debug!("Searching {} for {term:?} (limit {limit})", self.base_url);
        let limit = limit.to_string();
        let response: SearchResponse = self
            .http
            .get(&self.base_url)
            .query(&[
                ("term", term),
                ("media", "music"),
                ("entity", "song"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(
            "Search for {term:?} returned {} tracks",
            response.results.len()
        );
        Ok(response.results)
    }
}
