use reqwest::{header::ACCEPT, Url};
use tracing::{debug, info, warn};

use crate::{
    error::FetchError,
    feature::FeatureCollection,
    geocode::{decode_places, Place},
};

/// Thin async client for the data endpoint and the geocoder. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DataClient {
    http: reqwest::Client,
}

impl Default for DataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DataClient {
    pub fn new() -> Self {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .user_agent(concat!("Is-OSM-uptodate/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(300));
        let http = builder.build().unwrap_or_else(|err| {
            warn!(%err, "http client init failed; using defaults");
            reqwest::Client::new()
        });
        Self { http }
    }

    /// Any transport failure, non-2xx status or undecodable body is a `FetchError`.
    pub async fn fetch(&self, url: Url) -> Result<FeatureCollection, FetchError> {
        debug!(%url, "requesting features");
        let body = self.get_text(url).await?;
        let collection = FeatureCollection::from_json(&body)?;
        info!(features = collection.len(), "feature collection received");
        Ok(collection)
    }

    /// Runs a place search built with `geocode::search_url`.
    pub async fn search_places(&self, url: Url) -> Result<Vec<Place>, FetchError> {
        debug!(%url, "searching places");
        let body = self.get_text(url).await?;
        let places = decode_places(&body)?;
        info!(places = places.len(), "place search answered");
        Ok(places)
    }

    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}
