//! Backend contract for the `/api/getData` endpoint.
//!
//! The server streams a GeoJSON `FeatureCollection` where every feature carries the
//! editing history summary of one OSM element (`lastedit`, `created`, `version`,
//! `average_update_days`). This crate owns the wire types, the request URL, the
//! place search used to jump around the map and the HTTP client; scoring lives in
//! `ui`.

mod client;
mod error;
mod feature;
mod geocode;
mod viewport;

pub use client::DataClient;
pub use error::FetchError;
pub use feature::{
    parse_timestamp, Feature, FeatureCollection, FeatureId, FeatureKind, FeatureProperties,
    FeatureRef, Geometry,
};
pub use geocode::{decode_places, search_url, Place, NOMINATIM_URL, SEARCH_LIMIT};
pub use reqwest::Url;
pub use viewport::{BoundingBox, Viewport, DATA_ENDPOINT};
