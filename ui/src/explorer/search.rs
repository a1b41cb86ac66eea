//! Place search state: the typed query, the request in flight and its answer.
//!
//! Searches are numbered like data fetches; only the answer to the latest one is
//! kept, so a slow geocoder cannot overwrite a newer result list.

use api::{search_url, BoundingBox, FetchError, Place, Url};
use tracing::debug;

use crate::core::location::{MapLocation, MAX_ZOOM, MIN_ZOOM};

use super::projection::Projection;

pub type SearchId = u64;

/// Zoom used for places the geocoder reports without an extent.
pub const PLACE_ZOOM: u8 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub search: SearchId,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceSearch {
    geocoder_url: String,
    last_issued: SearchId,
    pending: Option<SearchId>,
    query: String,
    results: Vec<Place>,
    error: Option<String>,
}

impl PlaceSearch {
    pub fn new(geocoder_url: impl Into<String>) -> Self {
        Self {
            geocoder_url: geocoder_url.into(),
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Place] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    /// True once the latest search finished without error and found nothing.
    pub fn found_nothing(&self) -> bool {
        self.pending.is_none()
            && self.error.is_none()
            && self.results.is_empty()
            && !self.query.trim().is_empty()
    }

    /// Blank queries clear the box and issue no request.
    pub fn begin(&mut self, query: &str) -> Result<Option<SearchTicket>, FetchError> {
        self.query = query.to_string();
        self.error = None;
        self.pending = None;
        if query.trim().is_empty() {
            self.clear();
            return Ok(None);
        }
        let url = search_url(&self.geocoder_url, query)?;
        self.last_issued += 1;
        self.pending = Some(self.last_issued);
        debug!(search = self.last_issued, %url, "place search started");
        Ok(Some(SearchTicket {
            search: self.last_issued,
            url,
        }))
    }

    /// Returns false when the answer belongs to a superseded search.
    pub fn complete(
        &mut self,
        search: SearchId,
        outcome: Result<Vec<Place>, FetchError>,
    ) -> bool {
        if self.pending != Some(search) {
            debug!(search, "dropping stale place search");
            return false;
        }
        self.pending = None;
        match outcome {
            Ok(places) => {
                self.results = places;
                self.error = None;
            }
            Err(err) => {
                self.results.clear();
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.pending = None;
        self.results.clear();
        self.error = None;
    }
}

/// Map location showing a place: its extent when known, a street-level view
/// around its point otherwise.
pub fn place_location(place: &Place, width: f64, height: f64) -> MapLocation {
    match place.bounds() {
        Some(bounds) => fit_bounds(&bounds, width, height),
        None => MapLocation::new(PLACE_ZOOM, place.lat, place.lon),
    }
}

/// Highest zoom at which `bounds` fits a `width` x `height` canvas.
pub fn fit_bounds(bounds: &BoundingBox, width: f64, height: f64) -> MapLocation {
    let (lon, lat) = bounds.center();
    (MIN_ZOOM..=MAX_ZOOM)
        .rev()
        .map(|zoom| MapLocation::new(zoom, lat, lon))
        .find(|location| {
            let (_, _, w, h) = Projection::new(*location, width, height).rect(bounds);
            w <= width && h <= height
        })
        .unwrap_or_else(|| MapLocation::new(MIN_ZOOM, lat, lon))
}
