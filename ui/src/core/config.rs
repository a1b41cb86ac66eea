//! Runtime configuration.
//!
//! Every knob has a default and can be overridden through an `UPTODATE_*`
//! environment variable. Invalid overrides are logged and ignored. In the browser
//! the API base falls back to the origin that served the page.

use std::str::FromStr;

use tracing::warn;

use crate::core::location::{MapLocation, MAX_ZOOM};
use crate::core::platform;
use crate::staleness::{cluster::DEFAULT_PERCENTILE, Mode};

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Scheme and host of the backend serving `/api/getData`.
    pub api_base: String,
    /// Nominatim-compatible geocoder behind the place search box.
    pub geocoder_url: String,
    /// Used when the location hash is missing or malformed.
    pub start: MapLocation,
    pub mode: Mode,
    pub percentile: u32,
    /// Side of the square grid cell used to group markers, in pixels.
    pub cluster_cell_px: f64,
    /// From this zoom on every marker is drawn on its own.
    pub disable_clustering_at_zoom: u8,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".to_string(),
            geocoder_url: api::NOMINATIM_URL.to_string(),
            start: MapLocation::default(),
            mode: Mode::default(),
            percentile: DEFAULT_PERCENTILE,
            cluster_cell_px: 80.0,
            disable_clustering_at_zoom: MAX_ZOOM,
            canvas_width: 960.0,
            canvas_height: 640.0,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base = std::env::var("UPTODATE_API_BASE")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or_else(platform::page_origin)
            .unwrap_or(defaults.api_base);
        let geocoder_url = std::env::var("UPTODATE_GEOCODER_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.geocoder_url);
        let start = std::env::var("UPTODATE_START")
            .ok()
            .and_then(|raw| {
                let parsed = MapLocation::from_hash(&raw);
                if parsed.is_none() {
                    warn!(%raw, "ignoring UPTODATE_START (expected zoom/lat/lon)");
                }
                parsed
            })
            .unwrap_or(defaults.start);
        let mode = env_parse::<Mode>("UPTODATE_MODE").unwrap_or(defaults.mode);
        let percentile = env_parse::<u32>("UPTODATE_PERCENTILE")
            .filter(|value| (1..=100).contains(value))
            .unwrap_or(defaults.percentile);
        let cluster_cell_px = env_parse::<f64>("UPTODATE_CLUSTER_CELL_PX")
            .filter(|value| value.is_finite())
            .unwrap_or(defaults.cluster_cell_px)
            .max(16.0);
        let disable_clustering_at_zoom = env_parse::<u8>("UPTODATE_DISABLE_CLUSTERING_AT_ZOOM")
            .unwrap_or(defaults.disable_clustering_at_zoom);
        let canvas_width = env_parse::<f64>("UPTODATE_CANVAS_WIDTH")
            .unwrap_or(defaults.canvas_width)
            .max(200.0);
        let canvas_height = env_parse::<f64>("UPTODATE_CANVAS_HEIGHT")
            .unwrap_or(defaults.canvas_height)
            .max(200.0);

        Self {
            api_base,
            geocoder_url,
            start,
            mode,
            percentile,
            cluster_cell_px,
            disable_clustering_at_zoom,
            canvas_width,
            canvas_height,
        }
    }
}

fn env_parse<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, %raw, %err, "ignoring invalid configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_view() {
        let config = AppConfig::default();
        assert_eq!(config.mode, Mode::LastEdit);
        assert_eq!(config.percentile, 50);
        assert_eq!(config.start.zoom, MAX_ZOOM);
        assert_eq!(config.disable_clustering_at_zoom, 19);
        assert_eq!(config.geocoder_url, "https://nominatim.openstreetmap.org");
    }

    #[test]
    fn env_parse_rejects_garbage() {
        std::env::set_var("UPTODATE_TEST_PARSE", "not-a-number");
        assert_eq!(env_parse::<u32>("UPTODATE_TEST_PARSE"), None);
        std::env::set_var("UPTODATE_TEST_PARSE", " 42 ");
        assert_eq!(env_parse::<u32>("UPTODATE_TEST_PARSE"), Some(42));
        assert_eq!(env_parse::<u32>("UPTODATE_TEST_MISSING"), None);
    }
}
