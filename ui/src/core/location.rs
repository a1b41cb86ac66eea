//! Map location persisted in the URL hash as `zoom/lat/lon`, so a shared link
//! reopens the same view.

use crate::core::format::format_coordinate;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 19;
/// Web Mercator cannot represent the poles.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLocation {
    pub zoom: u8,
    pub lat: f64,
    pub lon: f64,
}

impl MapLocation {
    /// Clamps zoom and latitude and wraps longitude into [-180, 180).
    pub fn new(zoom: u8, lat: f64, lon: f64) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            lat: lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            lon: (lon + 180.0).rem_euclid(360.0) - 180.0,
        }
    }

    pub fn with_zoom(self, zoom: u8) -> Self {
        Self::new(zoom, self.lat, self.lon)
    }

    pub fn zoom_by(self, delta: i8) -> Self {
        let zoom = (i16::from(self.zoom) + i16::from(delta)).clamp(0, i16::from(u8::MAX)) as u8;
        self.with_zoom(zoom)
    }

    pub fn to_hash(&self) -> String {
        format!(
            "{}/{}/{}",
            self.zoom,
            format_coordinate(self.lat),
            format_coordinate(self.lon)
        )
    }

    /// Parses `zoom/lat/lon`, with or without the leading `#`.
    pub fn from_hash(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().trim_start_matches('#').split('/');
        let zoom: u8 = parts.next()?.trim().parse().ok()?;
        let lat: f64 = parts.next()?.trim().parse().ok()?;
        let lon: f64 = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() || !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        Some(Self::new(zoom, lat, lon))
    }
}

impl Default for MapLocation {
    /// Duomo di Milano.
    fn default() -> Self {
        Self::new(MAX_ZOOM, 45.46423, 9.19073)
    }
}
