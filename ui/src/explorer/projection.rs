//! Web Mercator projection for a fixed-size canvas centred on a map location.
//!
//! Same slippy-map math as OSM tiles: at zoom `z` the world is `256 * 2^z`
//! pixels wide.

use std::f64::consts::PI;

use api::BoundingBox;

use crate::core::location::{MapLocation, MAX_LATITUDE};

pub const TILE_SIZE: f64 = 256.0;

/// One raster tile and where its top-left corner lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub z: u8,
    pub x: u32,
    pub y: u32,
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    center: MapLocation,
    width: f64,
    height: f64,
}

impl Projection {
    pub fn new(center: MapLocation, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    pub fn center(&self) -> MapLocation {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2_f64.powi(i32::from(self.center.zoom))
    }

    fn to_world(&self, lon: f64, lat: f64) -> (f64, f64) {
        let size = self.world_size();
        let x = (lon + 180.0) / 360.0 * size;
        let lat_rad = lat.to_radians();
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) * 0.5 * size;
        (x, y)
    }

    fn from_world(&self, x: f64, y: f64) -> (f64, f64) {
        let size = self.world_size();
        let lon = x / size * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * y / size);
        let lat = n.sinh().atan().to_degrees();
        (lon, lat)
    }

    /// Canvas pixel for `(lon, lat)`; the centre lands in the middle of the canvas.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (cx, cy) = self.to_world(self.center.lon, self.center.lat);
        let (x, y) = self.to_world(lon, lat);
        (x - cx + self.width / 2.0, y - cy + self.height / 2.0)
    }

    /// `(lon, lat)` under a canvas pixel.
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let (cx, cy) = self.to_world(self.center.lon, self.center.lat);
        self.from_world(cx + x - self.width / 2.0, cy + y - self.height / 2.0)
    }

    /// Geographic box covered by the canvas, clipped to the valid lon/lat range.
    /// At low zoom the canvas is wider than the world.
    pub fn bounds(&self) -> BoundingBox {
        let (west, north) = self.unproject(0.0, 0.0);
        let (east, south) = self.unproject(self.width, self.height);
        BoundingBox::new(
            west.clamp(-180.0, 180.0),
            south.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            east.clamp(-180.0, 180.0),
            north.clamp(-MAX_LATITUDE, MAX_LATITUDE),
        )
    }

    /// New centre after dragging the map content by `(dx, dy)` pixels.
    pub fn pan(&self, dx: f64, dy: f64) -> MapLocation {
        let (lon, lat) = self.unproject(self.width / 2.0 - dx, self.height / 2.0 - dy);
        MapLocation::new(self.center.zoom, lat, lon)
    }

    /// Tiles covering the canvas. Columns wrap around the antimeridian, rows
    /// outside the world are skipped.
    pub fn tiles(&self) -> Vec<TilePlacement> {
        let (cx, cy) = self.to_world(self.center.lon, self.center.lat);
        let origin_x = cx - self.width / 2.0;
        let origin_y = cy - self.height / 2.0;
        let count = 1_i64 << self.center.zoom;

        let first_col = (origin_x / TILE_SIZE).floor() as i64;
        let last_col = ((origin_x + self.width) / TILE_SIZE).floor() as i64;
        let first_row = ((origin_y / TILE_SIZE).floor() as i64).max(0);
        let last_row = (((origin_y + self.height) / TILE_SIZE).floor() as i64).min(count - 1);

        let mut tiles = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                tiles.push(TilePlacement {
                    z: self.center.zoom,
                    x: col.rem_euclid(count) as u32,
                    y: row as u32,
                    left: col as f64 * TILE_SIZE - origin_x,
                    top: row as f64 * TILE_SIZE - origin_y,
                });
            }
        }
        tiles
    }

    /// Canvas rectangle `(x, y, width, height)` for a geographic box.
    pub fn rect(&self, bounds: &BoundingBox) -> (f64, f64, f64, f64) {
        let (x0, y0) = self.project(bounds.west, bounds.north);
        let (x1, y1) = self.project(bounds.east, bounds.south);
        (x0, y0, x1 - x0, y1 - y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milan(zoom: u8) -> Projection {
        Projection::new(MapLocation::new(zoom, 45.46423, 9.19073), 960.0, 640.0)
    }

    #[test]
    fn centre_projects_to_canvas_middle() {
        let projection = milan(17);
        let (x, y) = projection.project(9.19073, 45.46423);
        assert!((x - 480.0).abs() < 1e-6);
        assert!((y - 320.0).abs() < 1e-6);
    }

    #[test]
    fn unproject_inverts_project() {
        let projection = milan(15);
        let (x, y) = projection.project(9.2, 45.47);
        let (lon, lat) = projection.unproject(x, y);
        assert!((lon - 9.2).abs() < 1e-9);
        assert!((lat - 45.47).abs() < 1e-9);
    }

    #[test]
    fn bounds_surround_centre_and_shrink_with_zoom() {
        let wide = milan(12).bounds();
        let narrow = milan(18).bounds();
        assert!(wide.contains(9.19073, 45.46423));
        assert!(narrow.contains(9.19073, 45.46423));
        assert!(wide.west < wide.east && wide.south < wide.north);
        assert!(narrow.east - narrow.west < wide.east - wide.west);
    }

    #[test]
    fn panning_right_moves_centre_west() {
        let projection = milan(16);
        let moved = projection.pan(100.0, 0.0);
        assert!(moved.lon < 9.19073);
        assert!((moved.lat - 45.46423).abs() < 1e-9);
        assert_eq!(moved.zoom, 16);
    }

    #[test]
    fn tiles_cover_the_whole_canvas() {
        let projection = milan(16);
        let tiles = projection.tiles();
        assert!(!tiles.is_empty());
        let min_left = tiles.iter().map(|t| t.left).fold(f64::INFINITY, f64::min);
        let max_right = tiles.iter().map(|t| t.left + TILE_SIZE).fold(f64::NEG_INFINITY, f64::max);
        let min_top = tiles.iter().map(|t| t.top).fold(f64::INFINITY, f64::min);
        let max_bottom = tiles.iter().map(|t| t.top + TILE_SIZE).fold(f64::NEG_INFINITY, f64::max);
        assert!(min_left <= 0.0 && max_right >= 960.0);
        assert!(min_top <= 0.0 && max_bottom >= 640.0);
        assert!(tiles.iter().all(|t| t.z == 16 && t.x < 1 << 16 && t.y < 1 << 16));
    }

    #[test]
    fn low_zoom_skips_rows_outside_the_world() {
        let projection = Projection::new(MapLocation::new(1, 0.0, 0.0), 960.0, 640.0);
        assert!(projection.tiles().iter().all(|t| t.y < 2 && t.x < 2));
    }

    #[test]
    fn low_zoom_bounds_stay_inside_the_world() {
        let bounds = Projection::new(MapLocation::new(1, 0.0, 0.0), 960.0, 640.0).bounds();
        assert_eq!(bounds.west, -180.0);
        assert_eq!(bounds.east, 180.0);
        assert_eq!(bounds.north, MAX_LATITUDE);
        assert_eq!(bounds.south, -MAX_LATITUDE);
    }

    #[test]
    fn rect_of_own_bounds_is_the_canvas() {
        let projection = milan(14);
        let (x, y, w, h) = projection.rect(&projection.bounds());
        assert!(x.abs() < 1e-6 && y.abs() < 1e-6);
        assert!((w - 960.0).abs() < 1e-6 && (h - 640.0).abs() < 1e-6);
    }
}
