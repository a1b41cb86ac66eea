//! Grid clustering of projected markers.
//!
//! Markers falling into the same square cell of the canvas are drawn as one disc
//! showing the member count. The disc colour comes from the cluster aggregator,
//! fed with the members' scores directly.

use std::collections::BTreeMap;

use api::FeatureRef;

use crate::core::error::AnalysisError;
use crate::staleness::{aggregate, viridis, Color};

/// One scored feature placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub feature: FeatureRef,
    pub lon: f64,
    pub lat: f64,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMark {
    /// Centroid of the members, canvas pixels.
    pub x: f64,
    pub y: f64,
    /// Centroid of the members, degrees.
    pub lon: f64,
    pub lat: f64,
    pub count: usize,
    pub score: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapGlyph {
    Single(Marker),
    Cluster(ClusterMark),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    pub cell_px: f64,
    pub disable_at_zoom: u8,
    pub percentile: u32,
}

pub fn cluster_markers(
    markers: Vec<Marker>,
    zoom: u8,
    options: GridOptions,
) -> Result<Vec<MapGlyph>, AnalysisError> {
    if zoom >= options.disable_at_zoom || options.cell_px <= 0.0 {
        return Ok(markers.into_iter().map(MapGlyph::Single).collect());
    }

    let mut cells: BTreeMap<(i64, i64), Vec<Marker>> = BTreeMap::new();
    for marker in markers {
        let cell = (
            (marker.x / options.cell_px).floor() as i64,
            (marker.y / options.cell_px).floor() as i64,
        );
        cells.entry(cell).or_default().push(marker);
    }

    let mut glyphs = Vec::with_capacity(cells.len());
    for (_, mut members) in cells {
        if members.len() == 1 {
            if let Some(marker) = members.pop() {
                glyphs.push(MapGlyph::Single(marker));
            }
            continue;
        }

        let count = members.len();
        let scores: Vec<f64> = members.iter().map(|m| m.score).collect();
        let score = aggregate(&scores, options.percentile)?;
        let n = count as f64;
        let mean = |f: fn(&Marker) -> f64| members.iter().map(f).sum::<f64>() / n;
        glyphs.push(MapGlyph::Cluster(ClusterMark {
            x: mean(|m| m.x),
            y: mean(|m| m.y),
            lon: mean(|m| m.lon),
            lat: mean(|m| m.lat),
            count,
            score,
            color: viridis(score),
        }));
    }
    Ok(glyphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: &str, x: f64, y: f64, score: f64) -> Marker {
        Marker {
            feature: FeatureRef::node(id),
            lon: 9.0 + x / 1000.0,
            lat: 45.0 - y / 1000.0,
            x,
            y,
            color: viridis(score),
            score,
        }
    }

    const GRID: GridOptions = GridOptions {
        cell_px: 80.0,
        disable_at_zoom: 19,
        percentile: 50,
    };

    #[test]
    fn nearby_markers_share_a_cluster() {
        let markers = vec![
            marker("a", 10.0, 10.0, 0.2),
            marker("b", 30.0, 50.0, 0.8),
            marker("c", 70.0, 20.0, 0.4),
            marker("far", 500.0, 500.0, 1.0),
        ];
        let glyphs = cluster_markers(markers, 15, GRID).unwrap();
        assert_eq!(glyphs.len(), 2);

        let cluster = glyphs
            .iter()
            .find_map(|g| match g {
                MapGlyph::Cluster(c) => Some(c),
                MapGlyph::Single(_) => None,
            })
            .unwrap();
        assert_eq!(cluster.count, 3);
        assert_eq!(cluster.score, 0.4);
        assert_eq!(cluster.color, viridis(0.4));
        assert!((cluster.x - 110.0 / 3.0).abs() < 1e-9);

        assert!(glyphs
            .iter()
            .any(|g| matches!(g, MapGlyph::Single(m) if m.feature.id.as_str() == "far")));
    }

    #[test]
    fn clustering_is_disabled_at_threshold_zoom() {
        let markers = vec![marker("a", 10.0, 10.0, 0.2), marker("b", 11.0, 11.0, 0.3)];
        let glyphs = cluster_markers(markers, 19, GRID).unwrap();
        assert_eq!(glyphs.len(), 2);
        assert!(glyphs.iter().all(|g| matches!(g, MapGlyph::Single(_))));
    }

    #[test]
    fn percentile_drives_cluster_colour() {
        let markers = || vec![marker("a", 1.0, 1.0, 0.1), marker("b", 2.0, 2.0, 0.9)];
        let best = cluster_markers(markers(), 10, GridOptions { percentile: 100, ..GRID }).unwrap();
        let worst = cluster_markers(markers(), 10, GridOptions { percentile: 1, ..GRID }).unwrap();
        assert!(matches!(&best[0], MapGlyph::Cluster(c) if c.score == 0.9));
        assert!(matches!(&worst[0], MapGlyph::Cluster(c) if c.score == 0.1));
    }

    #[test]
    fn invalid_percentile_surfaces() {
        let markers = vec![marker("a", 1.0, 1.0, 0.1), marker("b", 2.0, 2.0, 0.9)];
        let err = cluster_markers(markers, 10, GridOptions { percentile: 0, ..GRID }).unwrap_err();
        assert_eq!(err, AnalysisError::InvalidPercentile(0));
    }

    #[test]
    fn negative_coordinates_get_their_own_cells() {
        let markers = vec![marker("a", -5.0, 5.0, 0.1), marker("b", 5.0, 5.0, 0.9)];
        let glyphs = cluster_markers(markers, 10, GRID).unwrap();
        assert_eq!(glyphs.len(), 2);
    }
}
