//! Staleness analysis: how up-to-date each fetched feature is, relative to the
//! rest of the collection, under the selected mode.

pub mod cluster;
pub mod mode;
pub mod palette;
pub mod scoring;

pub use cluster::{aggregate, aggregate_colors};
pub use mode::{Mode, RawValue};
pub use palette::{viridis, Color};
pub use scoring::{score, Extreme, FeatureScore, Legend, ScoreSheet};
