//! Feature scorer.
//!
//! Every feature is placed on a 0..=1 scale relative to the collection it came
//! with: 0 is the worst observed value for the active mode, 1 the best. The scale
//! direction is the same for every mode (inverted modes flip which raw extreme is
//! worst), so colours always read the same way.
//!
//! A `ScoreSheet` is rebuilt from scratch whenever the collection or the mode
//! changes and is only published once complete.

use std::collections::HashMap;

use api::{FeatureCollection, FeatureRef};
use time::OffsetDateTime;

use super::mode::{Mode, RawValue};
use super::palette::{viridis, Color};

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScore {
    pub feature: FeatureRef,
    pub raw: RawValue,
    pub score: f64,
    pub color: Color,
}

/// The worst or best feature of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Extreme {
    pub feature: FeatureRef,
    pub value: RawValue,
    pub display: String,
}

/// Display strings for the two ends of the colour bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    pub worst: String,
    pub best: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreSheet {
    mode: Mode,
    entries: Vec<FeatureScore>,
    positions: HashMap<FeatureRef, usize>,
    color_index: HashMap<Color, f64>,
    worst: Option<Extreme>,
    best: Option<Extreme>,
}

pub fn score(collection: &FeatureCollection, mode: Mode) -> ScoreSheet {
    ScoreSheet::compute(collection, mode)
}

impl ScoreSheet {
    /// No data: no scores and no statistics.
    pub fn empty(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn compute(collection: &FeatureCollection, mode: Mode) -> Self {
        if collection.is_empty() {
            return Self::empty(mode);
        }

        let values: Vec<RawValue> = collection.iter().map(|f| mode.extract(f)).collect();

        // Strict comparisons keep the first occurrence of each extreme.
        let mut lowest = 0usize;
        let mut highest = 0usize;
        for (index, value) in values.iter().enumerate().skip(1) {
            let magnitude = value.magnitude();
            if magnitude < values[lowest].magnitude() {
                lowest = index;
            }
            if magnitude > values[highest].magnitude() {
                highest = index;
            }
        }

        let (worst_index, best_index) = if mode.is_inverted() {
            (highest, lowest)
        } else {
            (lowest, highest)
        };
        let worst_raw = values[worst_index].magnitude();
        let range = values[highest].magnitude() - values[lowest].magnitude();

        let mut entries = Vec::with_capacity(values.len());
        let mut positions = HashMap::with_capacity(values.len());
        let mut color_index = HashMap::new();
        for (index, (feature, raw)) in collection.iter().zip(values.iter()).enumerate() {
            let score = if range > 0.0 {
                ((worst_raw - raw.magnitude()).abs() / range).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let color = viridis(score);
            color_index.insert(color, score);
            let reference = feature.reference();
            positions.entry(reference.clone()).or_insert(index);
            entries.push(FeatureScore {
                feature: reference,
                raw: *raw,
                score,
                color,
            });
        }

        let extreme = |index: usize| Extreme {
            feature: entries[index].feature.clone(),
            value: values[index],
            display: mode.format(values[index]),
        };
        let worst = Some(extreme(worst_index));
        let best = Some(extreme(best_index));

        Self {
            mode,
            entries,
            positions,
            color_index,
            worst,
            best,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Scores in collection order.
    pub fn entries(&self) -> &[FeatureScore] {
        &self.entries
    }

    pub fn entry(&self, feature: &FeatureRef) -> Option<&FeatureScore> {
        self.positions.get(feature).map(|&index| &self.entries[index])
    }

    pub fn score_of(&self, feature: &FeatureRef) -> Option<f64> {
        self.entry(feature).map(|entry| entry.score)
    }

    pub fn color_of(&self, feature: &FeatureRef) -> Option<Color> {
        self.entry(feature).map(|entry| entry.color)
    }

    /// Reverse lookup for hosts that only hand back colours. Exact match only.
    ///
    /// Lossy: colours are 8-bit RGB, so nearby scores can share one and the score
    /// written last wins. Prefer `score_of` whenever the feature is known.
    pub fn score_for_color(&self, color: &Color) -> Option<f64> {
        self.color_index.get(color).copied()
    }

    pub fn worst(&self) -> Option<&Extreme> {
        self.worst.as_ref()
    }

    pub fn best(&self) -> Option<&Extreme> {
        self.best.as_ref()
    }

    /// Without data both ends show the mode's default value.
    pub fn legend(&self, now: OffsetDateTime) -> Legend {
        let fallback = || self.mode.format(self.mode.default_value(now));
        Legend {
            worst: self
                .worst
                .as_ref()
                .map(|extreme| extreme.display.clone())
                .unwrap_or_else(fallback),
            best: self
                .best
                .as_ref()
                .map(|extreme| extreme.display.clone())
                .unwrap_or_else(fallback),
        }
    }
}
