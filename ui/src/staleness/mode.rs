//! Mode registry: the closed set of metrics a feature can be scored on.

use std::fmt;
use std::str::FromStr;

use api::Feature;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::error::AnalysisError;
use crate::core::format::{format_date, format_frequency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Age of the latest edit. Older is worse.
    #[default]
    LastEdit,
    /// Age of the first version. Older is worse.
    Creation,
    /// Number of versions. Fewer is worse.
    Revisions,
    /// Average days between edits. Longer is worse.
    Frequency,
}

/// Name table shared by parsing and display.
const REGISTRY: [(&str, Mode); 4] = [
    ("lastedit", Mode::LastEdit),
    ("creation", Mode::Creation),
    ("revisions", Mode::Revisions),
    ("frequency", Mode::Frequency),
];

/// A raw per-feature value, typed by the mode that extracted it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    Timestamp(OffsetDateTime),
    Revisions(u64),
    Days(f64),
}

impl RawValue {
    /// Position on the mode's numeric axis. Timestamps are milliseconds since the epoch.
    pub fn magnitude(&self) -> f64 {
        match self {
            Self::Timestamp(ts) => (ts.unix_timestamp_nanos() / 1_000_000) as f64,
            Self::Revisions(count) => *count as f64,
            Self::Days(days) => *days,
        }
    }
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::LastEdit, Mode::Creation, Mode::Revisions, Mode::Frequency];

    pub fn name(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(_, mode)| *mode == self)
            .map(|(name, _)| *name)
            .unwrap_or("lastedit")
    }

    /// Looks a mode up by its wire name.
    pub fn from_name(name: &str) -> Result<Self, AnalysisError> {
        REGISTRY
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, mode)| *mode)
            .ok_or_else(|| AnalysisError::UnknownMode(name.to_string()))
    }

    /// When set, a higher raw value is worse.
    pub fn is_inverted(self) -> bool {
        matches!(self, Self::Frequency)
    }

    /// Baseline shown before any data has been loaded.
    pub fn default_value(self, now: OffsetDateTime) -> RawValue {
        match self {
            Self::LastEdit | Self::Creation => RawValue::Timestamp(now),
            Self::Revisions => RawValue::Revisions(1),
            Self::Frequency => RawValue::Days(0.0),
        }
    }

    pub fn extract(self, feature: &Feature) -> RawValue {
        let properties = &feature.properties;
        match self {
            Self::LastEdit => RawValue::Timestamp(properties.lastedit),
            Self::Creation => RawValue::Timestamp(properties.created),
            Self::Revisions => RawValue::Revisions(properties.version),
            Self::Frequency => RawValue::Days(properties.average_update_days),
        }
    }

    /// Formatting follows the value's own type, so a default value formats the same
    /// way an extracted one does.
    pub fn format(self, value: RawValue) -> String {
        match value {
            RawValue::Timestamp(ts) => format_date(ts),
            RawValue::Revisions(count) => count.to_string(),
            RawValue::Days(days) => format_frequency(days),
        }
    }
}

impl FromStr for Mode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn registry_round_trips_every_mode() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_name(mode.name()), Ok(mode));
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn unknown_names_fail_fast() {
        assert_eq!(
            Mode::from_name("popularity"),
            Err(AnalysisError::UnknownMode("popularity".into()))
        );
        assert!("LastEdit".parse::<Mode>().is_err());
    }

    #[test]
    fn only_frequency_is_inverted() {
        let inverted: Vec<_> = Mode::ALL.into_iter().filter(|m| m.is_inverted()).collect();
        assert_eq!(inverted, vec![Mode::Frequency]);
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Mode::LastEdit).unwrap(), "\"lastedit\"");
        let mode: Mode = serde_json::from_str("\"frequency\"").unwrap();
        assert_eq!(mode, Mode::Frequency);
    }

    #[test]
    fn defaults_format_like_extracted_values() {
        let now = datetime!(2024-02-29 12:00 UTC);
        assert_eq!(Mode::LastEdit.format(Mode::LastEdit.default_value(now)), "2024-02-29");
        assert_eq!(Mode::Revisions.format(Mode::Revisions.default_value(now)), "1");
        assert_eq!(Mode::Frequency.format(Mode::Frequency.default_value(now)), "daily");
    }

    #[test]
    fn timestamps_compare_in_milliseconds() {
        let earlier = RawValue::Timestamp(datetime!(1970-01-01 0:00:01 UTC));
        assert_eq!(earlier.magnitude(), 1000.0);
    }
}
