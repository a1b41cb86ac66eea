//! Cluster aggregation: one representative score for a group of markers.
//!
//! The percentile drops the lowest `percentile`% of members and keeps the score
//! right above that cut. With 100 the cluster shows its best member; with 1 it is
//! dominated by the worst one.

use crate::core::error::AnalysisError;

use super::palette::{viridis, Color};
use super::scoring::ScoreSheet;

pub const MIN_PERCENTILE: u32 = 1;
pub const MAX_PERCENTILE: u32 = 100;
pub const DEFAULT_PERCENTILE: u32 = 50;

pub fn validate_percentile(percentile: u32) -> Result<u32, AnalysisError> {
    if (MIN_PERCENTILE..=MAX_PERCENTILE).contains(&percentile) {
        Ok(percentile)
    } else {
        Err(AnalysisError::InvalidPercentile(percentile))
    }
}

/// Picks the member at index `ceil(percentile * count / 100) - 1` of the sorted scores.
pub fn aggregate(member_scores: &[f64], percentile: u32) -> Result<f64, AnalysisError> {
    let percentile = validate_percentile(percentile)?;
    if member_scores.is_empty() {
        return Err(AnalysisError::EmptyCluster);
    }

    let mut sorted = member_scores.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let rank = (percentile as usize * count).div_ceil(100);
    let index = rank.saturating_sub(1).min(count - 1);
    Ok(sorted[index])
}

/// Aggregates member colours through the sheet's colour index and returns the
/// representative colour.
pub fn aggregate_colors(
    sheet: &ScoreSheet,
    member_colors: &[Color],
    percentile: u32,
) -> Result<Color, AnalysisError> {
    let scores = member_colors
        .iter()
        .map(|color| {
            sheet
                .score_for_color(color)
                .ok_or_else(|| AnalysisError::UnknownColor(color.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    aggregate(&scores, percentile).map(viridis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_member_wins_for_every_percentile() {
        for percentile in MIN_PERCENTILE..=MAX_PERCENTILE {
            assert_eq!(aggregate(&[0.37], percentile), Ok(0.37));
        }
    }

    #[test]
    fn full_percentile_is_the_maximum() {
        let members = [0.4, 0.9, 0.1, 0.6];
        assert_eq!(aggregate(&members, 100), Ok(0.9));
        assert_eq!(aggregate(&members, 1), Ok(0.1));
    }

    #[test]
    fn median_picks_lower_middle() {
        // ceil(50 * 4 / 100) - 1 = 1
        assert_eq!(aggregate(&[0.4, 0.9, 0.1, 0.6], 50), Ok(0.4));
        // ceil(50 * 5 / 100) - 1 = 2
        assert_eq!(aggregate(&[0.5, 0.2, 0.3, 1.0, 0.0], 50), Ok(0.3));
    }

    #[test]
    fn monotonic_in_percentile() {
        let members = [0.8, 0.05, 0.33, 0.33, 0.91, 0.5, 0.0, 0.72, 0.64];
        let mut previous = f64::NEG_INFINITY;
        for percentile in MIN_PERCENTILE..=MAX_PERCENTILE {
            let value = aggregate(&members, percentile).unwrap();
            assert!(value >= previous, "p={percentile}: {value} < {previous}");
            previous = value;
        }
    }

    #[test]
    fn percentile_outside_range_is_rejected() {
        assert_eq!(aggregate(&[0.5], 0), Err(AnalysisError::InvalidPercentile(0)));
        assert_eq!(
            aggregate(&[0.5], 101),
            Err(AnalysisError::InvalidPercentile(101))
        );
    }

    #[test]
    fn empty_cluster_is_a_contract_violation() {
        assert_eq!(aggregate(&[], 50), Err(AnalysisError::EmptyCluster));
    }

    #[test]
    fn does_not_reorder_callers_slice() {
        let members = vec![0.9, 0.1];
        let _ = aggregate(&members, 50);
        assert_eq!(members, vec![0.9, 0.1]);
    }

    #[test]
    fn unknown_colours_are_reported() {
        let sheet = ScoreSheet::default();
        let err = aggregate_colors(&sheet, &[Color::rgb(0, 0, 0)], 50).unwrap_err();
        assert_eq!(err, AnalysisError::UnknownColor("#000000".into()));
    }
}
