//! Comparison view model
//!
//! The whole page below the dropdowns is computed here from one selection.
//! The browser only draws what this produces.

use battle_common::charts::{album_names, mean_rating_over_time, ratings_histogram, Chart};
use battle_common::compare::AlbumSide;
use battle_common::dataset::AlbumId;
use battle_common::stats::SIGNIFICANCE_LEVEL;
use battle_common::{compare, Datasets, Result, Selection, Verdict};
use chrono::NaiveDate;
use serde::Serialize;

/// Metadata card for one album
#[derive(Debug, Clone, Serialize)]
pub struct AlbumCard {
    pub album_id: AlbumId,
    pub name: String,
    pub artist: String,
    pub release_year: String,
    /// Aggregate score from metadata
    pub rating: f64,
    pub genres: String,
    /// Number of individual votes behind the test
    pub votes: usize,
}

impl From<&AlbumSide> for AlbumCard {
    fn from(side: &AlbumSide) -> Self {
        let metadata = &side.metadata;
        Self {
            album_id: metadata.album_id,
            name: metadata.name.clone(),
            artist: metadata.artist.clone(),
            release_year: metadata.date.clone(),
            rating: metadata.rating,
            genres: metadata.genres.clone(),
            votes: side.ratings.len(),
        }
    }
}

/// Verdict heading
#[derive(Debug, Clone, Serialize)]
pub struct VerdictView {
    pub outcome: Verdict,
    pub headline: String,
    pub winner: Option<String>,
    pub loser: Option<String>,
}

/// Magnitudes outside this range are displayed in exponent notation
const POSITIONAL_RANGE: std::ops::Range<f64> = 1e-4..1e9;

/// A number that may be NaN or infinite
///
/// JSON has no NaN, so `value` is null for non-finite numbers and `display`
/// always carries the printed form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub value: Option<f64>,
    pub display: String,
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Self {
            value: value.is_finite().then_some(value),
            display: display_number(value),
        }
    }
}

fn display_number(value: f64) -> String {
    if value.is_finite() && value != 0.0 && !POSITIONAL_RANGE.contains(&value.abs()) {
        format!("{:.4e}", value)
    } else {
        value.to_string()
    }
}

/// "Stats for nerds" panel
#[derive(Debug, Clone, Serialize)]
pub struct NerdStats {
    pub p_value: Metric,
    pub t_statistic: Metric,
    pub degrees_of_freedom: Metric,
    pub significance_level: f64,
}

/// Everything the page shows for one selection
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub selection: Selection,
    pub first: AlbumCard,
    pub second: AlbumCard,
    pub verdict: VerdictView,
    pub stats: NerdStats,
    pub histogram: Chart<f64, u64>,
    pub timeline: Chart<NaiveDate, f64>,
}

/// Run the comparison for `selection` and shape it for the page
pub fn build_view(datasets: &Datasets, selection: Selection) -> Result<ComparisonView> {
    let comparison = compare(datasets, selection)?;

    let first_name = &comparison.first.metadata.name;
    let second_name = &comparison.second.metadata.name;
    let (winner, loser) = match comparison.verdict {
        Verdict::Indeterminate => (None, None),
        Verdict::FirstWins => (Some(first_name.clone()), Some(second_name.clone())),
        Verdict::SecondWins => (Some(second_name.clone()), Some(first_name.clone())),
    };

    let names = album_names(&comparison);
    let mut histogram = ratings_histogram(comparison.combined_ratings());
    histogram.relabel(&names);
    let mut timeline = mean_rating_over_time(comparison.combined_ratings());
    timeline.relabel(&names);

    Ok(ComparisonView {
        selection,
        first: AlbumCard::from(&comparison.first),
        second: AlbumCard::from(&comparison.second),
        verdict: VerdictView {
            outcome: comparison.verdict,
            headline: comparison.headline(),
            winner,
            loser,
        },
        stats: NerdStats {
            p_value: comparison.test.p_value.into(),
            t_statistic: comparison.test.t_statistic.into(),
            degrees_of_freedom: comparison.test.degrees_of_freedom.into(),
            significance_level: SIGNIFICANCE_LEVEL,
        },
        histogram,
        timeline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_finite() {
        let metric = Metric::from(0.25);
        assert_eq!(metric.value, Some(0.25));
        assert_eq!(metric.display, "0.25");
    }

    #[test]
    fn test_metric_tiny_p_value_uses_exponent() {
        let metric = Metric::from(1.5e-30);
        assert_eq!(metric.value, Some(1.5e-30));
        assert_eq!(metric.display, "1.5000e-30");

        assert_eq!(Metric::from(0.0001).display, "0.0001");
        assert_eq!(Metric::from(0.0).display, "0");
        assert_eq!(Metric::from(-2.5e12).display, "-2.5000e12");
    }

    #[test]
    fn test_metric_non_finite() {
        let nan = Metric::from(f64::NAN);
        assert_eq!(nan.value, None);
        assert_eq!(nan.display, "NaN");

        let inf = Metric::from(f64::NEG_INFINITY);
        assert_eq!(inf.value, None);
        assert_eq!(inf.display, "-inf");
    }

    #[test]
    fn test_metric_serializes_nan_as_null() {
        let json = serde_json::to_value(Metric::from(f64::NAN)).unwrap();
        assert!(json["value"].is_null());
        assert_eq!(json["display"], "NaN");
    }
}
