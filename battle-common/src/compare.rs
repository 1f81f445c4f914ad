//! Comparison engine
//!
//! Given two album ids: partition the votes, run Welch's t-test on the two
//! rating distributions, look up both metadata rows and decide the verdict.
//!
//! The verdict mixes two sources. Significance comes from the raw votes,
//! while the direction (and the tie check) uses the aggregate `rating`
//! stored in metadata. The two are not guaranteed to agree: a significant
//! test can still end in a tie on the displayed scores, which is reported as
//! indeterminate.

use serde::Serialize;
use tracing::debug;

use crate::dataset::{AlbumId, AlbumMetadata, Datasets, RatingEvent};
use crate::selection::Selection;
use crate::stats::{welch_t_test, WelchTest};
use crate::{Error, Result};

/// Which album, if any, is better with 95% confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Indeterminate,
    FirstWins,
    SecondWins,
}

impl Verdict {
    /// Verdict policy, in order:
    /// 1. not significant (p > 0.05, or undefined) -> indeterminate
    /// 2. equal aggregate ratings -> indeterminate
    /// 3. higher aggregate rating wins
    pub fn decide(test: &WelchTest, first_rating: f64, second_rating: f64) -> Self {
        if !test.is_significant() {
            Verdict::Indeterminate
        } else if first_rating == second_rating {
            Verdict::Indeterminate
        } else if first_rating > second_rating {
            Verdict::FirstWins
        } else {
            Verdict::SecondWins
        }
    }

    /// Sentence shown under the metadata cards
    pub fn headline(&self, first_name: &str, second_name: &str) -> String {
        match self {
            Verdict::Indeterminate => {
                "We can not say with more than 95% certainty that one album is better than the other!"
                    .to_string()
            }
            Verdict::FirstWins => {
                format!("We can be 95% sure that {first_name} is better than {second_name}!")
            }
            Verdict::SecondWins => {
                format!("We can be 95% sure that {second_name} is better than {first_name}!")
            }
        }
    }
}

/// One side of a comparison
#[derive(Debug, Clone)]
pub struct AlbumSide {
    pub metadata: AlbumMetadata,
    pub ratings: Vec<RatingEvent>,
}

impl AlbumSide {
    pub fn rating_values(&self) -> Vec<f64> {
        self.ratings.iter().map(|event| event.rating).collect()
    }
}

/// Everything derived from one selection
#[derive(Debug, Clone)]
pub struct Comparison {
    pub selection: Selection,
    pub first: AlbumSide,
    pub second: AlbumSide,
    pub test: WelchTest,
    pub verdict: Verdict,
}

impl Comparison {
    pub fn headline(&self) -> String {
        self.verdict
            .headline(&self.first.metadata.name, &self.second.metadata.name)
    }

    /// Votes of the first album followed by votes of the second
    pub fn combined_ratings(&self) -> impl Iterator<Item = &RatingEvent> {
        self.first.ratings.iter().chain(self.second.ratings.iter())
    }
}

fn metadata_for(datasets: &Datasets, album_id: AlbumId) -> Result<AlbumMetadata> {
    datasets
        .albums()?
        .find(album_id)
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("metadata for album id {album_id}")))
}

fn ratings_for(datasets: &Datasets, album_id: AlbumId) -> Result<Vec<RatingEvent>> {
    Ok(datasets
        .ratings()?
        .for_album(album_id)
        .into_iter()
        .cloned()
        .collect())
}

/// Run the full comparison for one selection
pub fn compare(datasets: &Datasets, selection: Selection) -> Result<Comparison> {
    let first = AlbumSide {
        metadata: metadata_for(datasets, selection.first)?,
        ratings: ratings_for(datasets, selection.first)?,
    };
    let second = AlbumSide {
        metadata: metadata_for(datasets, selection.second)?,
        ratings: ratings_for(datasets, selection.second)?,
    };

    let test = welch_t_test(&first.rating_values(), &second.rating_values());
    let verdict = Verdict::decide(&test, first.metadata.rating, second.metadata.rating);

    debug!(
        first = selection.first,
        second = selection.second,
        first_votes = first.ratings.len(),
        second_votes = second.ratings.len(),
        t = test.t_statistic,
        p = test.p_value,
        ?verdict,
        "Compared albums"
    );

    Ok(Comparison {
        selection,
        first,
        second,
        test,
        verdict,
    })
}
