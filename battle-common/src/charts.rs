//! Chart series for the comparison page
//!
//! Series are first built per raw album id, the way a grouped plot would tag
//! them, then relabeled with album names. Relabeling touches the series
//! name, its legend group, and the `Album=<id>` token in the hover template.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::compare::Comparison;
use crate::dataset::{AlbumId, RatingEvent};

/// Label used for the grouping column in legends and hover text
pub const ALBUM_LABEL: &str = "Album";

/// One trace of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<X, Y> {
    pub album_id: AlbumId,
    pub name: String,
    pub legendgroup: String,
    pub hovertemplate: String,
    pub x: Vec<X>,
    pub y: Vec<Y>,
}

impl<X, Y> Series<X, Y> {
    fn new(album_id: AlbumId, x_label: &str, y_label: &str, x: Vec<X>, y: Vec<Y>) -> Self {
        Self {
            album_id,
            name: album_id.to_string(),
            legendgroup: album_id.to_string(),
            hovertemplate: format!(
                "{ALBUM_LABEL}={album_id}<br>{x_label}=%{{x}}<br>{y_label}=%{{y}}<extra></extra>"
            ),
            x,
            y,
        }
    }

    /// Swap the raw id for `name` everywhere it appears
    pub fn relabel(&mut self, name: &str) {
        let raw = format!("{ALBUM_LABEL}={}<br>", self.album_id);
        let named = format!("{ALBUM_LABEL}={name}<br>");
        self.hovertemplate = self.hovertemplate.replace(&raw, &named);
        self.name = name.to_string();
        self.legendgroup = name.to_string();
    }
}

/// A titled chart with one series per album
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart<X, Y> {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series<X, Y>>,
}

impl<X, Y> Chart<X, Y> {
    /// Relabel every series whose id has a name; unknown ids stay raw
    pub fn relabel(&mut self, names: &HashMap<AlbumId, String>) {
        for series in &mut self.series {
            if let Some(name) = names.get(&series.album_id) {
                series.relabel(name);
            }
        }
    }
}

/// Group events by album id, albums in order of first appearance
fn group_by_album<'a>(
    events: impl IntoIterator<Item = &'a RatingEvent>,
) -> Vec<(AlbumId, Vec<&'a RatingEvent>)> {
    let mut groups: Vec<(AlbumId, Vec<&RatingEvent>)> = Vec::new();
    for event in events {
        match groups.iter_mut().find(|(id, _)| *id == event.album_id) {
            Some((_, group)) => group.push(event),
            None => groups.push((event.album_id, vec![event])),
        }
    }
    groups
}

/// Vote counts per distinct rating value, per album
pub fn ratings_histogram<'a>(events: impl IntoIterator<Item = &'a RatingEvent>) -> Chart<f64, u64> {
    let (x_label, y_label) = ("Rating", "Number of votes");
    let series = group_by_album(events)
        .into_iter()
        .map(|(album_id, group)| {
            let mut values: Vec<f64> = group.iter().map(|event| event.rating).collect();
            values.sort_by(|a, b| a.total_cmp(b));

            let mut x: Vec<f64> = Vec::new();
            let mut y: Vec<u64> = Vec::new();
            for value in values {
                match x.last() {
                    Some(last) if *last == value => {
                        if let Some(count) = y.last_mut() {
                            *count += 1;
                        }
                    }
                    _ => {
                        x.push(value);
                        y.push(1);
                    }
                }
            }
            Series::new(album_id, x_label, y_label, x, y)
        })
        .collect();

    Chart {
        title: "Number of votes for each rating".to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        series,
    }
}

/// Mean rating per calendar day of `event_time`, per album, sorted by date
pub fn mean_rating_over_time<'a>(
    events: impl IntoIterator<Item = &'a RatingEvent>,
) -> Chart<NaiveDate, f64> {
    let (x_label, y_label) = ("Date", "Rating (mean)");
    let series = group_by_album(events)
        .into_iter()
        .map(|(album_id, group)| {
            let mut per_day: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
            for event in group {
                let entry = per_day.entry(event.event_time.date()).or_insert((0.0, 0));
                entry.0 += event.rating;
                entry.1 += 1;
            }
            let (x, y): (Vec<NaiveDate>, Vec<f64>) = per_day
                .into_iter()
                .map(|(date, (sum, count))| (date, sum / f64::from(count)))
                .unzip();
            Series::new(album_id, x_label, y_label, x, y)
        })
        .collect();

    Chart {
        title: "Mean rating over the course of the year".to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        series,
    }
}

/// `album id -> album name` for the two sides of a comparison
pub fn album_names(comparison: &Comparison) -> HashMap<AlbumId, String> {
    [&comparison.first.metadata, &comparison.second.metadata]
        .into_iter()
        .map(|metadata| (metadata.album_id, metadata.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_event_time;

    fn vote(album_id: AlbumId, rating: f64, when: &str) -> RatingEvent {
        RatingEvent {
            album_id,
            rating,
            event_time: parse_event_time(when).unwrap(),
        }
    }

    fn sample_votes() -> Vec<RatingEvent> {
        vec![
            vote(2, 4.0, "2020-01-02 10:00:00"),
            vote(1, 3.0, "2020-01-01 09:00:00"),
            vote(2, 4.0, "2020-01-01 23:59:59"),
            vote(1, 5.0, "2020-01-01 18:30:00"),
            vote(2, 2.5, "2020-01-02 11:00:00"),
        ]
    }

    #[test]
    fn test_histogram_counts_per_value() {
        let votes = sample_votes();
        let chart = ratings_histogram(&votes);

        assert_eq!(chart.series.len(), 2);
        // first appearance order
        assert_eq!(chart.series[0].album_id, 2);
        assert_eq!(chart.series[0].x, vec![2.5, 4.0]);
        assert_eq!(chart.series[0].y, vec![1, 2]);
        assert_eq!(chart.series[1].x, vec![3.0, 5.0]);
        assert_eq!(chart.series[1].y, vec![1, 1]);
    }

    #[test]
    fn test_mean_over_time_groups_by_calendar_day() {
        let votes = sample_votes();
        let chart = mean_rating_over_time(&votes);

        let album_2 = &chart.series[0];
        assert_eq!(
            album_2.x,
            vec![
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()
            ]
        );
        assert_eq!(album_2.y, vec![4.0, 3.25]);

        let album_1 = &chart.series[1];
        assert_eq!(album_1.x.len(), 1);
        assert_eq!(album_1.y, vec![4.0]);
    }

    #[test]
    fn test_mean_over_time_uses_local_date_of_offset_timestamps() {
        let votes = vec![
            vote(1, 4.0, "2020-12-31T23:30:00-02:00"),
            vote(1, 2.0, "2020-12-31T08:00:00+09:00"),
        ];
        let chart = mean_rating_over_time(&votes);

        assert_eq!(
            chart.series[0].x,
            vec![NaiveDate::from_ymd_opt(2020, 12, 31).unwrap()]
        );
        assert_eq!(chart.series[0].y, vec![3.0]);
    }

    #[test]
    fn test_series_start_with_raw_ids() {
        let votes = sample_votes();
        let chart = ratings_histogram(&votes);
        let series = &chart.series[0];
        assert_eq!(series.name, "2");
        assert_eq!(series.legendgroup, "2");
        assert_eq!(
            series.hovertemplate,
            "Album=2<br>Rating=%{x}<br>Number of votes=%{y}<extra></extra>"
        );
    }

    #[test]
    fn test_relabel_replaces_every_raw_id() {
        let votes = sample_votes();
        let mut chart = mean_rating_over_time(&votes);
        let names = HashMap::from([(1, "Album X".to_string()), (2, "Album Y".to_string())]);
        chart.relabel(&names);

        for series in &chart.series {
            let expected = &names[&series.album_id];
            assert_eq!(&series.name, expected);
            assert_eq!(&series.legendgroup, expected);
            assert!(series.hovertemplate.starts_with(&format!("Album={expected}<br>")));
            assert!(!series.hovertemplate.contains(&format!("Album={}<br>", series.album_id)));
        }
        assert_eq!(
            chart.series[0].hovertemplate,
            "Album=Album Y<br>Date=%{x}<br>Rating (mean)=%{y}<extra></extra>"
        );
    }

    #[test]
    fn test_relabel_does_not_touch_longer_ids() {
        let mut series = Series::new(1, "Rating", "Number of votes", vec![1.0], vec![1u64]);
        series.hovertemplate = "Album=12<br>Album=1<br>".to_string();
        series.relabel("One");
        assert_eq!(series.hovertemplate, "Album=12<br>Album=One<br>");
    }

    #[test]
    fn test_same_album_twice_is_one_series() {
        let votes = vec![vote(7, 3.0, "2020-02-02"), vote(7, 4.0, "2020-02-02")];
        let doubled: Vec<&RatingEvent> = votes.iter().chain(votes.iter()).collect();
        let chart = ratings_histogram(doubled);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].y, vec![2, 2]);
    }
}
