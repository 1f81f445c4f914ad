//! Row types and in-memory tables for the three data sources

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time::deserialize_event_time;

/// Album identifier shared by all three sources
pub type AlbumId = i64;

/// One row of `artist_to_id.csv`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DirectoryEntry {
    /// Display string, "Artist - Album"
    pub artist_name: String,
    pub album_id: AlbumId,
}

/// One row of `rating_events.csv`: a single vote
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatingEvent {
    pub album_id: AlbumId,
    pub rating: f64,
    #[serde(deserialize_with = "deserialize_event_time")]
    pub event_time: NaiveDateTime,
}

/// One row of `top_500_albums.csv`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AlbumMetadata {
    pub album_id: AlbumId,
    pub name: String,
    pub artist: String,
    /// Release year as written in the source (kept as text)
    pub date: String,
    /// Aggregate score, distinct from the per-vote distribution
    pub rating: f64,
    #[serde(default)]
    pub genres: String,
}

/// Album directory in source file order
#[derive(Debug, Clone, Default)]
pub struct AlbumDirectory {
    pub entries: Vec<DirectoryEntry>,
}

impl AlbumDirectory {
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All rating events
#[derive(Debug, Clone, Default)]
pub struct RatingTable {
    pub events: Vec<RatingEvent>,
}

impl RatingTable {
    pub fn new(events: Vec<RatingEvent>) -> Self {
        Self { events }
    }

    /// Events for one album, in source order
    pub fn for_album(&self, album_id: AlbumId) -> Vec<&RatingEvent> {
        self.events
            .iter()
            .filter(|event| event.album_id == album_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Album metadata rows
#[derive(Debug, Clone, Default)]
pub struct AlbumCatalog {
    pub albums: Vec<AlbumMetadata>,
}

impl AlbumCatalog {
    pub fn new(albums: Vec<AlbumMetadata>) -> Self {
        Self { albums }
    }

    /// First row carrying `album_id`; duplicates are not deduplicated upstream
    pub fn find(&self, album_id: AlbumId) -> Option<&AlbumMetadata> {
        self.albums.iter().find(|album| album.album_id == album_id)
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}
