//! Dataset loading with load-once memoization
//!
//! Three flat CSV sources back the whole application:
//! - `artist_to_id.csv`: display name to album id directory
//! - `rating_events.csv`: one row per vote
//! - `top_500_albums.csv`: one metadata row per album
//!
//! [`Datasets`] owns a [`DatasetSource`] and loads each table on first
//! access. Later calls return the same `Arc` without touching storage. There
//! is no invalidation; the data is static for the life of the process.

use std::path::Path;
use std::sync::Arc;

use csv::Reader;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::{Error, Result};

mod models;
pub use models::{
    AlbumCatalog, AlbumDirectory, AlbumId, AlbumMetadata, DirectoryEntry, RatingEvent,
    RatingTable,
};

/// Directory source file name
pub const DIRECTORY_FILE: &str = "artist_to_id.csv";
/// Rating events source file name
pub const RATINGS_FILE: &str = "rating_events.csv";
/// Album metadata source file name
pub const ALBUMS_FILE: &str = "top_500_albums.csv";

/// Where the three tables come from
pub trait DatasetSource: Send + Sync {
    fn load_directory(&self) -> Result<AlbumDirectory>;
    fn load_ratings(&self) -> Result<RatingTable>;
    fn load_albums(&self) -> Result<AlbumCatalog>;

    /// Human readable origin, for logs
    fn describe(&self) -> String;
}

/// CSV files found at `{prefix}{file name}`
///
/// The prefix is concatenated, not joined: `data/` and `data/2020_` are both
/// valid prefixes.
#[derive(Debug, Clone, Default)]
pub struct CsvSource {
    prefix: String,
}

impl CsvSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn path_for(&self, file_name: &str) -> String {
        format!("{}{}", self.prefix, file_name)
    }

    fn read_rows<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.path_for(file_name);
        let rows = read_csv(Path::new(&path)).map_err(|e| Error::csv(&path, e))?;
        info!("Loaded {} rows from {}", rows.len(), path);
        Ok(rows)
    }
}

/// Deserialize every row of a headed CSV file; columns are matched by header
/// name and extra columns are ignored
fn read_csv<T: DeserializeOwned>(path: &Path) -> std::result::Result<Vec<T>, csv::Error> {
    let mut reader = Reader::from_path(path)?;
    reader.deserialize().collect()
}

impl DatasetSource for CsvSource {
    fn load_directory(&self) -> Result<AlbumDirectory> {
        self.read_rows(DIRECTORY_FILE).map(AlbumDirectory::new)
    }

    fn load_ratings(&self) -> Result<RatingTable> {
        self.read_rows(RATINGS_FILE).map(RatingTable::new)
    }

    fn load_albums(&self) -> Result<AlbumCatalog> {
        self.read_rows(ALBUMS_FILE).map(AlbumCatalog::new)
    }

    fn describe(&self) -> String {
        if self.prefix.is_empty() {
            "CSV files in the current directory".to_string()
        } else {
            format!("CSV files with prefix {:?}", self.prefix)
        }
    }
}

/// Tables held in memory, for fixtures and tests
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub directory: Vec<DirectoryEntry>,
    pub ratings: Vec<RatingEvent>,
    pub albums: Vec<AlbumMetadata>,
}

impl DatasetSource for InMemorySource {
    fn load_directory(&self) -> Result<AlbumDirectory> {
        Ok(AlbumDirectory::new(self.directory.clone()))
    }

    fn load_ratings(&self) -> Result<RatingTable> {
        Ok(RatingTable::new(self.ratings.clone()))
    }

    fn load_albums(&self) -> Result<AlbumCatalog> {
        Ok(AlbumCatalog::new(self.albums.clone()))
    }

    fn describe(&self) -> String {
        "in-memory tables".to_string()
    }
}

/// Memoized, read-only handle on the three tables
pub struct Datasets {
    source: Box<dyn DatasetSource>,
    directory: OnceCell<Arc<AlbumDirectory>>,
    ratings: OnceCell<Arc<RatingTable>>,
    albums: OnceCell<Arc<AlbumCatalog>>,
}

impl Datasets {
    /// Wrap a source; nothing is read until the first accessor call
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            directory: OnceCell::new(),
            ratings: OnceCell::new(),
            albums: OnceCell::new(),
        }
    }

    /// CSV files at the given prefix
    pub fn from_csv(prefix: impl Into<String>) -> Self {
        Self::new(CsvSource::new(prefix))
    }

    /// Fixture tables
    pub fn from_tables(
        directory: Vec<DirectoryEntry>,
        ratings: Vec<RatingEvent>,
        albums: Vec<AlbumMetadata>,
    ) -> Self {
        Self::new(InMemorySource {
            directory,
            ratings,
            albums,
        })
    }

    pub fn directory(&self) -> Result<Arc<AlbumDirectory>> {
        self.directory
            .get_or_try_init(|| self.source.load_directory().map(Arc::new))
            .cloned()
    }

    pub fn ratings(&self) -> Result<Arc<RatingTable>> {
        self.ratings
            .get_or_try_init(|| self.source.load_ratings().map(Arc::new))
            .cloned()
    }

    pub fn albums(&self) -> Result<Arc<AlbumCatalog>> {
        self.albums
            .get_or_try_init(|| self.source.load_albums().map(Arc::new))
            .cloned()
    }

    /// Force all three loads, failing on the first error
    pub fn preload(&self) -> Result<()> {
        info!("Loading datasets from {}", self.source.describe());
        let directory = self.directory()?;
        let ratings = self.ratings()?;
        let albums = self.albums()?;
        info!(
            "Datasets ready: {} directory entries, {} rating events, {} albums",
            directory.len(),
            ratings.len(),
            albums.len()
        );
        Ok(())
    }

    /// True once every table has been loaded
    pub fn is_loaded(&self) -> bool {
        self.directory.get().is_some() && self.ratings.get().is_some() && self.albums.get().is_some()
    }
}

impl std::fmt::Debug for Datasets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datasets")
            .field("source", &self.source.describe())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
