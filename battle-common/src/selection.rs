//! Display name to album id resolution

use std::collections::HashMap;

use serde::Serialize;

use crate::dataset::{AlbumDirectory, AlbumId};
use crate::{Error, Result};

/// Two albums chosen for one comparison; they may be the same album
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub first: AlbumId,
    pub second: AlbumId,
}

impl Selection {
    pub fn new(first: AlbumId, second: AlbumId) -> Self {
        Self { first, second }
    }
}

/// Dropdown contents plus the `name -> id` dictionary behind them
#[derive(Debug, Clone, Default)]
pub struct AlbumLookup {
    names: Vec<String>,
    ids: HashMap<String, AlbumId>,
}

impl AlbumLookup {
    /// Build from the directory. Duplicate display names are not rejected:
    /// the later row's id wins, and the name is listed once per row.
    pub fn from_directory(directory: &AlbumDirectory) -> Self {
        let mut names = Vec::with_capacity(directory.len());
        let mut ids = HashMap::with_capacity(directory.len());
        for entry in &directory.entries {
            names.push(entry.artist_name.clone());
            ids.insert(entry.artist_name.clone(), entry.album_id);
        }
        Self { names, ids }
    }

    /// Every display name, in source file order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn resolve(&self, name: &str) -> Result<AlbumId> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("album {:?}", name)))
    }

    /// Resolve both names; the first failure ends the lookup
    pub fn resolve_pair(&self, first: &str, second: &str) -> Result<Selection> {
        Ok(Selection::new(self.resolve(first)?, self.resolve(second)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DirectoryEntry;

    fn directory(rows: &[(&str, AlbumId)]) -> AlbumDirectory {
        AlbumDirectory::new(
            rows.iter()
                .map(|(name, id)| DirectoryEntry {
                    artist_name: name.to_string(),
                    album_id: *id,
                })
                .collect(),
        )
    }

    #[test]
    fn test_names_keep_source_order() {
        let lookup = AlbumLookup::from_directory(&directory(&[
            ("Zeta - Last", 3),
            ("Alpha - First", 1),
            ("Mid - Middle", 2),
        ]));
        assert_eq!(lookup.names(), ["Zeta - Last", "Alpha - First", "Mid - Middle"]);
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let lookup = AlbumLookup::from_directory(&directory(&[("Artist A - Album X", 1)]));
        assert_eq!(lookup.resolve("Artist A - Album X").unwrap(), 1);
        assert!(matches!(lookup.resolve("Nobody - Nothing"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let lookup = AlbumLookup::from_directory(&directory(&[("Same - Name", 1), ("Same - Name", 2)]));
        assert_eq!(lookup.resolve("Same - Name").unwrap(), 2);
        assert_eq!(lookup.names().len(), 2);
    }

    #[test]
    fn test_resolve_pair_allows_same_album() {
        let lookup = AlbumLookup::from_directory(&directory(&[("A - X", 1), ("B - Y", 2)]));
        assert_eq!(lookup.resolve_pair("A - X", "A - X").unwrap(), Selection::new(1, 1));
        assert_eq!(lookup.resolve_pair("B - Y", "A - X").unwrap(), Selection::new(2, 1));
    }

    #[test]
    fn test_resolve_pair_fails_on_either_side() {
        let lookup = AlbumLookup::from_directory(&directory(&[("A - X", 1)]));
        assert!(lookup.resolve_pair("A - X", "missing").is_err());
        assert!(lookup.resolve_pair("missing", "A - X").is_err());
    }
}
