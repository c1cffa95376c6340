//! The track metadata table.
//!
//! The catalog is a read-only CSV sidecar of the prebuilt vector index: one
//! row per indexed track, keyed by row position. A derived `searchq` column
//! ("song artist", trimmed and lowercased) backs autocomplete; it is computed
//! at load time for files that do not carry it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Autocomplete only fires once the input is longer than this.
const SUGGEST_MIN_CHARS: usize = 3;

/// One row of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub song: String,
    pub artist: String,
    pub text: String,
    #[serde(default)]
    pub searchq: Option<String>,
}

impl TrackRecord {
    #[must_use]
    pub fn new(song: impl Into<String>, artist: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            song: song.into(),
            artist: artist.into(),
            text: text.into(),
            searchq: None,
        }
    }

    fn derived_searchq(&self) -> String {
        format!("{} {}", self.song, self.artist).trim().to_lowercase()
    }
}

/// In-memory track catalog, keyed by vector-index row id.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<TrackRecord>,
}

impl Catalog {
    /// Load the catalog from a CSV file.
    ///
    /// # Errors
    /// Returns an error if the file is missing, malformed, or empty; catalog
    /// loading is a startup-only failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: TrackRecord = row?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(Error::InvalidData(format!(
                "catalog {} contains no tracks",
                path.display()
            )));
        }

        log::info!("Loaded {} tracks from {}", records.len(), path.display());
        Ok(Self::from_records(records))
    }

    /// Build a catalog from in-memory records, deriving `searchq` where absent.
    #[must_use]
    pub fn from_records(records: Vec<TrackRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|mut record| {
                if record.searchq.is_none() {
                    record.searchq = Some(record.derived_searchq());
                }
                record
            })
            .collect();
        Self { records }
    }

    /// Look up a track by its vector-index row key.
    #[must_use]
    pub fn get(&self, key: u64) -> Option<&TrackRecord> {
        self.records.get(key as usize)
    }

    /// Autocomplete suggestions for a partially typed query.
    ///
    /// Returns nothing until the raw input exceeds three characters, then
    /// every distinct `searchq` value with the input as a case-insensitive
    /// prefix, in first-seen order.
    #[must_use]
    pub fn suggest(&self, input: &str) -> Vec<String> {
        if input.chars().count() <= SUGGEST_MIN_CHARS {
            return Vec::new();
        }

        let prefix = input.to_lowercase();
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter_map(|record| record.searchq.as_deref())
            .filter(|searchq| searchq.starts_with(&prefix))
            .filter(|searchq| seen.insert(searchq.to_string()))
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
