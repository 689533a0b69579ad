//! On-disk shape of the catalog document.
//!
//! Written as `{"movies": [...], "nextId": N, "lastUpdated": "..."}`. Older
//! files are either a bare array of movies or the wrapped object without
//! `nextId`, both are still accepted on read.

use crate::catalog::{MovieId, MovieRecord};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub movies: Vec<MovieRecord>,
    pub next_id: MovieId,
}

impl CatalogSnapshot {
    /// Builds a snapshot whose `next_id` is above every loaded id, whatever
    /// the stored counter says.
    pub fn new(movies: Vec<MovieRecord>, stored_next_id: Option<MovieId>) -> Self {
        let after_max = movies.iter().map(|m| m.id.saturating_add(1)).max().unwrap_or(1);
        let next_id = stored_next_id.unwrap_or(1).max(after_max);
        CatalogSnapshot { movies, next_id }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoredCatalogRef<'a> {
    movies: &'a [MovieRecord],
    next_id: MovieId,
    last_updated: String,
}

impl<'a> StoredCatalogRef<'a> {
    pub(super) fn new(movies: &'a [MovieRecord], next_id: MovieId) -> Self {
        StoredCatalogRef {
            movies,
            next_id,
            last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum StoredCatalog {
    Bare(Vec<MovieRecord>),
    Wrapped {
        #[serde(default)]
        movies: Vec<MovieRecord>,
        #[serde(default, rename = "nextId")]
        next_id: Option<MovieId>,
    },
}

impl StoredCatalog {
    pub(super) fn into_snapshot(self) -> CatalogSnapshot {
        match self {
            StoredCatalog::Bare(movies) => CatalogSnapshot::new(movies, None),
            StoredCatalog::Wrapped { movies, next_id } => CatalogSnapshot::new(movies, next_id),
        }
    }
}
