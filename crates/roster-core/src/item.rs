#![forbid(unsafe_code)]

//! Catalog item and wire envelope types.
//!
//! The upstream catalog service returns pages shaped as
//! `{ "data": { "results": [ ... ] } }`. The envelope types mirror that
//! shape exactly so a page can be decoded with serde and handed to the
//! pagination state without reshaping.
//!
//! `is_favorite` is a client-side flag: the upstream never sends it, so it
//! defaults to `false` on deserialization and is only mutated by the
//! ordering functions in [`crate::ordering`].

use serde::{Deserialize, Serialize};

/// One entry in the catalog.
///
/// `id` is stable and unique within the upstream catalog; it is the only
/// key used for toggling and removal. Display fields beyond `name` are
/// opaque to the core logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable upstream identifier.
    pub id: u64,
    /// Display name; favorite ordering compares this case-sensitively.
    pub name: String,
    /// Opaque display text, empty when the upstream omits it.
    #[serde(default)]
    pub description: String,
    /// Client-side favorite flag; never present on the wire.
    #[serde(default)]
    pub is_favorite: bool,
}

impl CatalogItem {
    /// Create an item with the given id and name and no favorite flag.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            is_favorite: false,
        }
    }

    /// Builder-style description setter.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Top-level wire envelope: `{ "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEnvelope {
    pub data: CatalogData,
}

/// Inner payload: `{ "results": [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogData {
    pub results: Vec<CatalogItem>,
}

impl CatalogEnvelope {
    /// Wrap a batch of items in the wire shape.
    #[must_use]
    pub fn from_results(results: Vec<CatalogItem>) -> Self {
        Self {
            data: CatalogData { results },
        }
    }

    /// Unwrap the envelope into its item batch.
    #[must_use]
    pub fn into_results(self) -> Vec<CatalogItem> {
        self.data.results
    }
}
