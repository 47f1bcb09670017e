#![forbid(unsafe_code)]

//! Catalog source seam and fixture implementation.
//!
//! [`CatalogSource`] is the only interface the screen knows about the
//! remote catalog: hand it an offset, get a batch back. The contract is
//! the pagination cursor's: the source returns items that come logically
//! after `offset` previously returned items, with the page size being the
//! source's own concern. A call always resolves, either with a batch or
//! with a [`CatalogError`]; the screen performs no retry.
//!
//! [`FixtureSource`] is the deterministic stand-in used by the harness and
//! tests: a fixed roster served in constant-size pages, optionally decoded
//! from a JSON document in the wire-envelope shape.

use std::fmt;

use crate::item::{CatalogEnvelope, CatalogItem};

/// Default fixture page size, matching the upstream catalog's default.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Failure modes of a catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The transport failed or timed out.
    Transport(String),
    /// The response arrived but did not decode.
    Decode(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "catalog transport failed: {msg}"),
            Self::Decode(msg) => write!(f, "catalog response did not decode: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// A paged catalog of items, addressed by a previously-returned-count
/// cursor.
pub trait CatalogSource: Send + Sync {
    /// Fetch the page after `offset` previously returned items.
    ///
    /// An offset at or past the end of the catalog yields an empty batch,
    /// not an error.
    fn fetch(&self, offset: usize) -> Result<Vec<CatalogItem>, CatalogError>;
}

/// In-memory catalog serving a fixed roster in constant-size pages.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    roster: Vec<CatalogItem>,
    page_size: usize,
}

impl FixtureSource {
    /// Serve the given roster with the default page size.
    #[must_use]
    pub fn new(roster: Vec<CatalogItem>) -> Self {
        Self {
            roster,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Decode a roster from a JSON document in the wire-envelope shape
    /// (`{ "data": { "results": [...] } }`).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let envelope: CatalogEnvelope =
            serde_json::from_str(json).map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(Self::new(envelope.into_results()))
    }

    /// Generate a synthetic roster of `len` items, `item-000`-style names.
    #[must_use]
    pub fn synthetic(len: usize) -> Self {
        let roster = (0..len)
            .map(|i| CatalogItem::new(i as u64, format!("item-{i:03}")))
            .collect();
        Self::new(roster)
    }

    /// Total number of items in the fixture.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Whether the fixture is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }
}

impl CatalogSource for FixtureSource {
    fn fetch(&self, offset: usize) -> Result<Vec<CatalogItem>, CatalogError> {
        let start = offset.min(self.roster.len());
        let end = start.saturating_add(self.page_size).min(self.roster.len());
        Ok(self.roster[start..end].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_constant_size_until_the_tail() {
        let source = FixtureSource::synthetic(45).with_page_size(20);
        assert_eq!(source.fetch(0).unwrap().len(), 20);
        assert_eq!(source.fetch(20).unwrap().len(), 20);
        assert_eq!(source.fetch(40).unwrap().len(), 5);
    }

    #[test]
    fn past_the_end_is_empty_not_an_error() {
        let source = FixtureSource::synthetic(5).with_page_size(20);
        assert_eq!(source.fetch(5).unwrap(), Vec::new());
        assert_eq!(source.fetch(500).unwrap(), Vec::new());
    }

    #[test]
    fn offset_is_a_skip_count() {
        let source = FixtureSource::synthetic(10).with_page_size(3);
        let page = source.fetch(4).unwrap();
        assert_eq!(page[0].id, 4);
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn from_json_decodes_the_wire_envelope() {
        let json = r#"{"data":{"results":[{"id":1,"name":"Aegis"},{"id":2,"name":"Blur"}]}}"#;
        let source = FixtureSource::from_json(json).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(source.fetch(1).unwrap()[0].name, "Blur");
    }

    #[test]
    fn from_json_surfaces_decode_errors() {
        let err = FixtureSource::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
