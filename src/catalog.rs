//! The ingestion context: document store plus search index.
//!
//! A [`Catalog`] is built (or mutated) by the ingestion pipeline and read
//! by the query engine. Mutation requires `&mut Catalog` and every insert
//! updates the store and the index together, so a reader can never observe
//! a document without its index entries or vice versa.

use std::collections::HashMap;

use crate::index::{SearchIndex, TokenIndex};
use crate::models::Document;

/// In-memory document store; the single source of truth for retrieval.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: HashMap<String, Document>,
}

impl DocumentStore {
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.docs.get(id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.values()
    }

    fn insert(&mut self, doc: Document) -> Option<Document> {
        self.docs.insert(doc.id.clone(), doc)
    }
}

/// Owns the document store and the (optional) search index.
///
/// A catalog without an index is a degraded-but-valid state: every query
/// falls through to the substring scan. The query engine never sees the
/// difference beyond slower, flatter-scored results.
pub struct Catalog {
    store: DocumentStore,
    index: Option<Box<dyn SearchIndex>>,
}

impl Catalog {
    /// A catalog backed by the bundled [`TokenIndex`].
    pub fn new() -> Self {
        Self::with_index(Box::new(TokenIndex::new()))
    }

    /// A catalog with a caller-supplied index implementation.
    pub fn with_index(index: Box<dyn SearchIndex>) -> Self {
        Self {
            store: DocumentStore::default(),
            index: Some(index),
        }
    }

    /// Index-less catalog: queries run in fallback-only mode.
    pub fn without_index() -> Self {
        Self {
            store: DocumentStore::default(),
            index: None,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn search_index(&self) -> Option<&dyn SearchIndex> {
        self.index.as_deref()
    }

    /// Insert a document and register its searchable fields as one unit.
    ///
    /// Replaces any previous document with the same identifier, dropping
    /// its stale index entries first, so re-ingesting a corpus is
    /// idempotent.
    pub fn insert(&mut self, doc: Document) {
        if let Some(index) = self.index.as_mut() {
            if self.store.get(&doc.id).is_some() {
                index.remove_document(&doc.id);
            }
            index.add_document(&doc);
        }
        self.store.insert(doc);
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
