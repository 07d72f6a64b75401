//! Inverted token index over the searchable document fields.
//!
//! The query engine only sees the [`SearchIndex`] trait, so the tokenizer
//! and index layout can be swapped without touching retrieval. The bundled
//! implementation is [`TokenIndex`], a per-field token → document-id map.
//!
//! Four fields are indexed independently: body text, filename, PDF link,
//! and the type label. A document matching a query in N distinct fields is
//! reported once with a field count of N, which the query engine uses as
//! its raw relevance weight.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::Document;

/// A single index hit: a document plus the number of distinct fields in
/// which the query matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHit {
    pub doc_id: String,
    pub field_count: u32,
}

/// Token/field index abstraction.
///
/// `search` never errors: no match, an empty query, and an empty index all
/// yield an empty vec. Object-safe so the catalog can hold
/// `Box<dyn SearchIndex>`.
pub trait SearchIndex: Send + Sync {
    /// Register a document's searchable fields. Empty field values index to
    /// nothing; that is not an error.
    fn add_document(&mut self, doc: &Document);

    /// Drop every entry for a document, across all fields.
    fn remove_document(&mut self, doc_id: &str);

    /// Look the query up across all indexed fields independently.
    ///
    /// Within a field, every query token must be present for the field to
    /// match. Hits come back in ascending identifier order, one per
    /// document, with `field_count` set to the number of matching fields.
    fn search(&self, term: &str) -> Vec<IndexHit>;
}

/// Number of searchable fields per document.
const FIELDS: usize = 4;

/// In-memory inverted index: one token → document-id map per field.
#[derive(Debug, Default)]
pub struct TokenIndex {
    fields: [BTreeMap<String, BTreeSet<String>>; FIELDS],
}

impl TokenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn field_values(doc: &Document) -> [&str; FIELDS] {
        [&doc.text, &doc.filename, &doc.pdf_url, doc.doc_type.as_str()]
    }
}

impl SearchIndex for TokenIndex {
    fn add_document(&mut self, doc: &Document) {
        for (postings, value) in self.fields.iter_mut().zip(Self::field_values(doc)) {
            for token in tokenize(value) {
                postings.entry(token).or_default().insert(doc.id.clone());
            }
        }
    }

    fn remove_document(&mut self, doc_id: &str) {
        for postings in self.fields.iter_mut() {
            for ids in postings.values_mut() {
                ids.remove(doc_id);
            }
            postings.retain(|_, ids| !ids.is_empty());
        }
    }

    fn search(&self, term: &str) -> Vec<IndexHit> {
        let tokens = tokenize(term);
        if tokens.is_empty() {
            return Vec::new();
        }

        // BTreeMap keeps the aggregation in identifier order, so equal-count
        // hits come out deterministically.
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();

        for postings in &self.fields {
            let mut matched: Option<BTreeSet<&str>> = None;
            for token in &tokens {
                let ids = match postings.get(token) {
                    Some(ids) => ids.iter().map(String::as_str).collect::<BTreeSet<&str>>(),
                    None => {
                        matched = None;
                        break;
                    }
                };
                matched = Some(match matched {
                    Some(acc) => acc.intersection(&ids).copied().collect(),
                    None => ids,
                });
                if matched.as_ref().is_some_and(|ids| ids.is_empty()) {
                    break;
                }
            }
            for id in matched.unwrap_or_default() {
                *counts.entry(id).or_insert(0) += 1;
            }
        }

        counts
            .into_iter()
            .map(|(doc_id, field_count)| IndexHit {
                doc_id: doc_id.to_string(),
                field_count,
            })
            .collect()
    }
}

/// Split into lowercase alphanumeric tokens, folding Spanish accented
/// vowels so "resolución" and "resolucion" index identically.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.chars().map(fold_accent).collect())
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' => 'a',
        'é' => 'e',
        'í' => 'i',
        'ó' => 'o',
        'ú' | 'ü' => 'u',
        _ => c,
    }
}
