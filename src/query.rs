//! Query execution: indexed lookup, substring fallback, ranking, truncation.
//!
//! The engine reads (never writes) the catalog. Algorithm:
//!
//! 1. Trim the term; under the minimum length it is a distinct `TooShort`
//!    outcome, not an empty match set.
//! 2. Index lookup; surviving hits accumulate a score equal to the number
//!    of fields they matched in.
//! 3. Only when the indexed path yields nothing, fall back to a linear
//!    case-insensitive substring scan over body text and filename, with a
//!    uniform score of 1.
//! 4. Sort by score descending, ascending identifier on ties.
//! 5. Truncate to the result limit.
//!
//! "No results" is a normal, representable outcome; nothing in this module
//! returns an error.

use std::collections::{BTreeMap, HashSet};

use crate::catalog::Catalog;
use crate::models::{DocType, Document};

/// Retrieval tuning parameters, decoupled from application config.
#[derive(Debug, Clone, Copy)]
pub struct QueryParams {
    /// Maximum results to return.
    pub result_limit: usize,
    /// Minimum query length in characters, after trimming.
    pub min_query_chars: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            result_limit: 30,
            min_query_chars: 2,
        }
    }
}

/// The currently selected document types.
///
/// An empty filter matches everything. That mirrors the observed behavior
/// of the original page (no checked box behaves like no filter at all) and
/// is kept deliberately; there is no way to express "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter(HashSet<DocType>);

impl TypeFilter {
    /// The unrestricted filter.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, doc_type: DocType) -> bool {
        self.0.is_empty() || self.0.contains(&doc_type)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected labels in a stable order, for display.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> =
            self.0.iter().map(DocType::as_str).collect();
        labels.sort_unstable();
        labels
    }
}

impl FromIterator<DocType> for TypeFilter {
    fn from_iter<I: IntoIterator<Item = DocType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One ranked result: the document and its raw relevance score.
///
/// For indexed hits the score is the field-match count; fallback hits
/// always score 1. No normalization is applied.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub document: Document,
    pub score: u32,
}

/// Outcome of a query. `TooShort` and `Empty` are distinct states.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The trimmed term was under the minimum length.
    TooShort,
    /// A well-formed query that matched nothing.
    Empty,
    /// Ranked, truncated results.
    Results(Vec<SearchHit>),
}

/// Execute one query against the catalog.
pub fn execute_query(
    catalog: &Catalog,
    term: &str,
    filter: &TypeFilter,
    params: &QueryParams,
) -> QueryOutcome {
    let term = term.trim();
    if term.chars().count() < params.min_query_chars {
        return QueryOutcome::TooShort;
    }

    // BTreeMap keeps accumulation deterministic regardless of store order.
    let mut scores: BTreeMap<String, u32> = BTreeMap::new();

    if let Some(index) = catalog.search_index() {
        for hit in index.search(term) {
            // The builder keeps store and index consistent; a stray hit is
            // dropped rather than treated as an error.
            let doc = match catalog.store().get(&hit.doc_id) {
                Some(doc) => doc,
                None => continue,
            };
            if !filter.matches(doc.doc_type) {
                continue;
            }
            *scores.entry(hit.doc_id).or_insert(0) += hit.field_count;
        }
    }

    // Fallback scan, only when the indexed path came up empty. An absent
    // index lands here too (index-less mode).
    if scores.is_empty() {
        let needle = term.to_lowercase();
        for doc in catalog.store().iter() {
            if !filter.matches(doc.doc_type) {
                continue;
            }
            if doc.text.to_lowercase().contains(&needle)
                || doc.filename.to_lowercase().contains(&needle)
            {
                scores.insert(doc.id.clone(), 1);
            }
        }
    }

    let mut hits: Vec<SearchHit> = scores
        .into_iter()
        .filter_map(|(id, score)| {
            catalog.store().get(&id).map(|doc| SearchHit {
                document: doc.clone(),
                score,
            })
        })
        .collect();

    // Score descending; ascending identifier breaks ties deterministically.
    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.document.id.cmp(&b.document.id))
    });
    hits.truncate(params.result_limit);

    if hits.is_empty() {
        QueryOutcome::Empty
    } else {
        QueryOutcome::Results(hits)
    }
}
