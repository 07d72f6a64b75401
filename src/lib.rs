//! # Normateca
//!
//! An in-memory indexing and retrieval engine for Spanish legal documents
//! (resoluciones, decretos, leyes, tutelas).
//!
//! Normateca fetches a manifest of JSON records over HTTP, classifies each
//! document by a content-derived type label, builds an inverted token index
//! over four searchable fields, and serves ranked substring/token search
//! with type filtering. Nothing persists: the corpus lives in memory for
//! the lifetime of the process.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌─────────────────┐
//! │ RecordSource │──▶│   Ingest     │──▶│     Catalog      │
//! │ HTTP/static  │   │ classify +   │   │ store + token    │
//! └──────────────┘   │ store+index  │   │ index            │
//!                    └──────────────┘   └───────┬─────────┘
//!                                               │ read-only
//!                                               ▼
//!                                        ┌──────────────┐
//!                                        │ Query engine │
//!                                        │ index →      │
//!                                        │ fallback scan│
//!                                        └──────────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. A [`sources::RecordSource`] supplies the manifest (ordered locators)
//!    and one [`models::RawRecord`] per locator.
//! 2. The **ingestion pipeline** ([`ingest`]) fetches records concurrently,
//!    classifies each one ([`classify`]), and inserts it into the
//!    [`catalog::Catalog`] as an atomic store-plus-index unit. Failures
//!    skip the record and are counted in the [`models::IngestReport`].
//! 3. The **query engine** ([`query`]) runs an indexed multi-field lookup,
//!    falls back to a linear substring scan when the index yields nothing,
//!    filters by type, ranks by field-match count, and truncates.
//! 4. Results are exposed via the `normateca` CLI, including an
//!    interactive loop ([`repl`]).
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`models`] | Core data types: `RawRecord`, `Document`, `DocType`, `IngestReport` |
//! | [`classify`] | Document-type classification heuristics |
//! | [`catalog`] | Document store plus search index, single-writer context |
//! | [`index`] | `SearchIndex` trait and the bundled inverted `TokenIndex` |
//! | [`ingest`] | Concurrent fetch and atomic classify → store → index |
//! | [`query`] | Query execution, fallback scan, ranking, truncation |
//! | [`sources`] | `RecordSource` trait, HTTP and static implementations |
//! | [`progress`] | Ingestion progress reporting on stderr |
//! | [`auth`] | Static credential gate for the interactive session |
//! | [`repl`] | Interactive search loop and result rendering |

pub mod auth;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod index;
pub mod ingest;
pub mod models;
pub mod progress;
pub mod query;
pub mod repl;
pub mod sources;
