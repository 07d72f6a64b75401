//! End-to-end pipeline tests over the library API.
//!
//! Uses a fixed in-memory record source, so no network is involved: the
//! same ingest → catalog → query path the CLI runs, minus the HTTP layer.

use std::sync::Arc;

use normateca::catalog::Catalog;
use normateca::ingest::ingest;
use normateca::models::{DocType, RawRecord};
use normateca::progress::NoProgress;
use normateca::query::{execute_query, QueryOutcome, QueryParams, TypeFilter};
use normateca::sources::{RecordSource, StaticSource};

fn record(archivo: &str, texto: &str) -> RawRecord {
    RawRecord {
        id: None,
        archivo: Some(archivo.to_string()),
        texto: Some(texto.to_string()),
        pdf_url: Some(format!("https://example.com/pdf/{}", archivo)),
    }
}

async fn build(source: StaticSource) -> Catalog {
    let source: Arc<dyn RecordSource> = Arc::new(source);
    let locators = source.fetch_manifest().await.unwrap();
    let mut catalog = Catalog::new();
    ingest(&mut catalog, source, &locators, 4, &NoProgress)
        .await
        .unwrap();
    catalog
}

fn results(outcome: QueryOutcome) -> Vec<(String, DocType, u32)> {
    match outcome {
        QueryOutcome::Results(hits) => hits
            .into_iter()
            .map(|h| (h.document.id, h.document.doc_type, h.score))
            .collect(),
        other => panic!("expected results, got {:?}", other),
    }
}

#[tokio::test]
async fn decreto_and_ley_end_to_end() {
    let mut source = StaticSource::new();
    source.push(
        "decreto-123.json",
        record("DECRETO 123.pdf", "Se expide el Decreto 123 sobre..."),
    );
    source.push(
        "ley-100.json",
        record("Ley 100.pdf", "La presente Ley 100 regula..."),
    );

    let catalog = build(source).await;
    let params = QueryParams::default();

    let hits = results(execute_query(&catalog, "decreto", &TypeFilter::all(), &params));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, "decreto-123.json");
    assert_eq!(hits[0].1, DocType::Decreto);

    let hits = results(execute_query(&catalog, "regula", &TypeFilter::all(), &params));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, "ley-100.json");
    assert_eq!(hits[0].1, DocType::Ley);
}

#[tokio::test]
async fn empty_filter_equals_unfiltered_query() {
    let mut source = StaticSource::new();
    source.push("a.json", record("DECRETO 1.pdf", "norma sobre salud"));
    source.push("b.json", record("Ley 2.pdf", "norma sobre salud"));
    source.push("c.json", record("acta.pdf", "norma sobre salud"));

    let catalog = build(source).await;
    let params = QueryParams::default();

    let unfiltered = results(execute_query(&catalog, "salud", &TypeFilter::all(), &params));
    let explicit: TypeFilter = DocType::ALL.into_iter().collect();
    let all_selected = results(execute_query(&catalog, "salud", &explicit, &params));

    assert_eq!(unfiltered.len(), 3);
    assert_eq!(unfiltered, all_selected);
}

#[tokio::test]
async fn type_filter_narrows_results() {
    let mut source = StaticSource::new();
    source.push("a.json", record("DECRETO 1.pdf", "norma sobre salud"));
    source.push("b.json", record("Ley 2.pdf", "norma sobre salud"));

    let catalog = build(source).await;
    let filter: TypeFilter = [DocType::Decreto].into_iter().collect();

    let hits = results(execute_query(&catalog, "salud", &filter, &QueryParams::default()));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1, DocType::Decreto);
}

#[tokio::test]
async fn too_short_and_empty_are_distinct_states() {
    let mut source = StaticSource::new();
    source.push("a.json", record("acta.pdf", "contenido"));

    let catalog = build(source).await;
    let params = QueryParams::default();

    assert!(matches!(
        execute_query(&catalog, "", &TypeFilter::all(), &params),
        QueryOutcome::TooShort
    ));
    assert!(matches!(
        execute_query(&catalog, "a", &TypeFilter::all(), &params),
        QueryOutcome::TooShort
    ));
    assert!(matches!(
        execute_query(&catalog, "zz", &TypeFilter::all(), &params),
        QueryOutcome::Empty
    ));
}

#[tokio::test]
async fn forty_matches_truncate_to_thirty() {
    let mut source = StaticSource::new();
    for i in 0..40 {
        source.push(
            &format!("doc{:02}.json", i),
            record(&format!("acta-{:02}.pdf", i), "palabra repetida"),
        );
    }

    let catalog = build(source).await;
    let hits = results(execute_query(
        &catalog,
        "repetida",
        &TypeFilter::all(),
        &QueryParams::default(),
    ));
    assert_eq!(hits.len(), 30);
}

#[tokio::test]
async fn double_ingestion_keeps_one_entry_per_identifier() {
    let mut source = StaticSource::new();
    source.push("a.json", record("DECRETO 1.pdf", "texto uno"));
    source.push("b.json", record("Ley 2.pdf", "texto dos"));

    let source_arc: Arc<dyn RecordSource> = Arc::new(source);
    let locators = source_arc.fetch_manifest().await.unwrap();
    let mut catalog = Catalog::new();
    ingest(&mut catalog, Arc::clone(&source_arc), &locators, 4, &NoProgress)
        .await
        .unwrap();
    ingest(&mut catalog, source_arc, &locators, 4, &NoProgress)
        .await
        .unwrap();

    assert_eq!(catalog.store().len(), 2);
    let hits = results(execute_query(
        &catalog,
        "texto",
        &TypeFilter::all(),
        &QueryParams::default(),
    ));
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn broken_records_skip_but_the_rest_survive() {
    let mut source = StaticSource::new();
    source.push("ok.json", record("Resolución 9.pdf", "texto vigente"));
    source.push_missing("roto.json");

    let source_arc: Arc<dyn RecordSource> = Arc::new(source);
    let locators = source_arc.fetch_manifest().await.unwrap();
    let mut catalog = Catalog::new();
    let report = ingest(&mut catalog, source_arc, &locators, 4, &NoProgress)
        .await
        .unwrap();

    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.skipped, 1);

    let hits = results(execute_query(
        &catalog,
        "vigente",
        &TypeFilter::all(),
        &QueryParams::default(),
    ));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1, DocType::Resolucion);
}

#[tokio::test]
async fn fallback_substring_search_reaches_unindexed_terms() {
    let mut source = StaticSource::new();
    // "ódico" is a substring of "periódico", never a standalone token.
    source.push("a.json", record("acta.pdf", "el boletín periódico del consejo"));

    let catalog = build(source).await;
    let hits = results(execute_query(
        &catalog,
        "ódico",
        &TypeFilter::all(),
        &QueryParams::default(),
    ));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].2, 1);
}
