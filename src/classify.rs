//! Document-type classification heuristics.
//!
//! A label is derived once, at ingestion time, from the document's filename
//! and body text. The keyword rules are checked in precedence order and the
//! first match wins; anything unrecognized falls through to
//! [`DocType::Unclassified`].

use crate::models::DocType;

/// Classify a document from its filename and body text.
///
/// Pure and total: case-insensitive, no side effects, never fails.
/// "TUTELA" outranks every other keyword, so a tutela ruling that cites a
/// decreto still classifies as `tutela`. "LEY" must appear as a standalone
/// word; substrings of longer words (e.g. "LEYENDA") do not count.
pub fn classify(filename: &str, text: &str) -> DocType {
    let base = format!("{} {}", filename, text).to_uppercase();

    if base.contains("TUTELA") {
        DocType::Tutela
    } else if base.contains("DECRETO") {
        DocType::Decreto
    } else if base.contains("RESOLUCIÓN") || base.contains("RESOLUCION") {
        DocType::Resolucion
    } else if contains_word(&base, "LEY") {
        DocType::Ley
    } else {
        DocType::Unclassified
    }
}

/// Whole-word containment: `word` must form a complete alphanumeric token.
fn contains_word(haystack: &str, word: &str) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tutela_wins_over_every_other_keyword() {
        // A tutela citing a decreto, a resolución, and a ley is still a tutela.
        assert_eq!(
            classify(
                "Sentencia.pdf",
                "Acción de tutela contra el Decreto 45, la Resolución 9 y la Ley 100"
            ),
            DocType::Tutela
        );
        assert_eq!(classify("TUTELA-2023-001.pdf", ""), DocType::Tutela);
    }

    #[test]
    fn decreto_beats_resolucion_and_ley() {
        assert_eq!(
            classify("archivo.pdf", "Decreto que modifica la Resolución 12 y la Ley 80"),
            DocType::Decreto
        );
    }

    #[test]
    fn resolucion_matches_with_and_without_accent() {
        assert_eq!(classify("Resolución 456.pdf", ""), DocType::Resolucion);
        assert_eq!(classify("RESOLUCION 456.pdf", ""), DocType::Resolucion);
        assert_eq!(classify("doc.pdf", "la resolución vigente"), DocType::Resolucion);
    }

    #[test]
    fn ley_only_matches_as_a_whole_word() {
        assert_eq!(classify("Ley 100.pdf", ""), DocType::Ley);
        assert_eq!(classify("doc.pdf", "La presente Ley regula"), DocType::Ley);
        // Punctuation-adjacent still counts as a word.
        assert_eq!(classify("doc.pdf", "según la ley."), DocType::Ley);
        // Substrings of longer words do not.
        assert_eq!(classify("doc.pdf", "la leyenda del valle"), DocType::Unclassified);
        assert_eq!(classify("leyes.pdf", ""), DocType::Unclassified);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("", "se expide el decreto 123"), DocType::Decreto);
        assert_eq!(classify("", "SE EXPIDE EL DECRETO 123"), DocType::Decreto);
    }

    #[test]
    fn unmatched_content_degrades_to_unclassified() {
        assert_eq!(classify("acta.pdf", "acta de reunión ordinaria"), DocType::Unclassified);
        assert_eq!(classify("", ""), DocType::Unclassified);
    }

    #[test]
    fn filename_alone_is_enough() {
        assert_eq!(classify("DECRETO 123.pdf", ""), DocType::Decreto);
    }
}
