//! XML envelope for retrieval results.
//!
//! Retrieval output goes back to the model as a lightweight XML
//! document rather than JSON. The format is positional and flat:
//! the original query, then one `<document>` per hit in rank order,
//! each with its content and any metadata entries.

use neospan_core::ScoredDocument;
use std::fmt::Write;

/// Envelope returned when the retriever finds nothing.
pub const EMPTY_RESULTS: &str = "<results>No relevant documents found.</results>";

/// Render ranked documents as an XML envelope.
///
/// Document ids are 1-based rank positions. Metadata values are
/// rendered with their JSON serialization, except strings which are
/// inlined bare. An empty result set collapses to [`EMPTY_RESULTS`]
/// with no query echo.
pub fn format_as_xml(documents: &[ScoredDocument], query: &str) -> String {
    if documents.is_empty() {
        return EMPTY_RESULTS.to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "<query>{query}</query>");
    out.push_str("<results>");

    for (i, doc) in documents.iter().enumerate() {
        let _ = write!(out, "\n<document id='{}'>", i + 1);
        let _ = write!(out, "\n<content>{}</content>", doc.content);
        if !doc.metadata.is_empty() {
            out.push_str("\n<metadata>");
            for (key, value) in &doc.metadata {
                match value.as_str() {
                    Some(s) => {
                        let _ = write!(out, "\n<{key}>{s}</{key}>");
                    }
                    None => {
                        let _ = write!(out, "\n<{key}>{value}</{key}>");
                    }
                }
            }
            out.push_str("\n</metadata>");
        }
        out.push_str("\n</document>");
    }

    out.push_str("\n</results>");
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_results_message() {
        assert_eq!(format_as_xml(&[], "any query"), EMPTY_RESULTS);
        // No query echo on the empty path.
        assert!(!format_as_xml(&[], "sharks").contains("sharks"));
    }

    #[test]
    fn test_single_document_without_metadata() {
        let docs = vec![ScoredDocument::new("a shark terrorizes a beach town")];
        let xml = format_as_xml(&docs, "shark movie");
        assert!(xml.starts_with("<query>shark movie</query>"));
        assert!(xml.contains("<document id='1'>"));
        assert!(xml.contains("<content>a shark terrorizes a beach town</content>"));
        assert!(!xml.contains("<metadata>"));
        assert!(xml.ends_with("</results>"));
    }

    #[test]
    fn test_metadata_entries_are_inlined() {
        let docs = vec![
            ScoredDocument::new("plot")
                .with_metadata("title", json!("Jaws"))
                .with_metadata("year", json!(1975)),
        ];
        let xml = format_as_xml(&docs, "q");
        assert!(xml.contains("<metadata>"));
        assert!(xml.contains("<title>Jaws</title>"));
        assert!(xml.contains("<year>1975</year>"));
    }

    #[test]
    fn test_document_ids_follow_rank_order() {
        let docs = vec![
            ScoredDocument::new("first").with_score(0.9),
            ScoredDocument::new("second").with_score(0.5),
        ];
        let xml = format_as_xml(&docs, "q");
        let first = xml.find("<document id='1'>").unwrap();
        let second = xml.find("<document id='2'>").unwrap();
        assert!(first < second);
    }
}
