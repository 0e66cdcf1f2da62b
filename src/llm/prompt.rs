// Summary prompt construction.
//
// Serializes a bounded slice of the filtered records into a fixed
// natural-language instruction for the text-generation model. The bound
// caps prompt size and cost regardless of how many picks matched.

use crate::stats::DraftRecord;

/// Maximum number of records embedded in a summary prompt.
pub const MAX_SUMMARY_RECORDS: usize = 5;

/// Default instruction preceding the serialized records. Overridable via
/// `llm.instruction` in settings.toml.
pub const DEFAULT_INSTRUCTION: &str =
    "You are a basketball historian. Provide a short, factual summary of the \
     following NBA draft picks: the teams involved, where the players were \
     drafted, and any notable context. Do not speculate beyond the data \
     provided.";

/// Build the summary prompt from the filtered records.
///
/// At most the first `MAX_SUMMARY_RECORDS` records are embedded, serialized
/// as a JSON array after the instruction text. Records beyond the bound are
/// dropped silently; an empty input produces an empty array.
pub fn build_summary_prompt(records: &[DraftRecord], instruction: &str) -> String {
    let bounded: Vec<&serde_json::Map<String, serde_json::Value>> = records
        .iter()
        .take(MAX_SUMMARY_RECORDS)
        .map(|r| &r.fields)
        .collect();

    // Serialization of Map<String, Value> cannot fail.
    let serialized = serde_json::to_string(&bounded).unwrap_or_else(|_| "[]".to_string());

    format!("{instruction}\n\n{serialized}")
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
