//! Session log export.

use crate::tracker::TrialRecord;

const CSV_HEADER: &str = "question,correct_answer,user_answer,correct,time_taken,difficulty,operation";

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn escape_csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render trials as CSV, one row per trial in log order.
pub fn to_csv(trials: &[TrialRecord]) -> String {
    let mut lines = Vec::with_capacity(trials.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for t in trials {
        lines.push(format!(
            "{},{},{},{},{},{},{}",
            escape_csv_field(t.question()),
            t.correct_answer(),
            t.submitted_answer(),
            t.is_correct(),
            t.elapsed_secs(),
            t.difficulty(),
            t.operation()
        ));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render trials as a pretty JSON array.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json(trials: &[TrialRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(trials)
}
