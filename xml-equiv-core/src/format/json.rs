use serde_json::json;

use crate::compare::result::Mismatch;

/// Format a comparison outcome as JSON, embedding the full divergent nodes.
pub fn format_json(result: &Option<Mismatch<'_>>) -> String {
    let value = match result {
        None => json!({ "equivalent": true }),
        Some(mismatch) => json!({
            "equivalent": false,
            "left": mismatch.left,
            "right": mismatch.right,
        }),
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}
