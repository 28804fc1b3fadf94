//! Shared HTTP utilities for gateway implementations.

/// Pulls the `message` field out of a GitHub JSON error body.
pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

/// Pulls the `documentation_url` field out of a GitHub JSON error body.
pub(super) fn extract_documentation_url(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("documentation_url")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
