//! Classification of raw response bodies.
//!
//! Flickr answers most failures with HTTP 200 and a JSON body carrying
//! `"stat": "fail"`, and occasionally with an HTML error page. Everything
//! that is not an authoritative answer is treated as transient.

use serde_json::Value;
use tracing::error;

/// Outcome of parsing a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// Parsed envelope with `"stat": "ok"`.
    Ok(Value),
    /// Anything else. `retryable` is false only for authoritative answers.
    Failed { retryable: bool, message: String },
}

impl Classified {
    fn retry(message: impl Into<String>) -> Self {
        Classified::Failed {
            retryable: true,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Classified::Ok(_))
    }
}

/// Marker of an HTML page returned in place of JSON. Only checked once
/// the body has failed to parse.
const HTML_MARKER: &str = "<html";

/// Substring Flickr uses for missing entities.
const NOT_FOUND: &str = "not found";

/// Parse a response body for the call identified by `key`.
pub fn classify(body: Option<&str>, key: &str) -> Classified {
    let body = match body {
        Some(b) if !b.trim().is_empty() => b.replace("\\'", "'"),
        _ => {
            error!(key, "Call returned an empty body");
            return Classified::retry("empty response");
        }
    };

    let json: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) if body.to_ascii_lowercase().contains(HTML_MARKER) => {
            error!(key, "Flickr returned HTML instead of JSON");
            return Classified::retry("HTML response instead of JSON");
        }
        Err(e) => {
            error!(key, error = %e, "Response is not valid JSON");
            return Classified::retry(format!("invalid JSON: {}", e));
        }
    };

    if json.is_null() {
        error!(key, "Call returned null");
        return Classified::retry("null response");
    }

    match json.get("stat").and_then(Value::as_str) {
        Some("ok") => Classified::Ok(json),
        Some("fail") => {
            let message = json
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let code = json.get("code").and_then(Value::as_i64);
            error!(key, code, message = %message, "Call failed");

            Classified::Failed {
                retryable: !message.contains(NOT_FOUND),
                message,
            }
        }
        other => {
            error!(key, stat = ?other, "Call returned unrecognized status");
            Classified::Failed {
                retryable: false,
                message: format!("unrecognized status {:?}", other),
            }
        }
    }
}
