//! JSON text rendering with an outer failure guard.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use serde_json::Map;

use crate::serialize::options::SerializeOptions;
use crate::serialize::value::Value;
use crate::serialize::walker::serialize;
use crate::serialize::LogValue;

/// Key present in the envelope returned when encoding fails.
pub const ENCODE_FAILURE_KEY: &str = "error";

const ENCODE_FAILURE_TAG: &str = "safe_stringify_failed";

/// Serialize `value` and encode it as JSON with 2-space indentation.
pub fn safe_stringify(value: &Value, options: &SerializeOptions) -> String {
    encode_pretty(&serialize(value, options))
}

/// Encode any `Serialize` value as indented JSON.
///
/// Encoder errors and panics are reported through a fixed envelope,
/// `{"error": "safe_stringify_failed", "detail": ...}`.
pub fn encode_pretty<T: Serialize + ?Sized>(value: &T) -> String {
    let encoded = panic::catch_unwind(AssertUnwindSafe(|| serde_json::to_string_pretty(value)));
    match encoded {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => failure_envelope(&err.to_string()),
        Err(_) => failure_envelope("encoder panicked"),
    }
}

fn failure_envelope(detail: &str) -> String {
    let mut envelope = Map::new();
    envelope.insert(ENCODE_FAILURE_KEY.to_owned(), LogValue::from(ENCODE_FAILURE_TAG));
    envelope.insert("detail".to_owned(), LogValue::from(detail));
    serde_json::to_string_pretty(&envelope)
        .unwrap_or_else(|_| format!("{{\n  \"{ENCODE_FAILURE_KEY}\": \"{ENCODE_FAILURE_TAG}\"\n}}"))
}
