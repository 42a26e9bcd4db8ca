//! Config redaction: produce safe-to-log config snapshots by masking secrets.

use serde_json::Value;

static SECRET_KEYS: &[&str] = &[
    "api_key",
    "apiKey",
    "admin_key",
    "adminKey",
    "token",
    "secret",
    "password",
];

/// Show the first 4 characters of a secret followed by `***`.
///
/// Short values are fully masked.
pub fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    if s.chars().count() > 8 {
        format!("{}***", s.chars().take(4).collect::<String>())
    } else {
        "***".to_string()
    }
}

/// Redact a config JSON value, masking every sensitive field.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) => Value::String(mask_secret(s)),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_nested_api_key() {
        let v = json!({ "vendor": { "api_key": "ak-abcdef123456", "model": "m" } });
        let redacted = redact(&v);
        assert_eq!(redacted["vendor"]["api_key"], "ak-a***");
        assert_eq!(redacted["vendor"]["model"], "m");
    }

    #[test]
    fn short_secret_fully_masked() {
        let redacted = redact(&json!({ "admin_key": "hunter2" }));
        assert_eq!(redacted["admin_key"], "***");
    }

    #[test]
    fn empty_secret_stays_empty() {
        assert_eq!(mask_secret(""), "");
    }
}
