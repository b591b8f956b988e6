//! CSS class strings for drawn features.

use serde_json::Value;

use crate::model::Feature;

/// Lowercases and collapses every run of characters outside `[a-z0-9]` into one hyphen.
pub fn classify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_hyphen = false;
    for ch in s.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// Class string for a feature: its id token, then one `key-value` token per property.
pub fn classify_feature(feature: &Feature) -> String {
    let mut tokens = Vec::with_capacity(feature.properties.len() + 1);
    if let Some(id) = &feature.id {
        tokens.push(classify(id));
    }
    for (k, v) in &feature.properties {
        tokens.push(classify(&format!("{}-{}", k, value_text(v))));
    }
    tokens.retain(|t| !t.is_empty());
    tokens.join(" ")
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
