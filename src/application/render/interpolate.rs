//! Fallback `{{token}}` templating for templates without a compiled renderer.
//!
//! Every substituted value goes through [`escape`] exactly once; this is the
//! only path by which block configuration reaches raw markup output. Tokens
//! whose key is absent are left verbatim so a misconfigured template shows the
//! placeholder instead of failing the page.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use super::escape::escape;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("token pattern must be valid"));

/// Substitute `{{key}}` tokens in `template` with escaped values from `config`.
pub fn interpolate(template: &str, config: &Value) -> String {
    let fields = config.as_object();
    TOKEN
        .replace_all(template, |caps: &Captures<'_>| {
            match fields.and_then(|fields| fields.get(&caps[1])) {
                Some(value) => escape(&value_to_text(value)),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Returns the identifiers of every token in `template`, in order of appearance.
pub fn tokens(template: &str) -> Vec<&str> {
    TOKEN
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// String form of a configuration value as seen by template authors.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                int.to_string()
            } else if let Some(uint) = number.as_u64() {
                uint.to_string()
            } else {
                let float = number.as_f64().unwrap_or_default();
                if float.fract() == 0.0 && float.abs() < 1e15 {
                    format!("{}", float as i64)
                } else {
                    float.to_string()
                }
            }
        }
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
