//! Tolerant field decoders.
//!
//! The backend is loose about nulls, number/string ids and tag shapes. These
//! decoders fall back to defaults instead of rejecting the whole record.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// `null` or a missing value becomes `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses a string through `FromStr`; unknown or non-string values become the default.
pub fn enum_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or_default())
}

/// Accepts a string or a number and keeps it as text.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(&Value::deserialize(deserializer)?))
}

/// Any numeric value clamped into `0..=100`.
pub fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let raw = value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .unwrap_or(0.0);
    Ok(raw.clamp(0.0, 100.0) as u8)
}

/// Any numeric value (or numeric string) as `f64`, defaulting to zero.
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .unwrap_or(0.0))
}

/// Tags arrive either as `"a, b"` or `["a", "b"]`.
pub fn tag_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|tag| !tag.is_empty())
            .collect(),
        Value::String(s) => split_tags(&s),
        _ => Vec::new(),
    })
}

/// Serializes a tag list back into the comma-separated form the backend stores.
pub fn tags_as_csv<S>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&tags.join(", "))
}

/// Splits a comma-separated tag string, dropping blanks.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "percent")]
        progress: u8,
        #[serde(default, deserialize_with = "tag_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "string_or_number")]
        niche: String,
        #[serde(default, deserialize_with = "null_as_default")]
        items: Vec<u32>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).expect("sample should decode")
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(sample(r#"{"progress": 150}"#).progress, 100);
        assert_eq!(sample(r#"{"progress": -3}"#).progress, 0);
        assert_eq!(sample(r#"{"progress": "40"}"#).progress, 40);
        assert_eq!(sample(r#"{"progress": null}"#).progress, 0);
    }

    #[test]
    fn test_tags_accept_both_shapes() {
        assert_eq!(sample(r#"{"tags": "shop, dark ,,"}"#).tags, vec!["shop", "dark"]);
        assert_eq!(sample(r#"{"tags": ["shop", 3]}"#).tags, vec!["shop", "3"]);
        assert!(sample(r#"{"tags": null}"#).tags.is_empty());
    }

    #[test]
    fn test_ids_accept_numbers() {
        assert_eq!(sample(r#"{"niche": 12}"#).niche, "12");
        assert_eq!(sample(r#"{"niche": "restaurants"}"#).niche, "restaurants");
    }

    #[test]
    fn test_null_collections_become_empty() {
        assert!(sample(r#"{"items": null}"#).items.is_empty());
    }
}
