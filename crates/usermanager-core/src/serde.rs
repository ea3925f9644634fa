//! Field-level deserializers for request DTOs.
//!
//! Names and titles are trimmed while parsing, so `length` rules see the
//! value that will be stored and a whitespace-only string counts as empty.

use serde::{Deserialize, Deserializer};

fn trim_owned(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(trim_owned)
}

pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(trim_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(default, deserialize_with = "deserialize_trimmed")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        title: Option<String>,
    }

    #[test]
    fn test_surrounding_whitespace_is_removed() {
        let named: Named =
            serde_json::from_str(r#"{"name":"  Admin ","title":"\tRust\n"}"#).unwrap();
        assert_eq!(named.name, "Admin");
        assert_eq!(named.title.as_deref(), Some("Rust"));
    }

    #[test]
    fn test_blank_becomes_empty() {
        let named: Named = serde_json::from_str(r#"{"name":"   ","title":"  "}"#).unwrap();
        assert_eq!(named.name, "");
        assert_eq!(named.title.as_deref(), Some(""));
    }

    #[test]
    fn test_absent_fields_default() {
        let named: Named = serde_json::from_str("{}").unwrap();
        assert_eq!(named.name, "");
        assert_eq!(named.title, None);

        let named: Named = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert_eq!(named.title, None);
    }
}
