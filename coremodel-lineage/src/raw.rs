//! Serde shapes of `lineage.toml`, before resolution.

use indexmap::IndexMap;
use serde::Deserialize;

/// Root of a lineage file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawLineage {
    /// Overrides the directory name when present
    pub name: Option<String>,
    pub seqs: Vec<RawSeq>,
}

/// A run of mutually compatible schemas
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawSeq {
    #[serde(default)]
    pub schemas: Vec<RawSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawSchema {
    pub description: Option<String>,
    #[serde(default)]
    pub fields: IndexMap<String, RawType>,
    #[serde(default)]
    pub definitions: IndexMap<String, RawType>,
}

/// A type expression, used both for fields and definitions.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawType {
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub optional: bool,
    pub default: Option<toml::Value>,
    /// Element type of an array
    pub items: Option<Box<RawType>>,
    /// Value type of a map
    pub values: Option<Box<RawType>>,
    /// Members of an inline object
    pub fields: Option<IndexMap<String, RawType>>,
    #[serde(rename = "enum")]
    pub variants: Option<Vec<String>>,
}

/// Convert a TOML value to its JSON equivalent.
///
/// Datetimes have no JSON counterpart and become their RFC 3339 text.
pub(crate) fn toml_to_json(value: &toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s.clone()),
        toml::Value::Integer(i) => serde_json::Value::from(*i),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        toml::Value::Boolean(b) => serde_json::Value::Bool(*b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_toml_to_json() {
        let value: toml::Value = toml::from_str(
            r#"
            title = "Panel"
            span = 12
            ratio = 0.5
            transparent = false
            tags = ["a", "b"]
            pos = { x = 1, y = 2 }
            "#,
        )
        .unwrap();

        assert_eq!(
            toml_to_json(&value),
            json!({
                "title": "Panel",
                "span": 12,
                "ratio": 0.5,
                "transparent": false,
                "tags": ["a", "b"],
                "pos": { "x": 1, "y": 2 },
            })
        );
    }
}
