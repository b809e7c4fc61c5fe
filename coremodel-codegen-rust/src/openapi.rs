//! The subset of an OpenAPI 3 document the type generator reads.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Prefix of local component references.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub openapi: String,
    pub info: Info,
    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaObject>,
}

/// A schema object; absent keywords stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaObject {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub format: Option<String>,
    pub description: Option<String>,
    pub properties: Option<IndexMap<String, SchemaObject>>,
    #[serde(default)]
    pub required: Vec<String>,
    pub items: Option<Box<SchemaObject>>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(rename = "enum")]
    pub variants: Option<Vec<Value>>,
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<SchemaObject>),
}

impl SchemaObject {
    /// Component name of a local `$ref`, if this schema is one.
    pub fn ref_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .map(|r| r.strip_prefix(SCHEMA_REF_PREFIX).unwrap_or(r))
    }

    /// Whether this schema declares named properties.
    pub fn is_struct(&self) -> bool {
        self.properties.is_some() && matches!(self.ty.as_deref(), None | Some("object"))
    }

    /// Every schema directly nested in this one.
    pub fn children(&self) -> impl Iterator<Item = &SchemaObject> {
        let properties = self.properties.iter().flat_map(|p| p.values());
        let items = self.items.as_deref();
        let values = match &self.additional_properties {
            Some(AdditionalProperties::Schema(schema)) => Some(schema.as_ref()),
            _ => None,
        };
        properties.chain(items).chain(values)
    }

    /// Components this schema holds by value: references reached through
    /// properties, but not through array items or map values.
    pub fn value_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        let mut stack = vec![self];
        while let Some(schema) = stack.pop() {
            if let Some(target) = schema.ref_name() {
                refs.push(target);
            }
            stack.extend(schema.properties.iter().flat_map(|p| p.values()));
        }
        refs
    }
}
