//! TypeScript constant builder for default values.

use coremodel_codegen::builder::{CodeBuilder, CodeFragment, Renderable};
use serde_json::Value;

use crate::naming::{property_key, quote};

/// `export const name: Type = <value>;`
///
/// Object values are spread one member per line.
#[derive(Debug, Clone, PartialEq)]
pub struct Const {
    pub name: String,
    /// Declared type annotation, e.g. `Partial<Model>`
    pub ty: String,
    /// Name of the declaration the annotation refers to
    pub target: String,
    pub value: Value,
}

impl Const {
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<String>,
        target: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            target: target.into(),
            value,
        }
    }

    pub fn build(&self) -> String {
        CodeBuilder::typescript().emit(self).build()
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let head = format!("export const {}: {} = ", self.name, self.ty);
        match &self.value {
            Value::Object(members) if !members.is_empty() => vec![CodeFragment::block(
                format!("{head}{{"),
                members
                    .iter()
                    .map(|(key, value)| {
                        CodeFragment::Line(format!("{}: {},", property_key(key), literal(value)))
                    })
                    .collect(),
                "};",
            )],
            value => vec![CodeFragment::Line(format!("{head}{};", literal(value)))],
        }
    }
}

/// Render a JSON value as a TypeScript literal on one line.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(members) if members.is_empty() => "{}".to_string(),
        Value::Object(members) => {
            let members: Vec<String> = members
                .iter()
                .map(|(key, value)| format!("{}: {}", property_key(key), literal(value)))
                .collect();
            format!("{{ {} }}", members.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(literal(&json!("it's")), r"'it\'s'");
        assert_eq!(literal(&json!([1, 2.5, true, null])), "[1, 2.5, true, null]");
        assert_eq!(literal(&json!({"x": 0, "grid-pos": {}})), "{ x: 0, 'grid-pos': {} }");
    }

    #[test]
    fn test_object_const() {
        let c = Const::new(
            "defaultModel",
            "Partial<Model>",
            "Model",
            json!({"mode": "time", "tags": []}),
        )
        .build();
        assert_eq!(
            c,
            "export const defaultModel: Partial<Model> = {\n  mode: 'time',\n  tags: [],\n};\n"
        );
    }

    #[test]
    fn test_scalar_const() {
        let c = Const::new("defaultMode", "Mode", "Mode", json!("time")).build();
        assert_eq!(c, "export const defaultMode: Mode = 'time';\n");
    }
}
