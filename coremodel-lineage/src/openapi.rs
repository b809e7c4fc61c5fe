//! Portable OpenAPI 3 rendering of a schema.

use serde_json::{Map, Value, json};

use crate::{ObjectType, Scalar, Schema, Type};

/// Prefix of every component reference in the rendered document.
pub const COMPONENT_REF_PREFIX: &str = "#/components/schemas/";

impl Schema {
    /// Render this schema as an OpenAPI 3 document.
    ///
    /// The root object is published under `name` in `components.schemas`,
    /// followed by every definition in declaration order.
    pub fn to_openapi(&self, name: &str) -> Value {
        let mut schemas = Map::new();

        let mut root = object_schema(self.root());
        if let (Some(description), Value::Object(obj)) = (self.description(), &mut root) {
            obj.insert("description".into(), Value::String(description.to_string()));
        }
        schemas.insert(name.to_string(), root);

        for def in self.definitions() {
            let mut schema = type_schema(&def.ty);
            if let Value::Object(obj) = &mut schema {
                if let Some(description) = &def.description {
                    obj.insert("description".into(), Value::String(description.clone()));
                }
                if let Some(default) = &def.default {
                    obj.insert("default".into(), default.clone());
                }
            }
            schemas.insert(def.name.clone(), schema);
        }

        json!({
            "openapi": "3.0.0",
            "info": {
                "title": name,
                "version": self.version().to_string(),
            },
            "paths": {},
            "components": {
                "schemas": schemas,
            },
        })
    }
}

fn object_schema(object: &ObjectType) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in &object.fields {
        let mut schema = type_schema(&field.ty);
        if let Value::Object(obj) = &mut schema {
            if let Some(description) = &field.description {
                obj.insert("description".into(), Value::String(description.clone()));
            }
            if let Some(default) = &field.default {
                obj.insert("default".into(), default.clone());
            }
        }
        properties.insert(field.name.clone(), schema);
        if !field.optional {
            required.push(Value::String(field.name.clone()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
    Value::Object(schema)
}

fn type_schema(ty: &Type) -> Value {
    match ty {
        Type::Scalar(scalar) => scalar_schema(*scalar),
        Type::Enum(values) => json!({ "type": "string", "enum": values }),
        Type::Array(items) => json!({ "type": "array", "items": type_schema(items) }),
        Type::Map(values) => {
            json!({ "type": "object", "additionalProperties": type_schema(values) })
        }
        Type::Object(object) => object_schema(object),
        Type::Ref(name) => json!({ "$ref": format!("{COMPONENT_REF_PREFIX}{name}") }),
    }
}

fn scalar_schema(scalar: Scalar) -> Value {
    let (ty, format) = match scalar {
        Scalar::String => ("string", None),
        Scalar::Bool => ("boolean", None),
        Scalar::Int8 => ("integer", Some("int8")),
        Scalar::Int16 => ("integer", Some("int16")),
        Scalar::Int32 => ("integer", Some("int32")),
        Scalar::Int64 => ("integer", Some("int64")),
        Scalar::Uint8 => ("integer", Some("uint8")),
        Scalar::Uint16 => ("integer", Some("uint16")),
        Scalar::Uint32 => ("integer", Some("uint32")),
        Scalar::Uint64 => ("integer", Some("uint64")),
        Scalar::Float32 => ("number", Some("float")),
        Scalar::Float64 => ("number", Some("double")),
        Scalar::Bytes => ("string", Some("byte")),
        Scalar::Any => return json!({}),
    };

    match format {
        Some(format) => json!({ "type": ty, "format": format }),
        None => json!({ "type": ty }),
    }
}
