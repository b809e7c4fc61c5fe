//! The type model schemas are lowered into.

use std::fmt;

use serde_json::Value;

/// Scalar kinds a [`Library`](crate::Library) can resolve type names to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    String,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    /// Binary data, base64 encoded on the wire
    Bytes,
    /// Any JSON value
    Any,
}

impl Scalar {
    pub const ALL: [Scalar; 14] = [
        Scalar::String,
        Scalar::Bool,
        Scalar::Int8,
        Scalar::Int16,
        Scalar::Int32,
        Scalar::Int64,
        Scalar::Uint8,
        Scalar::Uint16,
        Scalar::Uint32,
        Scalar::Uint64,
        Scalar::Float32,
        Scalar::Float64,
        Scalar::Bytes,
        Scalar::Any,
    ];

    /// The name lineage files use for this scalar.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scalar::String => "string",
            Scalar::Bool => "bool",
            Scalar::Int8 => "int8",
            Scalar::Int16 => "int16",
            Scalar::Int32 => "int32",
            Scalar::Int64 => "int64",
            Scalar::Uint8 => "uint8",
            Scalar::Uint16 => "uint16",
            Scalar::Uint32 => "uint32",
            Scalar::Uint64 => "uint64",
            Scalar::Float32 => "float32",
            Scalar::Float64 => "float64",
            Scalar::Bytes => "bytes",
            Scalar::Any => "any",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved schema type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Scalar(Scalar),
    /// A closed set of string values
    Enum(Vec<String>),
    Array(Box<Type>),
    /// String-keyed map
    Map(Box<Type>),
    Object(ObjectType),
    /// Reference to a named definition in the same schema
    Ref(String),
}

impl Type {
    /// Short description used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Type::Scalar(s) => s.as_str(),
            Type::Enum(_) => "enum",
            Type::Array(_) => "array",
            Type::Map(_) => "map",
            Type::Object(_) => "object",
            Type::Ref(_) => "reference",
        }
    }
}

/// A named member of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    pub description: Option<String>,
    pub optional: bool,
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectType {
    pub fields: Vec<Field>,
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_defaults(&self) -> bool {
        self.fields.iter().any(|f| f.default.is_some())
    }
}

/// A named type declared alongside a schema's root object.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub ty: Type,
    pub description: Option<String>,
    pub default: Option<Value>,
}
