//! Structural type emission from lineage schemas.

use std::collections::BTreeSet;

use coremodel_lineage::{Field, ObjectType, Scalar, Schema, Type};
use eyre::{Result, bail};
use serde_json::{Map, Value};

use crate::{
    ast::{Const, Decl, Interface, Property, TsType, TypeAlias},
    naming::{TS_NAMING, is_identifier},
};

/// How an object type is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// `export interface Name { ... }`
    Interface,
    /// `export type Name = { ... };`
    Alias,
}

/// A declaration together with the constant holding its defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleDecl {
    pub ty: Decl,
    /// `export const default<Name>: Partial<Name>`, present when any field
    /// carries a default
    pub default: Option<Decl>,
}

/// Declarations for every named definition of `schema`, in definition order.
///
/// Objects become interfaces, enums string-literal unions and everything
/// else an alias. A definition with a default is followed by its
/// `default<Name>` constant. The schema root is not included.
pub fn generate_ast(schema: &Schema) -> Result<Vec<Decl>> {
    let mut decls = Vec::new();
    for def in schema.definitions() {
        match &def.ty {
            Type::Object(object) => {
                let mut single = generate_single_ast(&def.name, object, TypeKind::Interface)?;
                single.ty.set_doc(def.description.as_deref());
                if let Some(Value::Object(members)) = &def.default {
                    let name = single.ty.name().to_string();
                    single.default = Some(object_default(&name, single.default.take(), members));
                }
                decls.push(single.ty);
                decls.extend(single.default);
            }
            ty => {
                let name = decl_name(&def.name)?;
                let mut alias = TypeAlias::new(&name, ts_type(ty));
                alias.doc = def.description.clone();
                decls.push(Decl::Alias(alias));
                if let Some(value) = &def.default {
                    decls.push(Decl::Const(Const::new(
                        format!("default{name}"),
                        &name,
                        &name,
                        value.clone(),
                    )));
                }
            }
        }
    }
    check_unique(&decls)?;
    Ok(decls)
}

/// Declare `object` under `name`, plus its defaults constant.
pub fn generate_single_ast(name: &str, object: &ObjectType, kind: TypeKind) -> Result<SingleDecl> {
    let name = decl_name(name)?;
    let properties: Vec<Property> = object.fields.iter().map(property).collect();

    let ty = match kind {
        TypeKind::Interface => Decl::Interface(Interface {
            name: name.clone(),
            doc: None,
            properties,
        }),
        TypeKind::Alias => Decl::Alias(TypeAlias::new(&name, TsType::Object(properties))),
    };

    let defaults: Map<String, Value> = object
        .fields
        .iter()
        .filter_map(|field| Some((field.name.clone(), field.default.clone()?)))
        .collect();
    let default = (!defaults.is_empty()).then(|| {
        Decl::Const(Const::new(
            format!("default{name}"),
            format!("Partial<{name}>"),
            &name,
            Value::Object(defaults),
        ))
    });

    Ok(SingleDecl { ty, default })
}

/// Fail when two declarations share a name.
pub fn check_unique(decls: &[Decl]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for decl in decls {
        if !seen.insert(decl.name()) {
            bail!("duplicate TypeScript declaration `{}`", decl.name());
        }
    }
    Ok(())
}

fn decl_name(name: &str) -> Result<String> {
    if !is_identifier(name) {
        bail!("definition name `{name}` is not a valid TypeScript identifier");
    }
    Ok(TS_NAMING.type_name(name))
}

/// Field defaults overlaid with the members of the definition's own default.
fn object_default(name: &str, fields: Option<Decl>, members: &Map<String, Value>) -> Decl {
    let mut values = match fields {
        Some(Decl::Const(Const {
            value: Value::Object(values),
            ..
        })) => values,
        _ => Map::new(),
    };
    for (key, value) in members {
        values.insert(key.clone(), value.clone());
    }
    Decl::Const(Const::new(
        format!("default{name}"),
        format!("Partial<{name}>"),
        name,
        Value::Object(values),
    ))
}

fn property(field: &Field) -> Property {
    Property {
        name: field.name.clone(),
        ty: ts_type(&field.ty),
        doc: field.description.clone(),
        optional: field.optional,
    }
}

fn ts_type(ty: &Type) -> TsType {
    match ty {
        Type::Scalar(scalar) => TsType::Keyword(keyword(*scalar)),
        Type::Enum(values) => TsType::Literals(values.clone()),
        Type::Array(item) => TsType::array(ts_type(item)),
        Type::Map(value) => TsType::record(ts_type(value)),
        Type::Object(object) => TsType::Object(object.fields.iter().map(property).collect()),
        Type::Ref(name) => TsType::Ref(TS_NAMING.type_name(name)),
    }
}

fn keyword(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::String | Scalar::Bytes => "string",
        Scalar::Bool => "boolean",
        Scalar::Int8
        | Scalar::Int16
        | Scalar::Int32
        | Scalar::Int64
        | Scalar::Uint8
        | Scalar::Uint16
        | Scalar::Uint32
        | Scalar::Uint64
        | Scalar::Float32
        | Scalar::Float64 => "number",
        Scalar::Any => "unknown",
    }
}
