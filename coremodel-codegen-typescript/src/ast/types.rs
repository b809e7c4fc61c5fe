//! TypeScript type expressions and object members.

use std::collections::BTreeSet;

use coremodel_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use crate::naming::{property_key, quote};

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// A predefined type such as `string` or `unknown`
    Keyword(&'static str),
    /// A named declaration
    Ref(String),
    /// A union of string literals
    Literals(Vec<String>),
    Array(Box<TsType>),
    /// `Record<string, T>`
    Record(Box<TsType>),
    /// An inline object type
    Object(Vec<Property>),
}

impl TsType {
    pub fn array(item: TsType) -> Self {
        TsType::Array(Box::new(item))
    }

    pub fn record(value: TsType) -> Self {
        TsType::Record(Box::new(value))
    }

    /// Add every declaration name this type mentions to `out`.
    pub fn references(&self, out: &mut BTreeSet<String>) {
        match self {
            TsType::Keyword(_) | TsType::Literals(_) => {}
            TsType::Ref(name) => {
                out.insert(name.clone());
            }
            TsType::Array(inner) | TsType::Record(inner) => inner.references(out),
            TsType::Object(properties) => {
                for property in properties {
                    property.ty.references(out);
                }
            }
        }
    }

    /// Single-line rendering; `None` when the type holds a non-empty object.
    pub fn inline(&self) -> Option<String> {
        match self {
            TsType::Keyword(keyword) => Some(keyword.to_string()),
            TsType::Ref(name) => Some(name.clone()),
            TsType::Literals(values) => Some(
                values
                    .iter()
                    .map(|v| quote(v))
                    .collect::<Vec<_>>()
                    .join(" | "),
            ),
            TsType::Array(inner) => {
                let item = inner.inline()?;
                match inner.as_ref() {
                    TsType::Literals(values) if values.len() > 1 => Some(format!("({item})[]")),
                    _ => Some(format!("{item}[]")),
                }
            }
            TsType::Record(inner) => Some(format!("Record<string, {}>", inner.inline()?)),
            TsType::Object(properties) if properties.is_empty() => Some("{}".to_string()),
            TsType::Object(_) => None,
        }
    }

    /// Fragments for `{head}<type>{tail}`, spreading inline objects over
    /// several lines.
    pub fn fragments(&self, head: &str, tail: &str) -> Vec<CodeFragment> {
        if let Some(inline) = self.inline() {
            return vec![CodeFragment::Line(format!("{head}{inline}{tail}"))];
        }
        match self {
            TsType::Array(inner) => inner.fragments(&format!("{head}Array<"), &format!(">{tail}")),
            TsType::Record(inner) => {
                inner.fragments(&format!("{head}Record<string, "), &format!(">{tail}"))
            }
            TsType::Object(properties) => vec![CodeFragment::block(
                format!("{head}{{"),
                properties.to_fragments(),
                format!("}}{tail}"),
            )],
            // Everything else has an inline form.
            _ => Vec::new(),
        }
    }
}

/// A member of an interface or inline object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: TsType,
    pub doc: Option<String>,
    pub optional: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            doc: None,
            optional: false,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn build(&self) -> String {
        CodeBuilder::typescript().emit(self).build()
    }
}

impl Renderable for Property {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }
        let optional = if self.optional { "?" } else { "" };
        let head = format!("{}{optional}: ", property_key(&self.name));
        fragments.extend(self.ty.fragments(&head, ";"));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_forms() {
        let mode = TsType::Literals(vec!["time".into(), "series".into()]);
        assert_eq!(mode.inline().unwrap(), "'time' | 'series'");
        assert_eq!(TsType::array(mode).inline().unwrap(), "('time' | 'series')[]");
        assert_eq!(
            TsType::array(TsType::Literals(vec!["only".into()])).inline().unwrap(),
            "'only'[]"
        );
        assert_eq!(
            TsType::record(TsType::array(TsType::Keyword("number"))).inline().unwrap(),
            "Record<string, number[]>"
        );
        assert_eq!(TsType::Object(Vec::new()).inline().unwrap(), "{}");
    }

    #[test]
    fn test_property() {
        let p = Property::new("title", TsType::Keyword("string")).build();
        assert_eq!(p, "title: string;\n");

        let p = Property::new("grid-pos", TsType::Ref("GridPos".into()))
            .optional()
            .doc("Where the panel sits")
            .build();
        assert_eq!(p, "/** Where the panel sits */\n'grid-pos'?: GridPos;\n");
    }

    #[test]
    fn test_nested_object_spreads() {
        let pos = TsType::Object(vec![
            Property::new("x", TsType::Keyword("number")),
            Property::new("y", TsType::Keyword("number")),
        ]);
        let p = Property::new("targets", TsType::array(pos)).build();
        assert_eq!(p, "targets: Array<{\n  x: number;\n  y: number;\n}>;\n");
    }

    #[test]
    fn test_references() {
        let ty = TsType::Object(vec![
            Property::new("pos", TsType::Ref("GridPos".into())),
            Property::new("links", TsType::record(TsType::array(TsType::Ref("Link".into())))),
        ]);
        let mut refs = BTreeSet::new();
        ty.references(&mut refs);
        assert_eq!(refs.into_iter().collect::<Vec<_>>(), ["GridPos", "Link"]);
    }
}
