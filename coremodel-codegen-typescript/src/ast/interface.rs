//! TypeScript interface builder.

use std::collections::BTreeSet;

use coremodel_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::Property;

/// `export interface Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub name: String,
    pub doc: Option<String>,
    pub properties: Vec<Property>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            properties: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn references(&self, out: &mut BTreeSet<String>) {
        for property in &self.properties {
            property.ty.references(out);
        }
    }

    pub fn build(&self) -> String {
        CodeBuilder::typescript().emit(self).build()
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }
        if self.properties.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "export interface {} {{}}",
                self.name
            )));
        } else {
            fragments.push(CodeFragment::block(
                format!("export interface {} {{", self.name),
                self.properties.to_fragments(),
                "}",
            ));
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TsType;

    #[test]
    fn test_empty_interface() {
        assert_eq!(Interface::new("Empty").build(), "export interface Empty {}\n");
    }

    #[test]
    fn test_interface_with_doc() {
        let i = Interface::new("GridPos")
            .doc("Panel position")
            .property(Property::new("x", TsType::Keyword("number")))
            .property(Property::new("w", TsType::Keyword("number")).optional())
            .build();
        assert_eq!(
            i,
            "/** Panel position */\nexport interface GridPos {\n  x: number;\n  w?: number;\n}\n"
        );
    }
}
