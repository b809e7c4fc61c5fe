//! TypeScript type alias builder.

use std::collections::BTreeSet;

use coremodel_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::TsType;

/// `export type Name = <type>;`
///
/// A union of string literals renders as `export type Mode = 'a' | 'b';`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    pub doc: Option<String>,
    pub ty: TsType,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            doc: None,
            ty,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn references(&self, out: &mut BTreeSet<String>) {
        self.ty.references(out);
    }

    pub fn build(&self) -> String {
        CodeBuilder::typescript().emit(self).build()
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }
        fragments.extend(self.ty.fragments(&format!("export type {} = ", self.name), ";"));
        fragments
    }
}
