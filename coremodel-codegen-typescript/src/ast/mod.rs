//! TypeScript declaration builders.
//!
//! Every builder describes itself as
//! [`CodeFragment`](coremodel_codegen::builder::CodeFragment)s, rendered
//! through a `CodeBuilder` with 2-space indentation.

mod alias;
mod consts;
mod interface;
mod types;

use std::collections::BTreeSet;

use coremodel_codegen::builder::{CodeFragment, Renderable};

pub use alias::TypeAlias;
pub use consts::{Const, literal};
pub use interface::Interface;
pub use types::{Property, TsType};

/// A top-level declaration of a generated file.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Interface(Interface),
    Alias(TypeAlias),
    Const(Const),
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Interface(i) => &i.name,
            Decl::Alias(a) => &a.name,
            Decl::Const(c) => &c.name,
        }
    }

    /// Attach a doc comment. Constants carry none.
    pub fn set_doc(&mut self, doc: Option<&str>) {
        let doc = doc.map(str::to_string);
        match self {
            Decl::Interface(i) => i.doc = doc,
            Decl::Alias(a) => a.doc = doc,
            Decl::Const(_) => {}
        }
    }

    /// Names of the declarations this one refers to.
    pub fn references(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        match self {
            Decl::Interface(i) => i.references(&mut out),
            Decl::Alias(a) => a.references(&mut out),
            Decl::Const(c) => {
                out.insert(c.target.clone());
            }
        }
        out
    }
}

impl Renderable for Decl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Decl::Interface(i) => i.to_fragments(),
            Decl::Alias(a) => a.to_fragments(),
            Decl::Const(c) => c.to_fragments(),
        }
    }
}
