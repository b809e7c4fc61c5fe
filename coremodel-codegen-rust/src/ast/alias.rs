//! Rust type alias builder.

use coremodel_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// `pub type Name = Target;`
#[derive(Debug, Clone)]
pub struct TypeAlias {
    name: String,
    target: String,
    doc: Option<String>,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            doc: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn build(&self) -> String {
        CodeBuilder::rust().emit(self).build()
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::RustDoc(doc.clone()));
        }
        fragments.push(CodeFragment::Line(format!(
            "pub type {} = {};",
            self.name, self.target
        )));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias() {
        let a = TypeAlias::new("Tags", "Vec<String>").build();
        assert_eq!(a, "pub type Tags = Vec<String>;\n");
    }
}
