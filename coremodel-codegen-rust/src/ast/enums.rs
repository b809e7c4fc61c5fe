//! Rust enum builder.

use coremodel_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A unit variant in a Rust enum.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub doc: Option<String>,
    pub attrs: Vec<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            attrs: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add an attribute to the variant, e.g., `serde(rename = "foo")`.
    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }
}

/// Builder for public Rust enums with unit variants.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    variants: Vec<Variant>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derives.extend(derives.into_iter().map(Into::into));
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Build the enum as a string.
    pub fn build(&self) -> String {
        CodeBuilder::rust().emit(self).build()
    }

    fn variants_to_fragments(&self) -> Vec<CodeFragment> {
        self.variants
            .iter()
            .flat_map(|variant| {
                let mut fragments = Vec::new();
                if let Some(doc) = &variant.doc {
                    fragments.push(CodeFragment::RustDoc(doc.clone()));
                }
                for attr in &variant.attrs {
                    fragments.push(CodeFragment::Line(format!("#[{attr}]")));
                }
                fragments.push(CodeFragment::Line(format!("{},", variant.name)));
                fragments
            })
            .collect()
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::RustDoc(doc.clone()));
        }
        if !self.derives.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }

        if self.variants.is_empty() {
            fragments.push(CodeFragment::Line(format!("pub enum {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::block(
                format!("pub enum {} {{", self.name),
                self.variants_to_fragments(),
                "}",
            ));
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_with_renamed_variants() {
        let e = Enum::new("PanelMode")
            .derives(["Debug", "Default"])
            .variant(Variant::new("Time").attr("default").attr("serde(rename = \"time\")"))
            .variant(Variant::new("Series").attr("serde(rename = \"series\")"))
            .build();

        assert!(e.starts_with("#[derive(Debug, Default)]\npub enum PanelMode {\n"));
        assert!(e.contains("    #[default]\n    #[serde(rename = \"time\")]\n    Time,\n"));
        assert!(e.contains("    Series,\n}\n"));
    }

    #[test]
    fn test_variant_with_doc() {
        let e = Enum::new("Mode")
            .variant(Variant::new("Fast").doc("Skip checks"))
            .build();
        assert!(e.contains("/// Skip checks"));
    }
}
