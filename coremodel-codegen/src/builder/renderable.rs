//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! Declaration builders in the language crates describe themselves as
//! fragments; [`CodeBuilder`](super::CodeBuilder) turns fragments into text.

/// Represents a fragment of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// A JSDoc comment; multi-line text becomes a `/** ... */` block.
    JsDoc(String),
    /// A Rust doc comment, one `///` line per text line.
    RustDoc(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: impl Into<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close: Some(close.into()),
        }
    }
}

/// Trait for declarations that can be rendered to code fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable> Renderable for [T] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.iter().flat_map(Renderable::to_fragments).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alias(&'static str);

    impl Renderable for Alias {
        fn to_fragments(&self) -> Vec<CodeFragment> {
            vec![CodeFragment::line(format!("type {} = string;", self.0))]
        }
    }

    #[test]
    fn test_slice_concatenates_fragments() {
        let fragments = [Alias("A"), Alias("B")].to_fragments();
        assert_eq!(
            fragments,
            vec![
                CodeFragment::line("type A = string;"),
                CodeFragment::line("type B = string;"),
            ]
        );
    }
}
