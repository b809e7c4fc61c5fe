//! Code builder utility for generating properly indented code.

use super::{CodeFragment, Indent, Renderable};

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use coremodel_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::typescript()
///     .line("export interface Model {")
///     .indent()
///     .line("title: string;")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "export interface Model {\n  title: string;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// 4-space indentation.
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    /// 2-space indentation.
    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a Rust doc comment, one `///` line per line of `text`.
    pub fn rust_doc(mut self, text: &str) -> Self {
        for line in text.lines() {
            if line.is_empty() {
                self.push_line("///");
            } else {
                self.push_line(&format!("/// {line}"));
            }
        }
        self
    }

    /// Add a JSDoc comment. Single lines stay on one line.
    pub fn jsdoc(mut self, text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() <= 1 {
            self.push_line(&format!("/** {} */", text.trim()));
            return self;
        }

        self.push_line("/**");
        for line in lines {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {line}"));
            }
        }
        self.push_line(" */");
        self
    }

    /// Render a declaration.
    pub fn emit(self, node: &(impl Renderable + ?Sized)) -> Self {
        node.to_fragments()
            .into_iter()
            .fold(self, CodeBuilder::fragment)
    }

    /// Apply a single code fragment.
    pub fn fragment(self, fragment: CodeFragment) -> Self {
        match fragment {
            CodeFragment::Line(s) => self.line(&s),
            CodeFragment::Blank => self.blank(),
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                let builder = body
                    .into_iter()
                    .fold(self.line(&header).indent(), CodeBuilder::fragment)
                    .dedent();
                match close {
                    Some(c) => builder.line(&c),
                    None => builder,
                }
            }
            CodeFragment::JsDoc(text) => self.jsdoc(&text),
            CodeFragment::RustDoc(text) => self.rust_doc(&text),
        }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn push_line(&mut self, s: &str) {
        for _ in 0..self.indent_level {
            self.indent.write_to(&mut self.buffer);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::rust()
    }
}
