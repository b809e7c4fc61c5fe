//! Source-aware validation helpers for lineage files.

use miette::{NamedSource, SourceSpan};

use crate::Error;

/// Parsing and validation context that carries source information.
///
/// Tracks the path of the value currently being lowered (e.g.
/// `seqs[0].schemas[1].fields.gridPos`) so diagnostics can say where a
/// problem lives even when no span can be recovered.
#[derive(Debug, Clone)]
pub(crate) struct ParseContext<'a> {
    src: &'a str,
    filename: &'a str,
    path: Vec<String>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self {
            src,
            filename,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            src: self.src,
            filename: self.filename,
            path,
        }
    }

    /// Dot-separated location of the current value.
    pub fn location(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            if !out.is_empty() && !segment.starts_with('[') {
                out.push('.');
            }
            out.push_str(segment);
        }
        out
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        Box::new(Error::Parse {
            src: self.named_source(),
            span: source.span().map(SourceSpan::from),
            filename: self.filename.to_string(),
            message: source.message().trim_end().to_string(),
        })
    }

    /// Create a validation error located at the current path.
    pub fn error(&self, message: impl Into<String>) -> Box<Error> {
        self.error_near(message, None)
    }

    /// Create a validation error, pointing at the first occurrence of `needle`.
    pub fn error_near(&self, message: impl Into<String>, needle: Option<&str>) -> Box<Error> {
        let location = self.location();
        let message = message.into();
        let message = if location.is_empty() {
            message
        } else {
            format!("{location}: {message}")
        };
        Box::new(Error::Validation {
            src: self.named_source(),
            span: needle.and_then(|n| find_span(self.src, n)),
            filename: self.filename.to_string(),
            message,
        })
    }
}

/// Rust reserved keywords; a lineage name becomes a module name in generated code.
pub(crate) const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv",
    "try", "typeof", "unsized", "virtual", "yield", "gen",
];

/// Validate a lineage name. Returns `Some(reason)` if invalid.
pub(crate) fn validate_lineage_name(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if !c.is_ascii_lowercase() => {
            return Some("name must start with a lowercase letter");
        }
        Some(_) => {}
    }

    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        return Some("name may only contain lowercase letters and digits");
    }

    if RUST_KEYWORDS.contains(&name) {
        return Some("name is a Rust reserved keyword");
    }

    None
}

/// Find the span of a name in the TOML source, preferring key and quoted forms.
pub(crate) fn find_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        format!("\"{name}\""), // type = "Name"
        format!(".{name}]"),   // [seqs.schemas.definitions.Name]
        format!("{name} ="),   // name = { ... }
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            let start = pos + pattern.find(name).unwrap_or(0);
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_lineage_name() {
        assert_eq!(validate_lineage_name("dashboard"), None);
        assert_eq!(validate_lineage_name("panel2"), None);
        assert!(validate_lineage_name("").is_some());
        assert!(validate_lineage_name("Panel").is_some());
        assert!(validate_lineage_name("2panel").is_some());
        assert!(validate_lineage_name("time_series").is_some());
        assert!(validate_lineage_name("type").is_some());
    }

    #[test]
    fn test_location() {
        let ctx = ParseContext::new("", "lineage.toml");
        let nested = ctx.push("seqs").push("[0]").push("fields").push("title");
        assert_eq!(nested.location(), "seqs[0].fields.title");
        assert_eq!(ctx.location(), "");
    }

    #[test]
    fn test_find_span() {
        let src = "[seqs.schemas.fields]\npos = { type = \"GridPos\" }\n";
        let span = find_span(src, "GridPos").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "GridPos");

        let span = find_span(src, "pos").unwrap();
        assert_eq!(span.offset(), src.find("pos =").unwrap());
        assert!(find_span(src, "missing").is_none());
    }
}
