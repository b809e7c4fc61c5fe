//! TypeScript-specific naming conventions.

use coremodel_codegen::language::NamingConvention;

fn keep(name: &str) -> String {
    name.to_string()
}

fn escape_ts_reserved(name: &str) -> String {
    format!("_{name}")
}

/// TypeScript naming conventions.
///
/// Declaration and property names are emitted exactly as the lineage spells
/// them; only words TypeScript refuses as type names are escaped.
pub const TS_NAMING: NamingConvention = NamingConvention {
    to_type: keep,
    to_field: keep,
    reserved_words: &[
        // Predefined type names
        "any", "bigint", "boolean", "never", "null", "number", "object", "string", "symbol",
        "undefined", "unknown", "void",
        // Reserved words
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
        "import", "in", "instanceof", "new", "return", "super", "switch", "this", "throw", "true",
        "try", "typeof", "var", "while", "with",
    ],
    escape_reserved: escape_ts_reserved,
};

/// Whether `name` can be written as a bare identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// A single-quoted string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Object key for the wire property `name`, quoted when it is not an identifier.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}
