//! Rust-specific naming conventions.

use coremodel_codegen::language::NamingConvention;
use coremodel_core::{to_pascal_case, to_snake_case};

/// Keywords that cannot be raw identifiers.
const NON_RAW: &[&str] = &["crate", "self", "Self", "super"];

fn escape_rust_reserved(name: &str) -> String {
    if NON_RAW.contains(&name) {
        format!("{name}_")
    } else {
        format!("r#{name}")
    }
}

/// Rust naming conventions.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    to_type: to_pascal_case,
    to_field: to_snake_case,
    reserved_words: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
        "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box",
        "do", "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
        "yield",
    ],
    escape_reserved: escape_rust_reserved,
};

/// Make `name` a usable identifier: never empty, never starting with a digit.
pub(crate) fn ident_or(name: String, fallback: &str, digit_prefix: &str) -> String {
    match name.chars().next() {
        None => fallback.to_string(),
        Some(c) if c.is_ascii_digit() => format!("{digit_prefix}{name}"),
        Some(_) => name,
    }
}

/// Name of a struct field for the wire property `prop`.
pub(crate) fn field_ident(prop: &str) -> String {
    let name = ident_or(to_snake_case(prop), "field", "_");
    RUST_NAMING.safe_name(&name)
}

/// Name of an enum variant for the wire value `value`.
pub(crate) fn variant_ident(value: &str) -> String {
    let name = ident_or(to_pascal_case(value), "Empty", "V");
    RUST_NAMING.safe_name(&name)
}

/// The identifier text serde derives the wire name from.
pub(crate) fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}
