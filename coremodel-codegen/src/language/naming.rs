//! Naming conventions for different programming languages.

/// Language-specific naming conventions.
///
/// Defines how schema names map to type and field identifiers, and how
/// reserved words are kept legal.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a schema name to a type name (e.g., "gridPos" -> "GridPos")
    pub to_type: fn(&str) -> String,
    /// Transform a property name to a field name
    pub to_field: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "r#type" in Rust)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    pub fn type_name(&self, name: &str) -> String {
        let transformed = (self.to_type)(name);
        self.safe_name(&transformed)
    }

    pub fn field_name(&self, name: &str) -> String {
        let transformed = (self.to_field)(name);
        self.safe_name(&transformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPPER: NamingConvention = NamingConvention {
        to_type: |s| s.to_uppercase(),
        to_field: |s| s.to_lowercase(),
        reserved_words: &["TYPE", "for"],
        escape_reserved: |s| format!("{s}_"),
    };

    #[test]
    fn test_type_and_field_names() {
        assert_eq!(UPPER.type_name("panel"), "PANEL");
        assert_eq!(UPPER.type_name("type"), "TYPE_");
        assert_eq!(UPPER.field_name("Title"), "title");
        assert_eq!(UPPER.field_name("FOR"), "for_");
    }
}
