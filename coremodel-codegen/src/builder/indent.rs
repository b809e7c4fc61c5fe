//! Indentation configuration for code generation.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, as rustfmt and prettyplease emit.
    pub const RUST: Self = Self::Spaces(4);

    /// 2-space indentation, as prettier emits for TypeScript.
    pub const TYPESCRIPT: Self = Self::Spaces(2);

    /// Write one indent level to `buf`.
    pub fn write_to(&self, buf: &mut String) {
        match self {
            Self::Spaces(n) => buf.extend(std::iter::repeat_n(' ', usize::from(*n))),
            Self::Tab => buf.push('\t'),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}
