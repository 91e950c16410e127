//! Foundation types for the javadep toolchain.
//!
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`qualify`] - Dotted qualified-name construction
//!
//! This module has NO dependencies on other javadep modules.

pub use text_size::{TextRange, TextSize};

/// Join a scope prefix and a simple name with the Java `.` separator.
///
/// An empty prefix yields the name unchanged, so top-level names never
/// pick up a leading dot.
pub fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_top_level() {
        assert_eq!(qualify("", "Bar"), "Bar");
    }

    #[test]
    fn test_qualify_nested() {
        assert_eq!(qualify("A", "B"), "A.B");
        assert_eq!(qualify("A.B", "C"), "A.B.C");
    }
}
