//! Helpers for writing C/C++ source text.

/// Escape a string for use inside a C string literal.
///
/// Only double quotes are escaped; inputs are trusted project files that do
/// not carry backslashes or control characters.
pub fn escape_string(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// The banner every generated header starts with.
pub const GENERATED_BANNER: &str = "/* THIS FILE IS GENERATED DO NOT EDIT */\n";
