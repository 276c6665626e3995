//! Category names
//!
//! Entries carry one of a configured set of category names. Plan
//! allocations are keyed by the normalized form of those names (lower-case,
//! accents stripped) so "Alimentação" and "alimentacao" refer to the same
//! budget line.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Lower-case a category name and strip its accents
///
/// Whitespace runs collapse to a single space; punctuation is kept.
pub fn normalize_category(name: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;

    for ch in name.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_whitespace() {
            if !out.is_empty() && !prev_space {
                out.push(' ');
                prev_space = true;
            }
            continue;
        }
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
        prev_space = false;
    }

    out.trim_end().to_string()
}

/// The closed set of category names entries may use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    /// Build a set from configured names, dropping blanks and duplicates
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }

    /// Exact membership test
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Find the configured spelling of a name, ignoring case and accents
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if let Some(exact) = self.names.iter().find(|n| *n == name) {
            return Some(exact);
        }
        let wanted = normalize_category(name);
        self.names
            .iter()
            .find(|n| normalize_category(n) == wanted)
            .map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
