//! Output base-name builder
//!
//! Derives a canonical, collision-resistant base name for any document
//! object. Pure function of its inputs so the same object always lands on
//! the same output path within a run.

use crate::domain::Category;

/// Separator between a document name and an object name in qualified
/// identities, e.g. `gearbox#Body001`.
pub const IDENTITY_SEPARATOR: char = '#';

/// Build the output base name for an object.
///
/// Joins `{identity}_{label}_{category}_{version}` after stripping the
/// document separator from the identity so the result is filesystem-safe.
/// The extension is decided later by the export kind.
pub fn build_base_name(identity: &str, label: &str, category: Category, version: &str) -> String {
    let identity: String = identity
        .chars()
        .filter(|c| *c != IDENTITY_SEPARATOR)
        .collect();
    format!("{identity}_{label}_{}_{version}", category.short_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_format() {
        let name = build_base_name("gearbox#Body001", "Housing", Category::Body, "1.0");
        assert_eq!(name, "gearboxBody001_Housing_Body_1.0");
    }

    #[test]
    fn test_deterministic() {
        let a = build_base_name("demo#Page", "Sheet1", Category::DrawingPage, "2.1");
        let b = build_base_name("demo#Page", "Sheet1", Category::DrawingPage, "2.1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_version_distinguishes() {
        let a = build_base_name("demo#B", "B", Category::Body, "1.0");
        let b = build_base_name("demo#B", "B", Category::Body, "1.1");
        assert_ne!(a, b);
    }

    #[test]
    fn test_separator_never_survives() {
        let name = build_base_name("a#b#c", "label", Category::Assembly, "X.X.X");
        assert!(!name.contains(IDENTITY_SEPARATOR));
    }
}
