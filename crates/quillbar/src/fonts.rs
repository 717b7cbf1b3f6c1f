//! Font family catalog.
//!
//! The formatting engine validates a requested font family before writing
//! anything: an unknown family aborts the command and the toolbar combo
//! reverts. [`FontCatalog`] answers that question and provides the family
//! list the combo displays, backed by the system font database.

use crate::error::{FormatError, FormatResult};

/// A catalog of available font family names.
///
/// Family names are cached at construction (enumerating the system font
/// database is expensive) and matched case-insensitively.
///
/// # Example
///
/// ```
/// use quillbar::fonts::FontCatalog;
///
/// let catalog = FontCatalog::with_families(["Arial", "Georgia"]);
/// assert!(catalog.contains("arial"));
/// assert!(!catalog.contains("Comic Sans MS"));
/// ```
#[derive(Debug, Clone)]
pub struct FontCatalog {
    /// Sorted, deduplicated family names.
    families: Vec<String>,
}

impl FontCatalog {
    /// Build a catalog from the fonts installed on the system.
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let mut families: Vec<String> = db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        families.sort();
        families.dedup();

        tracing::debug!(
            target: "quillbar::fonts",
            family_count = families.len(),
            "loaded system font catalog"
        );

        Self { families }
    }

    /// Build a catalog from explicit family names.
    ///
    /// Useful for tests and for hosts that supply their own font list.
    pub fn with_families<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut families: Vec<String> = names.into_iter().map(Into::into).collect();
        families.sort();
        families.dedup();
        Self { families }
    }

    /// All family names, sorted.
    pub fn family_names(&self) -> &[String] {
        &self.families
    }

    /// Check whether a family name exists, ignoring ASCII case.
    pub fn contains(&self, family: &str) -> bool {
        self.families
            .iter()
            .any(|name| name.eq_ignore_ascii_case(family))
    }

    /// Resolve a family name to its canonical casing.
    ///
    /// Returns [`FormatError::InvalidFontFamily`] when the family is not in
    /// the catalog.
    pub fn resolve(&self, family: &str) -> FormatResult<String> {
        self.families
            .iter()
            .find(|name| name.eq_ignore_ascii_case(family))
            .cloned()
            .ok_or_else(|| FormatError::InvalidFontFamily {
                family: family.to_string(),
            })
    }
}
