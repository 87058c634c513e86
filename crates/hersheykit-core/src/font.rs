//! A glyph database paired with the mapping that selects glyphs from it.

use tracing::warn;

use crate::database::GlyphDatabase;
use crate::error::{HersheyResult, LayoutError};
use crate::layout::{layout, LayoutOptions, LayoutResult};
use crate::mapping::CharacterMap;

/// The two read-only tables needed to lay out text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HersheyFont {
    database: GlyphDatabase,
    mapping: CharacterMap,
}

impl HersheyFont {
    /// Pairs the tables, warning about mapping entries the database lacks.
    pub fn new(database: GlyphDatabase, mapping: CharacterMap) -> Self {
        for (character, glyph) in mapping.missing_glyphs(&database) {
            warn!(?character, glyph, "Mapping refers to a glyph missing from the database");
        }
        Self { database, mapping }
    }

    /// Decodes both tables from their file contents.
    pub fn from_sources(database_text: &str, mapping_text: &str) -> HersheyResult<Self> {
        let database = GlyphDatabase::decode(database_text)?;
        let mapping = CharacterMap::decode(mapping_text)?;
        Ok(Self::new(database, mapping))
    }

    pub fn database(&self) -> &GlyphDatabase {
        &self.database
    }

    pub fn mapping(&self) -> &CharacterMap {
        &self.mapping
    }

    pub fn layout(&self, text: &str, options: &LayoutOptions) -> Result<LayoutResult, LayoutError> {
        layout(text, &self.database, &self.mapping, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HersheyError;

    #[test]
    fn test_from_sources() {
        let font = HersheyFont::from_sources("  699  1JZ\n", "699").unwrap();
        let result = font.layout("  ", &LayoutOptions::default()).unwrap();
        assert_eq!(result.total_width, 32);
        assert_eq!(font.mapping().len(), 1);
        assert_eq!(font.database().len(), 1);
    }

    #[test]
    fn test_from_sources_reports_which_table_failed() {
        let err = HersheyFont::from_sources("  699  1JZ\n", "abc").unwrap_err();
        assert!(matches!(err, HersheyError::Mapping(_)));

        let err = HersheyFont::from_sources("  699  2JZ\n", "699").unwrap_err();
        assert!(matches!(err, HersheyError::Database(_)));
    }
}
