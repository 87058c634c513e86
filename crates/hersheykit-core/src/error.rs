//! Error types for the Hershey font core.
//!
//! Decoding the glyph database and the mapping file, normalizing glyph
//! geometry and laying out text each have their own error enum. All of them
//! convert into [`HersheyError`] for callers that drive the whole pipeline.

use std::io;
use thiserror::Error;

/// Errors raised while decoding (or encoding) a glyph database.
///
/// Every variant belongs to the "corrupt database" category: a database that
/// fails to decode cannot be partially used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// The record header could not be read.
    #[error("Malformed record header at line {line}: {reason}")]
    MalformedHeader {
        /// 1-based line number of the header.
        line: usize,
        /// What was wrong with the header.
        reason: String,
    },

    /// A record declared zero vertices, so it has no extent pair.
    #[error("Glyph {glyph} at line {line} declares no vertices")]
    EmptyRecord {
        /// Glyph index of the record.
        glyph: u32,
        /// 1-based line number of the header.
        line: usize,
    },

    /// The number of coordinate pairs differs from the declared count.
    #[error("Glyph {glyph} at line {line} declares {declared} vertices but {found} are present")]
    VertexCountMismatch {
        /// Glyph index of the record.
        glyph: u32,
        /// 1-based line number of the header.
        line: usize,
        /// Vertex count from the header.
        declared: usize,
        /// Vertex pairs actually available.
        found: usize,
    },

    /// A character outside the coordinate alphabet.
    #[error("Glyph {glyph} at line {line}: invalid coordinate character {character:?}")]
    InvalidCharacter {
        /// Glyph index of the record.
        glyph: u32,
        /// 1-based line number where the character was found.
        line: usize,
        /// The offending character.
        character: char,
    },

    /// The left/right extent pair is the pen-up sentinel.
    #[error("Glyph {glyph} at line {line} has a pen-up marker in place of its extents")]
    PenUpExtents {
        /// Glyph index of the record.
        glyph: u32,
        /// 1-based line number of the header.
        line: usize,
    },

    /// The same glyph index was defined twice.
    #[error("Duplicate glyph {glyph} at line {line}")]
    DuplicateGlyph {
        /// The repeated glyph index.
        glyph: u32,
        /// 1-based line number of the second definition (0 when built in memory).
        line: usize,
    },

    /// A record cannot be written in the fixed-column format.
    #[error("Glyph {glyph} cannot be encoded: {reason}")]
    Unencodable {
        /// Glyph index of the record.
        glyph: u32,
        /// Why the record does not fit the format.
        reason: String,
    },
}

/// Errors raised while decoding a character mapping file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A token that is not a glyph number, a range or an explicit entry.
    #[error("Malformed mapping entry {token:?} at line {line}: {reason}")]
    Malformed {
        /// 1-based line number of the token.
        line: usize,
        /// The token as written.
        token: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A character code was assigned more than once.
    #[error("Duplicate mapping for character code {char_code} at line {line}: glyph {existing} already assigned, got {replacement}")]
    Duplicate {
        /// The character code assigned twice.
        char_code: u32,
        /// Glyph from the first assignment.
        existing: u32,
        /// Glyph from the rejected assignment.
        replacement: u32,
        /// 1-based line number of the rejected assignment.
        line: usize,
    },
}

/// Errors raised while turning a glyph record into strokes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    /// The glyph index is not present in the database.
    #[error("Unknown glyph {index}")]
    UnknownGlyph {
        /// The missing glyph index.
        index: u32,
    },

    /// The vertex stream does not start with an extent pair.
    #[error("Vertex stream has no left/right extent pair")]
    MissingExtents,

    /// Shifting the glyph to its left edge leaves the `i32` grid.
    #[error("Glyph extents ({left}, {right}) put coordinates out of range")]
    CoordinateOverflow { left: i32, right: i32 },
}

/// Errors raised while laying out a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A character mapped to a glyph that the database does not contain.
    #[error("Character {character:?} maps to unknown glyph {glyph}")]
    UnknownGlyph {
        /// The character being laid out.
        character: char,
        /// The glyph index it resolved to.
        glyph: u32,
    },

    /// A character has no entry in the mapping table.
    #[error("Character {character:?} at position {position} has no glyph mapping")]
    UnresolvedCharacter {
        /// The unmapped character.
        character: char,
        /// Position of the character in the input, counted in chars.
        position: usize,
    },

    /// A glyph record could not be normalized.
    #[error("Glyph {glyph} for character {character:?} is malformed: {source}")]
    Glyph {
        /// The character being laid out.
        character: char,
        /// The glyph index it resolved to.
        glyph: u32,
        /// Underlying normalization error.
        #[source]
        source: GlyphError,
    },

    /// The cursor or a placed coordinate no longer fits in an `i32`.
    #[error("Layout width overflows at character {character:?} (position {position})")]
    WidthOverflow {
        /// The character whose placement overflowed.
        character: char,
        /// Position of the character in the input, counted in chars.
        position: usize,
    },
}

/// Umbrella error for the whole text-to-strokes pipeline.
#[derive(Error, Debug)]
pub enum HersheyError {
    /// The glyph database is corrupt.
    #[error("Corrupt glyph database: {0}")]
    Database(#[from] DatabaseError),

    /// The mapping file is malformed.
    #[error("Invalid character mapping: {0}")]
    Mapping(#[from] MappingError),

    /// A glyph could not be normalized.
    #[error("Glyph error: {0}")]
    Glyph(#[from] GlyphError),

    /// Layout of a string failed.
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    /// I/O error while reading font files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Result type alias for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// Result type alias for the whole pipeline.
pub type HersheyResult<T> = Result<T, HersheyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::VertexCountMismatch {
            glyph: 501,
            line: 3,
            declared: 9,
            found: 7,
        };
        assert_eq!(
            err.to_string(),
            "Glyph 501 at line 3 declares 9 vertices but 7 are present"
        );

        let err = DatabaseError::InvalidCharacter {
            glyph: 12,
            line: 1,
            character: '\t',
        };
        assert_eq!(
            err.to_string(),
            "Glyph 12 at line 1: invalid coordinate character '\\t'"
        );
    }

    #[test]
    fn test_mapping_error_display() {
        let err = MappingError::Malformed {
            line: 2,
            token: "12a".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed mapping entry \"12a\" at line 2: not a number"
        );

        let err = MappingError::Duplicate {
            char_code: 65,
            existing: 501,
            replacement: 502,
            line: 4,
        };
        assert!(err.to_string().contains("character code 65"));
    }

    #[test]
    fn test_layout_error_display() {
        let err = LayoutError::UnknownGlyph {
            character: 'A',
            glyph: 99,
        };
        assert_eq!(err.to_string(), "Character 'A' maps to unknown glyph 99");

        let err = LayoutError::UnresolvedCharacter {
            character: '~',
            position: 3,
        };
        assert_eq!(
            err.to_string(),
            "Character '~' at position 3 has no glyph mapping"
        );

        let err = LayoutError::WidthOverflow {
            character: 'x',
            position: 7,
        };
        assert_eq!(
            err.to_string(),
            "Layout width overflows at character 'x' (position 7)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: HersheyError = DatabaseError::EmptyRecord { glyph: 1, line: 1 }.into();
        assert!(matches!(err, HersheyError::Database(_)));

        let err: HersheyError = GlyphError::UnknownGlyph { index: 99 }.into();
        assert!(matches!(err, HersheyError::Glyph(_)));

        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing font");
        let err: HersheyError = io_err.into();
        assert!(matches!(err, HersheyError::Io(_)));
    }
}
