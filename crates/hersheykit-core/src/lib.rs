//! # HersheyKit Core
//!
//! Decoding and layout for Hershey stroke fonts.
//!
//! ## Pipeline
//!
//! 1. [`GlyphDatabase::decode`] reads the fixed-column glyph database.
//! 2. [`CharacterMap::decode`] reads a `.hmp` character mapping.
//! 3. [`normalize`] turns one glyph's raw vertices into [`Stroke`]s.
//! 4. [`layout`] places the glyphs of a string along the baseline.
//!
//! Coordinates stay on the integer Hershey grid throughout; scaling and axis
//! orientation are left to the output writer.

pub mod codec;
pub mod database;
pub mod error;
pub mod font;
pub mod glyph;
pub mod layout;
pub mod mapping;

pub use codec::{decode_char, encode_offset, GridPoint, RawVertex};
pub use database::{GlyphDatabase, GlyphRecord};
pub use error::{
    DatabaseError, DatabaseResult, GlyphError, HersheyError, HersheyResult, LayoutError,
    MappingError, MappingResult,
};
pub use font::HersheyFont;
pub use glyph::{normalize, split_strokes, NormalizedGlyph, Stroke};
pub use layout::{layout, LayoutOptions, LayoutResult, UnmappedPolicy};
pub use mapping::{CharacterMap, MappingSummary};
