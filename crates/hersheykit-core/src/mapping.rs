//! Character to glyph mapping tables (`.hmp` files).
//!
//! A mapping file is a whitespace separated list of tokens read with a
//! running character code that starts at 32 (space):
//!
//! - `G` maps the current character to glyph `G`;
//! - `A-B` maps consecutive characters to glyphs `A` through `B`;
//! - `C:G` maps character code `C` to glyph `G` and continues at `C + 1`.
//!
//! Assigning the same character twice is an error.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::database::GlyphDatabase;
use crate::error::{MappingError, MappingResult};

/// Character code assigned to the first sequential token.
pub const FIRST_CHAR_CODE: u32 = 32;

/// Characters listed by [`MappingSummary`] when present.
const SAMPLE_CHARS: [char; 9] = ['A', 'B', 'C', 'a', 'b', 'c', '0', '1', '2'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Glyph(u32),
    Range(u32, u32),
    Explicit { code: u32, glyph: u32 },
}

fn parse_number(field: &str, what: &str) -> Result<u32, String> {
    if field.is_empty() {
        return Err(format!("missing {what}"));
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{what} {field:?} is not a non-negative integer"));
    }
    field
        .parse()
        .map_err(|_| format!("{what} {field:?} is too large"))
}

fn parse_token(token: &str) -> Result<Token, String> {
    if let Some((code, glyph)) = token.split_once(':') {
        return Ok(Token::Explicit {
            code: parse_number(code, "character code")?,
            glyph: parse_number(glyph, "glyph index")?,
        });
    }

    if let Some((start, end)) = token.split_once('-') {
        if start.is_empty() {
            return Err("glyph indices cannot be negative".to_string());
        }
        let start = parse_number(start, "range start")?;
        let end = parse_number(end, "range end")?;
        if end < start {
            return Err(format!("range end {end} is before start {start}"));
        }
        return Ok(Token::Range(start, end));
    }

    Ok(Token::Glyph(parse_number(token, "glyph index")?))
}

/// Lookup table from input characters to glyph indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterMap {
    entries: BTreeMap<char, u32>,
}

impl CharacterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a mapping file.
    pub fn decode(mapping_text: &str) -> MappingResult<Self> {
        let mut map = Self::new();
        let mut cursor = FIRST_CHAR_CODE;

        for (line_index, line) in mapping_text.lines().enumerate() {
            let line_no = line_index + 1;
            for token in line.split_whitespace() {
                let parsed = parse_token(token).map_err(|reason| MappingError::Malformed {
                    line: line_no,
                    token: token.to_string(),
                    reason,
                })?;

                match parsed {
                    Token::Glyph(glyph) => {
                        map.assign(cursor, glyph, line_no, token)?;
                        cursor = cursor.saturating_add(1);
                    }
                    Token::Range(start, end) => {
                        for glyph in start..=end {
                            map.assign(cursor, glyph, line_no, token)?;
                            cursor = cursor.saturating_add(1);
                        }
                    }
                    Token::Explicit { code, glyph } => {
                        map.assign(code, glyph, line_no, token)?;
                        cursor = code.saturating_add(1);
                    }
                }
            }
        }

        debug!(characters = map.len(), "Decoded character mapping");
        Ok(map)
    }

    /// Adds a single mapping, rejecting duplicates.
    pub fn insert(&mut self, character: char, glyph: u32) -> MappingResult<()> {
        self.assign(character as u32, glyph, 0, &character.to_string())
    }

    fn assign(&mut self, code: u32, glyph: u32, line: usize, token: &str) -> MappingResult<()> {
        let character = char::from_u32(code).ok_or_else(|| MappingError::Malformed {
            line,
            token: token.to_string(),
            reason: format!("character code {code} is not a valid character"),
        })?;

        match self.entries.entry(character) {
            Entry::Occupied(existing) => Err(MappingError::Duplicate {
                char_code: code,
                existing: *existing.get(),
                replacement: glyph,
                line,
            }),
            Entry::Vacant(slot) => {
                slot.insert(glyph);
                Ok(())
            }
        }
    }

    pub fn glyph_for(&self, character: char) -> Option<u32> {
        self.entries.get(&character).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mappings ordered by character.
    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.entries.iter().map(|(c, g)| (*c, *g))
    }

    /// Entries whose glyph is absent from `database`.
    ///
    /// Such entries only fail when a string actually uses them.
    pub fn missing_glyphs(&self, database: &GlyphDatabase) -> Vec<(char, u32)> {
        self.iter()
            .filter(|(_, glyph)| !database.contains(*glyph))
            .collect()
    }

    pub fn summary(&self) -> MappingSummary {
        MappingSummary {
            count: self.len(),
            first: self.entries.keys().next().copied(),
            last: self.entries.keys().next_back().copied(),
            samples: SAMPLE_CHARS
                .iter()
                .filter_map(|c| self.glyph_for(*c).map(|g| (*c, g)))
                .collect(),
        }
    }
}

/// Overview of a mapping table, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSummary {
    pub count: usize,
    pub first: Option<char>,
    pub last: Option<char>,
    pub samples: Vec<(char, u32)>,
}

impl fmt::Display for MappingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mapping contains {} characters", self.count)?;
        if let (Some(first), Some(last)) = (self.first, self.last) {
            writeln!(
                f,
                "Character range: {:?} ({}) to {:?} ({})",
                first, first as u32, last, last as u32
            )?;
        }
        if !self.samples.is_empty() {
            writeln!(f, "Sample mappings:")?;
            for (c, glyph) in &self.samples {
                writeln!(f, "  {c:?} -> glyph {glyph}")?;
            }
        }
        Ok(())
    }
}
