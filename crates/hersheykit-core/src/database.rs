//! Hershey glyph database decoding and encoding.
//!
//! The database is a text file of fixed-column records:
//!
//! ```text
//!   501  9I[RFJ[ RRFZ[ RMTWT
//! ```
//!
//! Columns 0-4 hold the glyph index, columns 5-7 the vertex count (which
//! includes the left/right extent pair), and the rest of the record holds the
//! coordinate pairs. Long records wrap onto continuation lines; the line
//! breaks carry no meaning and record length is governed by the count alone.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::debug;

use crate::codec::{decode_char, decode_pair, encode_vertex, RawVertex};
use crate::error::{DatabaseError, DatabaseResult, GlyphError};
use crate::glyph::{normalize, NormalizedGlyph};

/// Width of the glyph index field.
const INDEX_WIDTH: usize = 5;
/// Width of the vertex count field.
const COUNT_WIDTH: usize = 3;
/// Columns before the first coordinate pair.
const HEADER_WIDTH: usize = INDEX_WIDTH + COUNT_WIDTH;
/// Largest glyph index that fits the index field.
const MAX_INDEX: u32 = 99_999;
/// Largest vertex count that fits the count field.
const MAX_VERTICES: usize = 999;

/// Line width used when encoding, as in the published Hershey data files.
pub const LINE_WIDTH: usize = 72;

/// A single glyph definition as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRecord {
    index: u32,
    vertices: Vec<RawVertex>,
}

impl GlyphRecord {
    /// Creates a record. `vertices[0]` is the left/right extent pair.
    pub fn new(index: u32, vertices: Vec<RawVertex>) -> Self {
        Self { index, vertices }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// All decoded pairs, extent pair first.
    pub fn vertices(&self) -> &[RawVertex] {
        &self.vertices
    }

    /// Left and right extents, if the record starts with an extent pair.
    pub fn extents(&self) -> Option<(i32, i32)> {
        match self.vertices.first() {
            Some(RawVertex::Point(p)) => Some((p.x, p.y)),
            _ => None,
        }
    }

    /// `None` without an extent pair or when the width leaves the `i32` range.
    pub fn advance_width(&self) -> Option<i32> {
        self.extents()
            .and_then(|(left, right)| right.checked_sub(left))
    }

    /// Splits the record into strokes. See [`normalize`].
    pub fn normalize(&self) -> Result<NormalizedGlyph, GlyphError> {
        normalize(&self.vertices)
    }
}

/// Decoded glyph table keyed by glyph index.
///
/// Built once and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphDatabase {
    glyphs: BTreeMap<u32, GlyphRecord>,
}

impl GlyphDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a database from in-memory records, rejecting duplicate indices.
    pub fn from_records<I>(records: I) -> DatabaseResult<Self>
    where
        I: IntoIterator<Item = GlyphRecord>,
    {
        let mut database = Self::new();
        for record in records {
            database.insert(record, 0)?;
        }
        Ok(database)
    }

    /// Decodes the full text of a Hershey database.
    pub fn decode(raw_text: &str) -> DatabaseResult<Self> {
        let mut database = Self::new();
        let mut lines = raw_text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line));

        while let Some((line_no, line)) = lines.next() {
            if line.trim().is_empty() {
                continue;
            }
            let record = decode_record(line_no, line, &mut lines)?;
            database.insert(record, line_no)?;
        }

        debug!(glyphs = database.len(), "Decoded Hershey glyph database");
        Ok(database)
    }

    /// Encodes the database in the fixed-column format, ordered by index.
    pub fn encode(&self) -> DatabaseResult<String> {
        let mut out = String::new();
        for record in self.glyphs.values() {
            encode_record(record, &mut out)?;
        }
        Ok(out)
    }

    pub fn get(&self, index: u32) -> Option<&GlyphRecord> {
        self.glyphs.get(&index)
    }

    pub fn contains(&self, index: u32) -> bool {
        self.glyphs.contains_key(&index)
    }

    /// Looks up a glyph and splits it into strokes.
    pub fn normalized(&self, index: u32) -> Result<NormalizedGlyph, GlyphError> {
        self.get(index)
            .ok_or(GlyphError::UnknownGlyph { index })?
            .normalize()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.glyphs.keys().copied()
    }

    pub fn records(&self) -> impl Iterator<Item = &GlyphRecord> {
        self.glyphs.values()
    }

    fn insert(&mut self, record: GlyphRecord, line: usize) -> DatabaseResult<()> {
        match self.glyphs.entry(record.index) {
            Entry::Occupied(_) => Err(DatabaseError::DuplicateGlyph {
                glyph: record.index,
                line,
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }
}

fn parse_header(line_no: usize, header: &str) -> DatabaseResult<(u32, usize)> {
    let malformed = |reason: String| DatabaseError::MalformedHeader {
        line: line_no,
        reason,
    };

    if header.len() < HEADER_WIDTH + 2 {
        return Err(malformed(format!(
            "record line has {} columns, expected at least {}",
            header.len(),
            HEADER_WIDTH + 2
        )));
    }

    let index_field = header
        .get(..INDEX_WIDTH)
        .ok_or_else(|| malformed("glyph index field is not ASCII".to_string()))?;
    let count_field = header
        .get(INDEX_WIDTH..HEADER_WIDTH)
        .ok_or_else(|| malformed("vertex count field is not ASCII".to_string()))?;

    let index = index_field
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(format!("invalid glyph index {index_field:?}")))?;
    let count = count_field
        .trim()
        .parse::<usize>()
        .map_err(|_| malformed(format!("invalid vertex count {count_field:?}")))?;

    Ok((index, count))
}

fn decode_record<'a, I>(line_no: usize, header: &str, lines: &mut I) -> DatabaseResult<GlyphRecord>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let (glyph, declared) = parse_header(line_no, header)?;
    if declared == 0 {
        return Err(DatabaseError::EmptyRecord {
            glyph,
            line: line_no,
        });
    }

    // Characters tagged with their source line, so errors can point at it.
    let needed = declared * 2;
    let mut data: Vec<(usize, char)> = header[HEADER_WIDTH..]
        .chars()
        .map(|c| (line_no, c))
        .collect();

    while data.len() < needed {
        match lines.next() {
            Some((n, continuation)) => data.extend(continuation.chars().map(|c| (n, c))),
            None => break,
        }
    }

    if data.len() < needed {
        return Err(DatabaseError::VertexCountMismatch {
            glyph,
            line: line_no,
            declared,
            found: data.len() / 2,
        });
    }

    let (pairs, rest) = data.split_at(needed);
    if let Some(last) = rest.iter().rposition(|(_, c)| !c.is_whitespace()) {
        return Err(DatabaseError::VertexCountMismatch {
            glyph,
            line: line_no,
            declared,
            found: declared + (last + 1).div_ceil(2),
        });
    }

    let vertices = pairs
        .chunks_exact(2)
        .map(|pair| {
            let ((first_line, first), (second_line, second)) = (pair[0], pair[1]);
            decode_pair(first, second).map_err(|character| DatabaseError::InvalidCharacter {
                glyph,
                line: if decode_char(first).is_none() {
                    first_line
                } else {
                    second_line
                },
                character,
            })
        })
        .collect::<DatabaseResult<Vec<_>>>()?;

    if vertices[0].is_pen_up() {
        return Err(DatabaseError::PenUpExtents {
            glyph,
            line: line_no,
        });
    }

    Ok(GlyphRecord::new(glyph, vertices))
}

fn encode_record(record: &GlyphRecord, out: &mut String) -> DatabaseResult<()> {
    let unencodable = |reason: String| DatabaseError::Unencodable {
        glyph: record.index,
        reason,
    };

    if record.index > MAX_INDEX {
        return Err(unencodable(format!(
            "index does not fit in {INDEX_WIDTH} columns"
        )));
    }
    let count = record.vertices.len();
    if count == 0 {
        return Err(unencodable("record has no extent pair".to_string()));
    }
    if count > MAX_VERTICES {
        return Err(unencodable(format!(
            "{count} vertices do not fit in {COUNT_WIDTH} columns"
        )));
    }
    if record.vertices[0].is_pen_up() {
        return Err(unencodable("extent pair is a pen-up marker".to_string()));
    }

    out.push_str(&format!(
        "{:>iw$}{:>cw$}",
        record.index,
        count,
        iw = INDEX_WIDTH,
        cw = COUNT_WIDTH
    ));

    let mut column = HEADER_WIDTH;
    for vertex in &record.vertices {
        let pair = encode_vertex(vertex)
            .ok_or_else(|| unencodable(format!("{vertex:?} is outside the coordinate alphabet")))?;
        if column + 2 > LINE_WIDTH {
            out.push('\n');
            column = 0;
        }
        out.extend(pair);
        column += 2;
    }
    out.push('\n');
    Ok(())
}
