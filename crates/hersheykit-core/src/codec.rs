//! Character-pair coordinate encoding used by Hershey font data.
//!
//! Every coordinate component is stored as one printable ASCII character
//! whose value is its offset from `'R'`. The pair `" R"` is reserved as the
//! pen-up marker between disjoint strokes.

/// Character that encodes the offset zero.
pub const ORIGIN_CHAR: char = 'R';

/// First character of the pen-up marker pair.
pub const PEN_UP_FIRST: char = ' ';

/// Smallest offset representable by a coordinate character (`'!'`).
pub const MIN_OFFSET: i32 = '!' as i32 - ORIGIN_CHAR as i32;

/// Largest offset representable by a coordinate character (`'~'`).
pub const MAX_OFFSET: i32 = '~' as i32 - ORIGIN_CHAR as i32;

/// A point on the Hershey integer grid. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)`, or `None` if a coordinate
    /// leaves the `i32` range.
    pub fn checked_translated(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One decoded coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawVertex {
    /// A coordinate (or, for the first pair of a record, the extents).
    Point(GridPoint),
    /// Lift the pen: the next point starts a new stroke.
    PenUp,
}

impl RawVertex {
    pub const fn point(x: i32, y: i32) -> Self {
        Self::Point(GridPoint::new(x, y))
    }

    pub const fn is_pen_up(&self) -> bool {
        matches!(self, Self::PenUp)
    }
}

/// Decodes a single coordinate character into its signed offset.
///
/// Returns `None` for characters outside `'!'..='~'`, which includes the
/// space that only appears as part of the pen-up marker.
pub fn decode_char(c: char) -> Option<i32> {
    if ('!'..='~').contains(&c) {
        Some(c as i32 - ORIGIN_CHAR as i32)
    } else {
        None
    }
}

/// Encodes a signed offset as a coordinate character.
pub fn encode_offset(value: i32) -> Option<char> {
    if (MIN_OFFSET..=MAX_OFFSET).contains(&value) {
        char::from_u32((ORIGIN_CHAR as i32 + value) as u32)
    } else {
        None
    }
}

/// Decodes a character pair. On failure returns the first invalid character.
pub fn decode_pair(first: char, second: char) -> Result<RawVertex, char> {
    if first == PEN_UP_FIRST && second == ORIGIN_CHAR {
        return Ok(RawVertex::PenUp);
    }
    let x = decode_char(first).ok_or(first)?;
    let y = decode_char(second).ok_or(second)?;
    Ok(RawVertex::point(x, y))
}

/// Encodes a vertex as a character pair, or `None` if a component is out of range.
pub fn encode_vertex(vertex: &RawVertex) -> Option<[char; 2]> {
    match vertex {
        RawVertex::PenUp => Some([PEN_UP_FIRST, ORIGIN_CHAR]),
        RawVertex::Point(p) => Some([encode_offset(p.x)?, encode_offset(p.y)?]),
    }
}
