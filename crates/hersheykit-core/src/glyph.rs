//! Glyph geometry: turning a raw vertex stream into pen strokes.

use crate::codec::{GridPoint, RawVertex};
use crate::error::GlyphError;

/// A contiguous polyline drawn without lifting the pen.
///
/// Always holds at least [`Stroke::MIN_POINTS`] points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stroke {
    points: Vec<GridPoint>,
}

impl Stroke {
    pub const MIN_POINTS: usize = 2;

    /// Returns `None` for degenerate input (fewer than two points).
    pub fn new(points: Vec<GridPoint>) -> Option<Self> {
        (points.len() >= Self::MIN_POINTS).then_some(Self { points })
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn into_points(self) -> Vec<GridPoint> {
        self.points
    }

    pub fn checked_translated(&self, dx: i32, dy: i32) -> Option<Self> {
        let points = self
            .points
            .iter()
            .map(|p| p.checked_translated(dx, dy))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { points })
    }
}

/// A glyph ready for layout.
///
/// Stroke x coordinates are relative to the left edge of the glyph cell,
/// so a glyph placed at cursor `c` occupies `c..c + advance_width()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedGlyph {
    /// Left extent in the source grid (usually negative).
    pub left: i32,
    /// Right extent in the source grid.
    pub right: i32,
    pub strokes: Vec<Stroke>,
}

impl NormalizedGlyph {
    pub fn advance_width(&self) -> i32 {
        self.right - self.left
    }
}

/// Splits drawable vertices into strokes at every pen-up marker.
///
/// Segments with fewer than two points are dropped, which covers repeated
/// markers and markers at either end.
pub fn split_strokes(vertices: &[RawVertex]) -> Vec<Stroke> {
    vertices
        .split(RawVertex::is_pen_up)
        .filter_map(|segment| {
            let points = segment
                .iter()
                .filter_map(|vertex| match vertex {
                    RawVertex::Point(p) => Some(*p),
                    RawVertex::PenUp => None,
                })
                .collect();
            Stroke::new(points)
        })
        .collect()
}

/// Normalizes a record's raw vertices.
///
/// The first pair holds the left and right extents and is not drawn. The
/// remaining pairs become strokes, shifted so the left extent sits at `x = 0`.
pub fn normalize(raw_vertices: &[RawVertex]) -> Result<NormalizedGlyph, GlyphError> {
    let (extents, drawable) = raw_vertices
        .split_first()
        .ok_or(GlyphError::MissingExtents)?;
    let RawVertex::Point(GridPoint { x: left, y: right }) = *extents else {
        return Err(GlyphError::MissingExtents);
    };

    let overflow = GlyphError::CoordinateOverflow { left, right };
    let (Some(_), Some(shift)) = (right.checked_sub(left), left.checked_neg()) else {
        return Err(overflow);
    };
    let strokes = split_strokes(drawable)
        .iter()
        .map(|stroke| stroke.checked_translated(shift, 0))
        .collect::<Option<Vec<_>>>()
        .ok_or(overflow)?;

    Ok(NormalizedGlyph {
        left,
        right,
        strokes,
    })
}
