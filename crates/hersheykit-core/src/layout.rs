//! Text layout: placing glyph strokes along a single baseline.

use tracing::{debug, warn};

use crate::codec::GridPoint;
use crate::database::GlyphDatabase;
use crate::error::{GlyphError, LayoutError};
use crate::glyph::Stroke;
use crate::mapping::CharacterMap;

/// What to do with a character that has no mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmappedPolicy {
    /// Abort the layout with [`LayoutError::UnresolvedCharacter`].
    #[default]
    Fail,
    /// Draw nothing and move the cursor by `advance` grid units.
    Skip { advance: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    pub unmapped: UnmappedPolicy,
}

/// Positioned strokes for one string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutResult {
    /// Strokes in absolute grid coordinates, in input character order.
    pub strokes: Vec<Stroke>,
    /// Sum of the advance widths of every laid out character.
    pub total_width: i32,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::point_count).sum()
    }

    /// Minimum and maximum corners over all stroke points.
    pub fn bounds(&self) -> Option<(GridPoint, GridPoint)> {
        let mut points = self.strokes.iter().flat_map(|s| s.points().iter());
        let first = *points.next()?;
        Some(points.fold((first, first), |(min, max), p| {
            (
                GridPoint::new(min.x.min(p.x), min.y.min(p.y)),
                GridPoint::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}

/// Lays out `text` left to right starting at `x = 0`.
///
/// Each glyph is drawn with its cell's left edge at the cursor, and the
/// cursor then moves by the glyph's advance width. The result is all or
/// nothing: any error discards the strokes gathered so far.
pub fn layout(
    text: &str,
    database: &GlyphDatabase,
    mapping: &CharacterMap,
    options: &LayoutOptions,
) -> Result<LayoutResult, LayoutError> {
    let mut cursor = 0i32;
    let mut strokes = Vec::new();

    for (position, character) in text.chars().enumerate() {
        let overflow = || LayoutError::WidthOverflow {
            character,
            position,
        };

        let Some(glyph) = mapping.glyph_for(character) else {
            match options.unmapped {
                UnmappedPolicy::Fail => {
                    return Err(LayoutError::UnresolvedCharacter {
                        character,
                        position,
                    })
                }
                UnmappedPolicy::Skip { advance } => {
                    warn!(?character, position, advance, "Skipping unmapped character");
                    cursor = cursor.checked_add(advance).ok_or_else(overflow)?;
                    continue;
                }
            }
        };

        let normalized = database.normalized(glyph).map_err(|source| match source {
            GlyphError::UnknownGlyph { index } => LayoutError::UnknownGlyph {
                character,
                glyph: index,
            },
            source => LayoutError::Glyph {
                character,
                glyph,
                source,
            },
        })?;

        debug!(?character, glyph, x = cursor, width = normalized.advance_width(), "Placing glyph");
        for stroke in &normalized.strokes {
            let placed = stroke.checked_translated(cursor, 0).ok_or_else(overflow)?;
            debug!(?character, points = ?placed.points(), "Stroke");
            strokes.push(placed);
        }
        cursor = cursor
            .checked_add(normalized.advance_width())
            .ok_or_else(overflow)?;
    }

    Ok(LayoutResult {
        strokes,
        total_width: cursor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RawVertex;
    use crate::database::GlyphRecord;

    fn fixture() -> (GlyphDatabase, CharacterMap) {
        let database = GlyphDatabase::from_records([
            GlyphRecord::new(5, vec![RawVertex::point(-2, 2)]),
            GlyphRecord::new(
                7,
                vec![
                    RawVertex::point(-3, 3),
                    RawVertex::point(-3, -9),
                    RawVertex::point(3, 9),
                    RawVertex::PenUp,
                    RawVertex::point(-1, 2),
                    RawVertex::point(1, 2),
                ],
            ),
        ])
        .unwrap();
        let mapping = CharacterMap::decode("32:5 65:7 66:99").unwrap();
        (database, mapping)
    }

    #[test]
    fn test_space_has_width_but_no_strokes() {
        let (database, mapping) = fixture();
        let result = layout(" ", &database, &mapping, &LayoutOptions::default()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total_width, 4);
        assert_eq!(result.bounds(), None);
    }

    #[test]
    fn test_single_glyph_starts_at_origin() {
        let (database, mapping) = fixture();
        let result = layout("A", &database, &mapping, &LayoutOptions::default()).unwrap();
        assert_eq!(result.strokes.len(), 2);
        assert_eq!(
            result.strokes[1].points(),
            &[GridPoint::new(2, 2), GridPoint::new(4, 2)]
        );
        assert_eq!(
            result.bounds(),
            Some((GridPoint::new(0, -9), GridPoint::new(6, 9)))
        );
        assert_eq!(result.point_count(), 4);
    }

    #[test]
    fn test_unknown_glyph() {
        let (database, mapping) = fixture();
        let err = layout("AB", &database, &mapping, &LayoutOptions::default()).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownGlyph {
                character: 'B',
                glyph: 99,
            }
        );
    }

    #[test]
    fn test_unmapped_policies() {
        let (database, mapping) = fixture();
        let err = layout("A?A", &database, &mapping, &LayoutOptions::default()).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnresolvedCharacter {
                character: '?',
                position: 1,
            }
        );

        let options = LayoutOptions {
            unmapped: UnmappedPolicy::Skip { advance: 10 },
        };
        let result = layout("A?A", &database, &mapping, &options).unwrap();
        assert_eq!(result.total_width, 6 + 10 + 6);
        assert_eq!(result.strokes.len(), 4);
        assert_eq!(result.strokes[2].points()[0], GridPoint::new(16, -9));
    }

    #[test]
    fn test_cursor_overflow_is_an_error() {
        let (database, mapping) = fixture();
        let options = LayoutOptions {
            unmapped: UnmappedPolicy::Skip { advance: i32::MAX },
        };

        let err = layout("?? ", &database, &mapping, &options).unwrap_err();
        assert_eq!(
            err,
            LayoutError::WidthOverflow {
                character: '?',
                position: 1,
            }
        );

        let err = layout("?A", &database, &mapping, &options).unwrap_err();
        assert_eq!(
            err,
            LayoutError::WidthOverflow {
                character: 'A',
                position: 1,
            }
        );
    }

    #[test]
    fn test_empty_input() {
        let (database, mapping) = fixture();
        let result = layout("", &database, &mapping, &LayoutOptions::default()).unwrap();
        assert_eq!(result, LayoutResult::default());
    }
}
