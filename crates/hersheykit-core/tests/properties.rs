use std::collections::BTreeMap;

use hersheykit_core::codec::{MAX_OFFSET, MIN_OFFSET};
use hersheykit_core::{
    layout, normalize, CharacterMap, GlyphDatabase, GlyphRecord, LayoutOptions, RawVertex,
};
use proptest::prelude::*;

fn offset() -> impl Strategy<Value = i32> {
    MIN_OFFSET..=MAX_OFFSET
}

fn vertex() -> impl Strategy<Value = RawVertex> {
    prop_oneof![
        1 => Just(RawVertex::PenUp),
        4 => (offset(), offset()).prop_map(|(x, y)| RawVertex::point(x, y)),
    ]
}

fn glyph_vertices() -> impl Strategy<Value = Vec<RawVertex>> {
    (
        MIN_OFFSET..=0,
        0..=MAX_OFFSET,
        prop::collection::vec(vertex(), 0..120),
    )
        .prop_map(|(left, right, drawable)| {
            let mut vertices = vec![RawVertex::point(left, right)];
            vertices.extend(drawable);
            vertices
        })
}

fn glyph_table() -> impl Strategy<Value = BTreeMap<u32, Vec<RawVertex>>> {
    prop::collection::btree_map(0u32..=99_999, glyph_vertices(), 1..8)
}

fn database_from(table: &BTreeMap<u32, Vec<RawVertex>>) -> GlyphDatabase {
    GlyphDatabase::from_records(
        table
            .iter()
            .map(|(index, vertices)| GlyphRecord::new(*index, vertices.clone())),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_encode_decode_round_trip(table in glyph_table()) {
        let database = database_from(&table);
        let encoded = database.encode().unwrap();
        let decoded = GlyphDatabase::decode(&encoded).unwrap();
        prop_assert_eq!(decoded, database);
    }

    #[test]
    fn prop_normalize_never_emits_degenerate_strokes(vertices in glyph_vertices()) {
        let glyph = normalize(&vertices).unwrap();
        prop_assert!(glyph.strokes.iter().all(|s| s.point_count() >= 2));

        let drawn: usize = glyph.strokes.iter().map(|s| s.point_count()).sum();
        let available = vertices[1..].iter().filter(|v| !v.is_pen_up()).count();
        prop_assert!(drawn <= available);
    }

    #[test]
    fn prop_layout_width_and_order(
        table in glyph_table(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
    ) {
        let database = database_from(&table);
        let indices: Vec<u32> = table.keys().copied().collect();

        let mut mapping = CharacterMap::new();
        for (offset, index) in indices.iter().enumerate() {
            mapping.insert(char::from(b'a' + offset as u8), *index).unwrap();
        }

        let chosen: Vec<usize> = picks.iter().map(|p| p.index(indices.len())).collect();
        let text: String = chosen.iter().map(|i| char::from(b'a' + *i as u8)).collect();

        let options = LayoutOptions::default();
        let result = layout(&text, &database, &mapping, &options).unwrap();

        let mut cursor = 0;
        let mut expected = Vec::new();
        for i in &chosen {
            let glyph = database.normalized(indices[*i]).unwrap();
            expected.extend(glyph.strokes.iter().map(|s| s.checked_translated(cursor, 0).unwrap()));
            cursor += glyph.advance_width();
        }
        prop_assert_eq!(result.total_width, cursor);
        prop_assert_eq!(&result.strokes, &expected);

        let again = layout(&text, &database, &mapping, &options).unwrap();
        prop_assert_eq!(again, result);
    }
}
