//! Tests for the distance-sorted offset list

#[cfg(test)]
mod tests {
    use resynth::spatial::{Coord, OffsetList};
    use std::collections::HashSet;

    #[test]
    fn test_offset_count_uses_overlap() {
        let corpus = (5, 3);
        let output = (4, 6);
        let offsets = OffsetList::build(corpus, output).expect("allocates");

        // min widths 4, min heights 3
        assert_eq!(offsets.len(), 7 * 5);
        assert_eq!(OffsetList::expected_len(corpus, output), 35);
    }

    #[test]
    fn test_offsets_sorted_by_squared_length() {
        let offsets = OffsetList::build((6, 6), (9, 4)).expect("allocates");
        let lengths: Vec<i64> = offsets.as_slice().iter().map(|o| o.norm_squared()).collect();

        assert!(lengths.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(offsets.as_slice().first(), Some(&Coord::new(0, 0)));
    }

    #[test]
    fn test_offsets_cover_every_vector_once() {
        let offsets = OffsetList::build((3, 4), (3, 4)).expect("allocates");
        let unique: HashSet<Coord> = offsets.as_slice().iter().copied().collect();

        assert_eq!(unique.len(), offsets.len());
        for x in -2..=2 {
            for y in -3..=3 {
                assert!(unique.contains(&Coord::new(x, y)));
            }
        }
        assert!(!unique.contains(&Coord::new(3, 0)));
    }

    // Ties keep generation order, rows first
    #[test]
    fn test_tie_order_is_deterministic() {
        let offsets = OffsetList::build((3, 3), (3, 3)).expect("allocates");
        let nearest: Vec<Coord> = offsets.as_slice().iter().skip(1).take(4).copied().collect();

        assert_eq!(
            nearest,
            vec![
                Coord::new(0, -1),
                Coord::new(-1, 0),
                Coord::new(1, 0),
                Coord::new(0, 1)
            ]
        );
        assert_eq!(offsets, OffsetList::build((3, 3), (3, 3)).expect("allocates"));
    }

    #[test]
    fn test_degenerate_dimensions() {
        let single = OffsetList::build((1, 1), (8, 8)).expect("allocates");
        assert_eq!(single.as_slice(), &[Coord::new(0, 0)]);

        let empty = OffsetList::build((0, 4), (4, 4)).expect("allocates");
        assert!(empty.is_empty());
        assert_eq!(OffsetList::expected_len((0, 4), (4, 4)), 0);
    }
}
