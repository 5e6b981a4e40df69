use amaze_core::Coord;

/// Manhattan (L1) distance between two grid cells.
///
/// This is the heuristic used by the priority-ordered search policies; it
/// is admissible and consistent for unit-cost 4-directional movement.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_sums_axis_deltas() {
        assert_eq!(manhattan(Coord::new(0, 0), Coord::new(2, 2)), 4);
        assert_eq!(manhattan(Coord::new(5, 1), Coord::new(1, 5)), 8);
        assert_eq!(manhattan(Coord::new(3, 3), Coord::new(3, 3)), 0);
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Coord::new(7, 2);
        let b = Coord::new(0, 9);
        assert_eq!(manhattan(a, b), manhattan(b, a));
    }
}
