//! Boundary chain simplification and polygon area.

/// Compresses straight runs of a closed boundary chain down to their ends.
///
/// Consecutive duplicate points are dropped first, then every point whose
/// incoming and outgoing step share a direction is removed. The result keeps
/// trace order, starting from the first surviving point.
pub fn simplify_closed_chain(chain: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut points: Vec<(i64, i64)> = Vec::with_capacity(chain.len());
    for &p in chain {
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() <= 2 {
        return points;
    }

    let n = points.len();
    let step = |from: (i64, i64), to: (i64, i64)| ((to.0 - from.0).signum(), (to.1 - from.1).signum());
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect()
}

/// Area enclosed by a closed polygon (shoelace formula, always non-negative).
pub fn polygon_area(polygon: &[(i64, i64)]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let n = polygon.len();
    let twice: i64 = (0..n)
        .map(|i| {
            let (x0, y0) = polygon[i];
            let (x1, y1) = polygon[(i + 1) % n];
            x0 * y1 - x1 * y0
        })
        .sum();
    twice.abs() as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::{polygon_area, simplify_closed_chain};

    fn square_chain(size: i64) -> Vec<(i64, i64)> {
        let mut chain = Vec::new();
        for x in 0..size {
            chain.push((x, 0));
        }
        for y in 0..size {
            chain.push((size, y));
        }
        for x in (1..=size).rev() {
            chain.push((x, size));
        }
        for y in (1..=size).rev() {
            chain.push((0, y));
        }
        chain
    }

    #[test]
    fn straight_runs_collapse_to_corners() {
        let corners = simplify_closed_chain(&square_chain(4));
        assert_eq!(corners, vec![(0, 0), (4, 0), (4, 4), (0, 4)]);
    }

    #[test]
    fn diagonal_runs_collapse_too() {
        let chain = vec![(2, 0), (3, 1), (4, 2), (3, 3), (2, 4), (1, 3), (0, 2), (1, 1)];
        assert_eq!(
            simplify_closed_chain(&chain),
            vec![(2, 0), (4, 2), (2, 4), (0, 2)]
        );
    }

    #[test]
    fn there_and_back_line_keeps_endpoints() {
        let chain = vec![(0, 0), (1, 0), (2, 0), (1, 0)];
        assert_eq!(simplify_closed_chain(&chain), vec![(0, 0), (2, 0)]);
    }

    #[test]
    fn duplicates_and_closing_point_are_dropped() {
        let chain = vec![(0, 0), (0, 0), (3, 0), (3, 3), (0, 3), (0, 0)];
        assert_eq!(
            simplify_closed_chain(&chain),
            vec![(0, 0), (3, 0), (3, 3), (0, 3)]
        );
    }

    #[test]
    fn shoelace_area_ignores_orientation() {
        let square = [(0, 0), (10, 0), (10, 10), (0, 10)];
        assert_eq!(polygon_area(&square), 100.0);
        let reversed: Vec<_> = square.iter().rev().copied().collect();
        assert_eq!(polygon_area(&reversed), 100.0);
        assert_eq!(polygon_area(&[(0, 0), (5, 5)]), 0.0);
    }
}
