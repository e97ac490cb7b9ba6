pub mod search;

pub use search::{Direction, PathSearch};

use orthoroute_common::geom::{Axis, GridCoord};

/// Axis of the step between two adjacent cells.
pub fn step_axis(a: GridCoord, b: GridCoord) -> Axis {
    if a.y == b.y {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Reduces a cell-by-cell path to its endpoints and bend cells.
pub fn corners(path: &[GridCoord]) -> Vec<GridCoord> {
    let mut out = Vec::new();
    let Some(&first) = path.first() else {
        return out;
    };
    out.push(first);
    for w in path.windows(3) {
        if step_axis(w[0], w[1]) != step_axis(w[1], w[2]) {
            out.push(w[1]);
        }
    }
    if let Some(&last) = path.last() {
        out.push(last);
    }
    out
}

/// Expands bend-to-bend corners back into the full cell path.
pub fn expand(corners: &[GridCoord]) -> Vec<GridCoord> {
    let mut path: Vec<GridCoord> = corners.first().copied().into_iter().collect();
    for w in corners.windows(2) {
        let (mut c, end) = (w[0], w[1]);
        while c != end {
            c = GridCoord::new(step_toward(c.x, end.x), step_toward(c.y, end.y));
            path.push(c);
        }
    }
    path.dedup();
    path
}

fn step_toward(from: u32, to: u32) -> u32 {
    match from.cmp(&to) {
        std::cmp::Ordering::Less => from + 1,
        std::cmp::Ordering::Greater => from - 1,
        std::cmp::Ordering::Equal => from,
    }
}

/// The (cell, axis) pairs a path holds privately once committed: the axis of
/// a straight pass, both axes at a bend, the single axis at each endpoint.
pub fn claims(path: &[GridCoord]) -> Vec<(GridCoord, Axis)> {
    let mut out = Vec::with_capacity(path.len() + 2);
    for (i, &c) in path.iter().enumerate() {
        let incoming = (i > 0).then(|| step_axis(path[i - 1], c));
        let outgoing = path.get(i + 1).map(|&n| step_axis(c, n));
        match (incoming, outgoing) {
            (Some(a), Some(b)) if a != b => {
                out.push((c, a));
                out.push((c, b));
            }
            (Some(a), _) | (None, Some(a)) => out.push((c, a)),
            (None, None) => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(x: u32, y: u32) -> GridCoord {
        GridCoord::new(x, y)
    }

    #[test]
    fn corners_keep_bends_only() {
        let path = [g(0, 0), g(1, 0), g(2, 0), g(2, 1), g(2, 2), g(3, 2)];
        assert_eq!(corners(&path), vec![g(0, 0), g(2, 0), g(2, 2), g(3, 2)]);
    }

    #[test]
    fn expand_inverts_corners() {
        let path = [g(0, 0), g(1, 0), g(2, 0), g(2, 1), g(2, 2), g(1, 2)];
        assert_eq!(expand(&corners(&path)), path.to_vec());
        assert_eq!(expand(&[g(3, 3), g(3, 3)]), vec![g(3, 3)]);
    }

    #[test]
    fn claims_follow_path_shape() {
        let path = [g(0, 0), g(1, 0), g(1, 1)];
        assert_eq!(
            claims(&path),
            vec![
                (g(0, 0), Axis::Horizontal),
                (g(1, 0), Axis::Horizontal),
                (g(1, 0), Axis::Vertical),
                (g(1, 1), Axis::Vertical),
            ]
        );
        assert!(claims(&[g(5, 5)]).is_empty());
    }

    #[test]
    fn single_cell_path_keeps_both_ends() {
        assert_eq!(corners(&[g(4, 4)]), vec![g(4, 4), g(4, 4)]);
        assert!(corners(&[]).is_empty());
    }
}
