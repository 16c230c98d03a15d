/// Points on the perimeter of a square with the given radius, as offsets from
/// the square's center.
///
/// The radius is the distance from the center cell to a perimeter cell along
/// a coordinate axis. A square of radius `r > 0` has `8r` perimeter points,
/// every point is yielded exactly once. The top and bottom rows are walked
/// in full, the rows in between only contribute their two end cells.
///
/// ```notrust
/// r = 2
///
///   * * * * *
///   * . . . *
///   * . @ . *
///   * . . . *
///   * * * * *
/// ```
pub fn perimeter(radius: i32) -> impl Iterator<Item = [i32; 2]> {
    let r = radius.max(0);
    (-r..=r).flat_map(move |y| {
        let row: Vec<[i32; 2]> = if r == 0 {
            vec![[0, 0]]
        } else if y.abs() == r {
            (-r..=r).map(|x| [x, y]).collect()
        } else {
            vec![[-r, y], [r, y]]
        };
        row.into_iter()
    })
}

/// One quarter of the torch square, scanned during artifact repair.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Quadrant {
    /// Far corner of the quadrant, scaled by radius.
    pub corner: [i32; 2],
    /// Scan direction, pointing from the corner towards the center.
    pub step: [i32; 2],
    /// Neighbor offsets whose lit floor reveals a dark cell.
    pub neighbors: [[i32; 2]; 3],
}

/// Repair pass quadrants in scan order.
///
/// The neighbor sets are a heuristic and are not mirror images of each
/// other. The western quadrants look towards the center, the eastern ones
/// look partly away from it, north for north-east and south for
/// south-east. The FOV output depends on this exact table.
pub const QUADRANTS: [Quadrant; 4] = [
    Quadrant {
        corner: [-1, -1],
        step: [1, 1],
        neighbors: [[0, 1], [1, 0], [1, 1]],
    },
    Quadrant {
        corner: [-1, 1],
        step: [1, -1],
        neighbors: [[0, -1], [1, 0], [1, -1]],
    },
    Quadrant {
        corner: [1, -1],
        step: [-1, 1],
        neighbors: [[0, -1], [-1, 0], [-1, -1]],
    },
    Quadrant {
        corner: [1, 1],
        step: [-1, -1],
        neighbors: [[0, 1], [-1, 0], [-1, 1]],
    },
];

impl Quadrant {
    /// Offsets of the cells in this quadrant in scan order.
    ///
    /// The x coordinate is the outer loop. Scanning runs from the far edge
    /// up to but not including the center row and column.
    pub fn scan(self, radius: i32) -> impl Iterator<Item = [i32; 2]> {
        let [cx, cy] = self.corner;
        let [sx, sy] = self.step;
        let r = radius.max(0);
        (0..r).flat_map(move |i| {
            (0..r).map(move |j| [cx * r + sx * i, cy * r + sy * j])
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn perimeter_sizes() {
        assert_eq!(perimeter(0).collect::<Vec<_>>(), vec![[0, 0]]);
        for r in 1..20 {
            let pts: Vec<_> = perimeter(r).collect();
            let unique: HashSet<_> = pts.iter().copied().collect();
            assert_eq!(pts.len(), 8 * r as usize);
            assert_eq!(unique.len(), pts.len());
            assert!(pts.iter().all(|p| p[0].abs() == r || p[1].abs() == r));
        }
    }

    #[test]
    fn quadrant_scan() {
        let nw: Vec<_> = QUADRANTS[0].scan(2).collect();
        assert_eq!(nw, vec![[-2, -2], [-2, -1], [-1, -2], [-1, -1]]);

        let se: Vec<_> = QUADRANTS[3].scan(2).collect();
        assert_eq!(se, vec![[2, 2], [2, 1], [1, 2], [1, 1]]);

        // Center row and column are never scanned.
        for q in QUADRANTS {
            assert!(q.scan(5).all(|[x, y]| x != 0 && y != 0));
            assert_eq!(q.scan(5).count(), 25);
        }
    }
}
