use std::collections::HashMap;

use crate::{line, perimeter, QUADRANTS};

/// How much darker than `MAX_GREY` the cells right next to the torch are.
const MIN_GREY: f32 = 32.0;

/// Brightest shade value.
const MAX_GREY: f32 = 255.0;

/// How a map cell interacts with light.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Opacity {
    /// Open floor. Lit floor cells can reveal their dark neighbors during
    /// artifact repair.
    Floor,
    /// Transparent cell that is not plain floor.
    Clear,
    /// A wall. Stops light and is never revealed by artifact repair.
    Wall,
    /// Anything else that stops light, like a closed door.
    Opaque,
}

impl Opacity {
    pub fn blocks_sight(self) -> bool {
        matches!(self, Opacity::Wall | Opacity::Opaque)
    }
}

/// Map interface for field of view computation.
pub trait Terrain {
    /// Return the opacity of the cell at `pos` or `None` if the position is
    /// outside the map.
    fn opacity(&self, pos: [i32; 2]) -> Option<Opacity>;
}

/// Cells lit by a torch at some origin point, with their shade values.
#[derive(Clone, Default, Debug)]
pub struct Fov {
    origin: [i32; 2],
    lit: HashMap<[i32; 2], u8>,
}

impl Fov {
    /// Cast rays from `origin` to every point on the perimeter of the torch
    /// square and then patch up the dark cells left behind lit floor.
    pub fn new(terrain: &impl Terrain, origin: [i32; 2], radius: i32) -> Self {
        let mut ret = Fov {
            origin,
            lit: Default::default(),
        };
        ret.lit.insert(origin, MAX_GREY as u8);

        let [ox, oy] = origin;
        for [ex, ey] in perimeter(radius) {
            ret.cast(terrain, line(origin, [ox + ex, oy + ey]), radius);
        }

        ret.repair(terrain, radius);
        ret
    }

    fn cast(
        &mut self,
        terrain: &impl Terrain,
        ray: Vec<[i32; 2]>,
        radius: i32,
    ) {
        for p in ray {
            if p == self.origin {
                continue;
            }

            let Some(opacity) = terrain.opacity(p) else {
                continue;
            };

            let dist = self.distance(p);
            if dist > radius as f32 {
                continue;
            }

            self.lit.insert(p, shade(dist, radius));

            if opacity.blocks_sight() {
                break;
            }
        }
    }

    fn repair(&mut self, terrain: &impl Terrain, radius: i32) {
        let [ox, oy] = self.origin;
        for q in QUADRANTS {
            for [dx, dy] in q.scan(radius) {
                let p = [ox + dx, oy + dy];
                if self.contains(p) {
                    continue;
                }

                let Some(opacity) = terrain.opacity(p) else {
                    continue;
                };

                // Walls and anything else opaque stay dark.
                if opacity.blocks_sight() {
                    continue;
                }

                let lit_floor_next_to = q.neighbors.iter().any(|[nx, ny]| {
                    let n = [p[0] + nx, p[1] + ny];
                    terrain.opacity(n) == Some(Opacity::Floor)
                        && self.contains(n)
                });

                if lit_floor_next_to {
                    let dist = self.distance(p).min(radius as f32);
                    self.lit.insert(p, shade(dist, radius));
                }
            }
        }
    }

    fn distance(&self, [x, y]: [i32; 2]) -> f32 {
        let dx = (x - self.origin[0]) as f32;
        let dy = (y - self.origin[1]) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn contains(&self, pos: [i32; 2]) -> bool {
        self.lit.contains_key(&pos)
    }

    /// Light level at a lit cell.
    pub fn shade(&self, pos: [i32; 2]) -> Option<u8> {
        self.lit.get(&pos).copied()
    }

    pub fn len(&self) -> usize {
        self.lit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lit.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ([i32; 2], u8)> + '_ {
        self.lit.iter().map(|(&p, &s)| (p, s))
    }
}

/// Linear falloff from `MAX_GREY - MIN_GREY` next to the torch down to zero
/// at the edge of the radius.
fn shade(dist: f32, radius: i32) -> u8 {
    if radius <= 0 {
        return MAX_GREY as u8;
    }
    let d = dist.min(radius as f32) / radius as f32;
    (MAX_GREY - (MIN_GREY + d * (MAX_GREY - MIN_GREY)) as i32 as f32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test map, `#` is wall, `+` is a closed door, `o` is clear non-floor
    /// terrain and anything else is floor.
    struct Map(Vec<Vec<char>>);

    impl Map {
        fn new(s: &str) -> Self {
            Map(s.lines().map(|l| l.trim().chars().collect()).collect())
        }
    }

    impl Terrain for Map {
        fn opacity(&self, [x, y]: [i32; 2]) -> Option<Opacity> {
            if x < 0 || y < 0 {
                return None;
            }
            let c = *self.0.get(y as usize)?.get(x as usize)?;
            Some(match c {
                '#' => Opacity::Wall,
                '+' => Opacity::Opaque,
                'o' => Opacity::Clear,
                _ => Opacity::Floor,
            })
        }
    }

    #[test]
    fn corridor_occlusion() {
        let map = Map::new("#########\n#..#....#\n#########");
        let fov = Fov::new(&map, [1, 1], 12);
        assert!(fov.contains([1, 1]));
        assert!(fov.contains([2, 1]));
        // Wall itself is lit.
        assert!(fov.contains([3, 1]));
        // Floor behind it is not.
        assert!(!fov.contains([4, 1]));
        assert!(!fov.contains([7, 1]));
    }

    #[test]
    fn door_blocks_like_wall() {
        let map = Map::new("#######\n#..+..#\n#######");
        let fov = Fov::new(&map, [1, 1], 12);
        assert!(fov.contains([3, 1]));
        assert!(!fov.contains([4, 1]));
    }

    #[test]
    fn radius_bound() {
        let row = ".".repeat(41);
        let map = Map::new(&vec![row; 41].join("\n"));
        let radius = 7;

        // Rays never light anything past the radius.
        let mut rays_only = Fov {
            origin: [20, 20],
            lit: Default::default(),
        };
        for [ex, ey] in perimeter(radius) {
            rays_only.cast(&map, line([20, 20], [20 + ex, 20 + ey]), radius);
        }
        for ([x, y], _) in rays_only.iter() {
            let (dx, dy) = ((x - 20) as f32, (y - 20) as f32);
            assert!((dx * dx + dy * dy).sqrt() <= radius as f32);
        }

        // Repair can fill in corners, but stays inside the torch square.
        let fov = Fov::new(&map, [20, 20], radius);
        for ([x, y], _) in fov.iter() {
            assert!((x - 20).abs() <= radius && (y - 20).abs() <= radius);
        }
        assert!(fov.contains([27, 20]));
        assert!(!fov.contains([28, 20]));
    }

    #[test]
    fn map_edge_is_not_an_error() {
        let map = Map::new("...\n...");
        let fov = Fov::new(&map, [0, 0], 12);
        assert_eq!(fov.len(), 6);
    }

    #[test]
    fn shade_falloff() {
        let map = Map::new(&".".repeat(20));
        let fov = Fov::new(&map, [0, 0], 12);
        assert_eq!(fov.shade([0, 0]), Some(255));
        assert!(fov.shade([1, 0]) > fov.shade([6, 0]));
        assert_eq!(fov.shade([12, 0]), Some(0));
        assert_eq!(fov.shade([13, 0]), None);
    }

    #[test]
    fn repair_reveals_cell_behind_lit_floor() {
        // The clear cell at (1, 1) is shadowed by the wall at (2, 2) for a
        // torch at (3, 3), but the floor cell south of it is lit.
        let map = Map::new(
            "\
            ......
            .o....
            ..#...
            ......
            ......
            ......",
        );
        let mut rays_only = Fov {
            origin: [3, 3],
            lit: Default::default(),
        };
        for [ex, ey] in perimeter(3) {
            rays_only.cast(&map, line([3, 3], [3 + ex, 3 + ey]), 3);
        }
        assert!(!rays_only.contains([1, 1]));
        assert!(rays_only.contains([1, 2]));

        let fov = Fov::new(&map, [3, 3], 3);
        assert!(fov.contains([1, 1]));
        assert!(fov.contains([2, 2]));
    }

    /// Run only the repair pass on a walled 7x7 map with a torch in the
    /// middle, a lit floor cell at `floor` and a dark clear cell at
    /// `target`. Return whether the target got revealed.
    fn repairs(target: [i32; 2], floor: [i32; 2]) -> bool {
        let rows: Vec<String> = (0..7)
            .map(|y| {
                (0..7)
                    .map(|x| match [x, y] {
                        [3, 3] => '.',
                        p if p == floor => '.',
                        p if p == target => 'o',
                        _ => '#',
                    })
                    .collect()
            })
            .collect();
        let map = Map::new(&rows.join("\n"));

        let mut fov = Fov {
            origin: [3, 3],
            lit: [([3, 3], 255), (floor, 128)].into_iter().collect(),
        };
        fov.repair(&map, 3);
        fov.contains(target)
    }

    #[test]
    fn repair_table_north_west() {
        assert!(repairs([1, 1], [1, 2]));
        assert!(repairs([1, 1], [2, 1]));
        assert!(repairs([1, 1], [2, 2]));
        assert!(!repairs([1, 1], [1, 0]));
        assert!(!repairs([1, 1], [0, 1]));
    }

    #[test]
    fn repair_table_south_west() {
        assert!(repairs([1, 5], [1, 4]));
        assert!(repairs([1, 5], [2, 5]));
        assert!(repairs([1, 5], [2, 4]));
        assert!(!repairs([1, 5], [1, 6]));
        assert!(!repairs([1, 5], [2, 6]));
    }

    #[test]
    fn repair_table_north_east() {
        // Looks north, away from the torch, and not south towards it.
        assert!(repairs([5, 1], [5, 0]));
        assert!(repairs([5, 1], [4, 1]));
        assert!(repairs([5, 1], [4, 0]));
        assert!(!repairs([5, 1], [5, 2]));
        assert!(!repairs([5, 1], [4, 2]));
    }

    #[test]
    fn repair_table_south_east() {
        // Looks south, away from the torch, and not north towards it.
        assert!(repairs([5, 5], [5, 6]));
        assert!(repairs([5, 5], [4, 5]));
        assert!(repairs([5, 5], [4, 6]));
        assert!(!repairs([5, 5], [5, 4]));
        assert!(!repairs([5, 5], [4, 4]));
    }

    #[test]
    fn repair_never_reveals_walls() {
        let map = Map::new(
            "\
            #....
            .....
            ..#..
            .....
            .....",
        );
        let fov = Fov::new(&map, [3, 3], 3);
        assert!(!fov.contains([0, 0]));
    }
}
