use glam::IVec2;

use crate::{Level, Tile};

/// What a line of effect is checked for.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LineMode {
    Sight,
    Shoot,
    Move,
}

impl LineMode {
    fn blocked_by(self, tile: Tile) -> bool {
        match self {
            LineMode::Sight => tile.blocks_sight(),
            LineMode::Shoot => tile.blocks_shooting(),
            LineMode::Move => tile.blocks_movement(),
        }
    }
}

/// Result of checking a line for every mode at once.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Clearance {
    pub sight: bool,
    pub shoot: bool,
    pub movement: bool,
}

impl Default for Clearance {
    fn default() -> Self {
        Clearance {
            sight: true,
            shoot: true,
            movement: true,
        }
    }
}

impl Level {
    fn line_tiles(
        &self,
        a: IVec2,
        b: IVec2,
    ) -> impl Iterator<Item = Tile> + '_ {
        fov::line(a.into(), b.into())
            .into_iter()
            .filter_map(|p| self.tile(p))
    }

    /// Whether nothing on the line from `a` to `b` blocks `mode`.
    ///
    /// Both endpoints are checked. Points outside the level don't block.
    pub fn line_is_clear(&self, a: IVec2, b: IVec2, mode: LineMode) -> bool {
        !self.line_tiles(a, b).any(|t| mode.blocked_by(t))
    }

    /// Check the line for every mode.
    pub fn clearance(&self, a: IVec2, b: IVec2) -> Clearance {
        let mut ret = Clearance::default();
        for t in self.line_tiles(a, b) {
            ret.sight &= !t.blocks_sight();
            ret.shoot &= !t.blocks_shooting();
            ret.movement &= !t.blocks_movement();
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use glam::ivec2;
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn glass_window() {
        let mut level = Level::new(5, 1, Tile::Floor);
        level.set_tile([2, 0], Tile::Glass);
        let (a, b) = (ivec2(0, 0), ivec2(4, 0));

        assert!(level.line_is_clear(a, b, LineMode::Sight));
        assert!(!level.line_is_clear(a, b, LineMode::Shoot));
        assert!(!level.line_is_clear(a, b, LineMode::Move));
        assert_eq!(
            level.clearance(a, b),
            Clearance {
                sight: true,
                shoot: false,
                movement: false
            }
        );
    }

    #[test]
    fn endpoints_count() {
        let mut level = Level::new(3, 1, Tile::Floor);
        level.set_tile([2, 0], Tile::Wall);
        let clear =
            |x| level.line_is_clear(ivec2(0, 0), ivec2(x, 0), LineMode::Sight);
        assert!(!clear(2));
        assert!(clear(1));
    }

    #[test]
    fn off_map_points_are_clear() {
        let level = Level::new(2, 1, Tile::Floor);
        assert!(level.line_is_clear(ivec2(0, 0), ivec2(9, 0), LineMode::Move));
    }

    #[quickcheck]
    fn clearance_is_symmetric(a: (u8, u8), b: (u8, u8)) -> bool {
        let mut level = Level::new(8, 8, Tile::Floor);
        for p in [[2, 2], [3, 5], [5, 1], [6, 6]] {
            level.set_tile(p, Tile::Wall);
        }
        level.set_tile([4, 4], Tile::Glass);

        let a = ivec2(a.0 as i32 % 8, a.1 as i32 % 8);
        let b = ivec2(b.0 as i32 % 8, b.1 as i32 % 8);
        level.clearance(a, b) == level.clearance(b, a)
    }
}
