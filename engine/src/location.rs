use std::{fmt, ops::Add};

use glam::{ivec2, IVec2, IVec3};
use serde::{Deserialize, Serialize};

/// Position in the dungeon, `z` is the level index.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Debug,
    Serialize,
    Deserialize,
)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Location { x, y, z }
    }

    /// Position on the level.
    pub fn pos(&self) -> IVec2 {
        ivec2(self.x, self.y)
    }

    /// Level index, `None` for negative levels.
    pub fn level(&self) -> Option<usize> {
        usize::try_from(self.z).ok()
    }

    /// Same level, different position.
    pub fn with_pos(&self, pos: IVec2) -> Self {
        Location::new(pos.x, pos.y, self.z)
    }

    pub fn same_level(&self, other: &Location) -> bool {
        self.z == other.z
    }

    /// Cardinal neighbors in clock face order.
    pub fn neighbors_4(&self) -> impl Iterator<Item = Location> + '_ {
        util::DIR_4.iter().map(move |&d| *self + d)
    }

    /// All 8 neighbors in clock face order.
    pub fn neighbors_8(&self) -> impl Iterator<Item = Location> + '_ {
        util::DIR_8.iter().map(move |&d| *self + d)
    }
}

impl Add<IVec2> for Location {
    type Output = Location;

    fn add(self, rhs: IVec2) -> Self::Output {
        Location::new(self.x + rhs.x, self.y + rhs.y, self.z)
    }
}

impl From<IVec3> for Location {
    fn from(v: IVec3) -> Self {
        Location::new(v.x, v.y, v.z)
    }
}

impl From<Location> for IVec3 {
    fn from(loc: Location) -> Self {
        IVec3::new(loc.x, loc.y, loc.z)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
