use serde::{Deserialize, Serialize};

/// Which way a door is set in its wall.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Walls above and below the door.
    Vertical,
    /// Walls left and right of the door.
    Horizontal,
    /// No clear pair of walls around the door.
    #[default]
    Freestanding,
}

impl Orientation {
    /// Derive orientation from whether there are walls in the north, east,
    /// south and west neighbors.
    pub fn from_walls([n, e, s, w]: [bool; 4]) -> Self {
        if n && s {
            Orientation::Vertical
        } else if e && w {
            Orientation::Horizontal
        } else {
            Orientation::Freestanding
        }
    }
}

/// Structure in a single level map cell.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Tile {
    #[default]
    Floor,
    Wall,
    Door {
        closed: bool,
        locked: bool,
        orientation: Orientation,
    },
    Glass,
    StairUp,
    StairDown,
    Oil {
        burning: bool,
    },
    Terminal,
}

use Tile::*;

impl Tile {
    /// A new door, closed and locked.
    pub fn door(orientation: Orientation) -> Self {
        Door {
            closed: true,
            locked: true,
            orientation,
        }
    }

    pub fn blocks_sight(self) -> bool {
        matches!(self, Wall | Door { closed: true, .. })
    }

    pub fn blocks_movement(self) -> bool {
        matches!(self, Wall | Glass | Terminal | Door { closed: true, .. })
    }

    pub fn blocks_shooting(self) -> bool {
        self.blocks_movement()
    }

    pub fn is_walkable(self) -> bool {
        !self.blocks_movement()
    }

    pub fn is_wall(self) -> bool {
        self == Wall
    }

    pub fn is_open_door(self) -> bool {
        matches!(self, Door { closed: false, .. })
    }

    pub fn is_oil(self) -> bool {
        matches!(self, Oil { .. })
    }

    pub fn is_burning(self) -> bool {
        matches!(self, Oil { burning: true })
    }

    /// Structure for a map legend character.
    ///
    /// Doors come out freestanding and need their orientation fixed from
    /// the surrounding map.
    pub fn from_glyph(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Floor),
            '#' => Some(Wall),
            'd' => Some(Tile::door(Orientation::Freestanding)),
            'g' => Some(Glass),
            '<' => Some(StairUp),
            '>' => Some(StairDown),
            ':' => Some(Oil { burning: false }),
            't' => Some(Terminal),
            _ => None,
        }
    }

    /// Display character for the tile.
    pub fn glyph(self) -> char {
        match self {
            Floor => '.',
            Wall => '#',
            Door { closed: true, .. } => '+',
            Door {
                orientation: Orientation::Vertical,
                ..
            } => '-',
            Door {
                orientation: Orientation::Horizontal,
                ..
            } => '|',
            Door { .. } => '\'',
            Glass => '"',
            StairUp => '<',
            StairDown => '>',
            Oil { burning: true } => '^',
            Oil { .. } => ':',
            Terminal => 't',
        }
    }

    pub(crate) fn opacity(self) -> fov::Opacity {
        match self {
            Floor => fov::Opacity::Floor,
            Wall => fov::Opacity::Wall,
            t if t.blocks_sight() => fov::Opacity::Opaque,
            _ => fov::Opacity::Clear,
        }
    }
}
