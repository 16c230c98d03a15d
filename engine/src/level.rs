use glam::{ivec2, IVec2};

use crate::Tile;

/// A single map cell with its visibility state.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Cell {
    pub tile: Tile,
    /// Cell has been seen at some point. Never gets unset.
    pub explored: bool,
    /// Cell is visible right now.
    pub in_fov: bool,
    /// Light level, only meaningful while the cell is in view.
    pub shade: u8,
}

impl From<Tile> for Cell {
    fn from(tile: Tile) -> Self {
        Cell {
            tile,
            ..Default::default()
        }
    }
}

/// Rectangular grid of cells for one dungeon level.
#[derive(Clone, Default, Debug)]
pub struct Level {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Level {
    /// Create a level filled with the given tile.
    pub fn new(width: i32, height: i32, tile: Tile) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Level {
            width,
            height,
            cells: vec![Cell::from(tile); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: impl Into<IVec2>) -> bool {
        let pos = pos.into();
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    fn idx(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.x + pos.y * self.width) as usize)
    }

    pub fn get(&self, pos: impl Into<IVec2>) -> Option<&Cell> {
        self.idx(pos.into()).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: impl Into<IVec2>) -> Option<&mut Cell> {
        self.idx(pos.into()).map(|i| &mut self.cells[i])
    }

    pub fn tile(&self, pos: impl Into<IVec2>) -> Option<Tile> {
        self.get(pos).map(|c| c.tile)
    }

    /// Replace the tile at position, other cell state stays as it was.
    pub fn set_tile(&mut self, pos: impl Into<IVec2>, tile: Tile) {
        if let Some(c) = self.get_mut(pos) {
            c.tile = tile;
        }
    }

    /// Iterate cells with their positions in row order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &Cell)> + '_ {
        let w = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (ivec2(i as i32 % w, i as i32 / w), c))
    }

    /// Positions of all matching tiles in row order.
    pub fn find(&self, pred: impl Fn(Tile) -> bool) -> Vec<IVec2> {
        self.iter()
            .filter_map(|(p, c)| pred(c.tile).then_some(p))
            .collect()
    }

    /// Drop every cell out of view.
    pub fn clear_fov(&mut self) {
        for c in self.cells.iter_mut() {
            c.in_fov = false;
        }
    }
}

impl fov::Terrain for Level {
    fn opacity(&self, pos: [i32; 2]) -> Option<fov::Opacity> {
        self.tile(pos).map(|t| t.opacity())
    }
}
