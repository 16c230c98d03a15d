use glam::{ivec2, IVec2};

/// Character grid parsed from a multi-line text block.
///
/// Lines with at most one character are dropped, so a text constant can
/// start with a newline for nicer alignment in source code. Rows are not
/// required to be the same length.
#[derive(Clone, Default, Debug, Eq, PartialEq)]
pub struct AsciiMap {
    rows: Vec<Vec<char>>,
}

impl AsciiMap {
    pub fn new(text: &str) -> Self {
        let rows = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| line.chars().count() > 1)
            .map(|line| line.chars().collect())
            .collect();
        AsciiMap { rows }
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Length of the longest row.
    pub fn width(&self) -> i32 {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Character at position, `None` when outside the map.
    pub fn get(&self, pos: impl Into<IVec2>) -> Option<char> {
        let pos = pos.into();
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.rows
            .get(pos.y as usize)
            .and_then(|r| r.get(pos.x as usize))
            .copied()
    }

    /// Iterate the rows of the map with their y coordinates.
    pub fn rows(&self) -> impl Iterator<Item = (i32, &[char])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(y, r)| (y as i32, r.as_slice()))
    }

    /// Iterate every character on the map with its position.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        self.rows().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &c)| (ivec2(x as i32, y), c))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_blank_line() {
        let map = AsciiMap::new(
            "
####
#@.#
####",
        );
        assert_eq!(map.height(), 3);
        assert_eq!(map.width(), 4);
        assert_eq!(map.get([1, 1]), Some('@'));
        assert_eq!(map.get([4, 1]), None);
        assert_eq!(map.get([-1, 0]), None);
        assert_eq!(map.iter().count(), 12);
    }

    #[test]
    fn ragged_rows() {
        let map = AsciiMap::new("###\n#.\n#####");
        assert_eq!(map.width(), 5);
        assert_eq!(map.get([2, 1]), None);
        assert_eq!(map.get([4, 2]), Some('#'));
    }
}
