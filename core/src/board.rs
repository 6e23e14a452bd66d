use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub palette: u8,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2, palette: u8) -> Self {
        Self { size, palette }
    }

    pub fn new(size: Coord2, palette: u8) -> Result<Self> {
        if size.0 < 2 || size.1 < 2 {
            return Err(GameError::BoardTooSmall);
        }
        if palette == 0 {
            return Err(GameError::EmptyPalette);
        }
        let config = Self::new_unchecked(size, palette);
        if config.usable_cells() % 2 != 0 {
            return Err(GameError::OddUsableCells);
        }
        Ok(config)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Cells eligible to hold a tile, excluding the four fixed corners.
    pub const fn usable_cells(&self) -> CellCount {
        self.total_cells() - 4
    }

    pub const fn pair_count(&self) -> CellCount {
        self.usable_cells() / 2
    }
}

/// Whether `coords` is one of the four structurally empty corner cells.
pub(crate) const fn corner_cell(size: Coord2, coords: Coord2) -> bool {
    let (w, h) = size;
    let (x, y) = coords;
    (x == 0 || x == w - 1) && (y == 0 || y == h - 1)
}

/// Fixed-size grid of optional tiles. The four corner cells never hold one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileBoard {
    cells: Array2<Option<TileId>>,
}

impl TileBoard {
    pub(crate) fn from_cells(cells: Array2<Option<TileId>>) -> Self {
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn is_corner(&self, coords: Coord2) -> bool {
        corner_cell(self.size(), coords)
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<TileId> {
        self[coords]
    }

    pub fn remaining_tiles(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_some())
            .count()
            .try_into()
            .unwrap()
    }

    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    pub(crate) fn clear_pair(&mut self, a: Coord2, b: Coord2) {
        self[a] = None;
        self[b] = None;
    }

    /// Row-major iterator over all cells with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Option<TileId>)> + '_ {
        let (w, h) = self.size();
        (0..h).flat_map(move |y| (0..w).map(move |x| ((x, y), self[(x, y)])))
    }

    /// Classical lianliankan connectivity: the two cells join by a straight
    /// line, one corner, or two corners running through empty cells only.
    pub fn has_clear_path(&self, a: Coord2, b: Coord2) -> bool {
        self.straight_clear(a, b) || self.one_corner_clear(a, b) || self.two_corners_clear(a, b)
    }

    /// True when every cell strictly between `a` and `b` on a shared row or
    /// column is empty. The endpoints themselves are not inspected.
    fn straight_clear(&self, a: Coord2, b: Coord2) -> bool {
        if a.1 == b.1 {
            let y = a.1;
            let (lo, hi) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
            ((lo + 1)..hi).all(|x| self[(x, y)].is_none())
        } else if a.0 == b.0 {
            let x = a.0;
            let (lo, hi) = if a.1 < b.1 { (a.1, b.1) } else { (b.1, a.1) };
            ((lo + 1)..hi).all(|y| self[(x, y)].is_none())
        } else {
            false
        }
    }

    fn one_corner_clear(&self, a: Coord2, b: Coord2) -> bool {
        [(a.0, b.1), (b.0, a.1)].into_iter().any(|corner| {
            self[corner].is_none()
                && self.straight_clear(a, corner)
                && self.straight_clear(corner, b)
        })
    }

    fn two_corners_clear(&self, a: Coord2, b: Coord2) -> bool {
        let (w, h) = self.size();

        let via_row = |y: Coord| {
            let c1 = (a.0, y);
            let c2 = (b.0, y);
            self[c1].is_none()
                && self[c2].is_none()
                && self.straight_clear(a, c1)
                && self.straight_clear(c1, c2)
                && self.straight_clear(c2, b)
        };
        if (0..h).filter(|&y| y != a.1 && y != b.1).any(via_row) {
            return true;
        }

        let via_col = |x: Coord| {
            let c1 = (x, a.1);
            let c2 = (x, b.1);
            self[c1].is_none()
                && self[c2].is_none()
                && self.straight_clear(a, c1)
                && self.straight_clear(c1, c2)
                && self.straight_clear(c2, b)
        };
        (0..w).filter(|&x| x != a.0 && x != b.0).any(via_col)
    }
}

impl Index<Coord2> for TileBoard {
    type Output = Option<TileId>;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for TileBoard {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.cells[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a board from visual rows, `0` meaning an empty cell.
    fn board(rows: &[&[u8]]) -> TileBoard {
        let h = rows.len();
        let w = rows[0].len();
        let mut cells: Array2<Option<TileId>> = Array2::default([w, h]);
        for (y, row) in rows.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                if id != 0 {
                    cells[(x, y)] = Some(TileId::new(id));
                }
            }
        }
        TileBoard::from_cells(cells)
    }

    #[test]
    fn config_rejects_undersized_boards() {
        assert_eq!(BoardConfig::new((1, 4), 8), Err(GameError::BoardTooSmall));
        assert_eq!(BoardConfig::new((4, 1), 8), Err(GameError::BoardTooSmall));
    }

    #[test]
    fn config_rejects_odd_usable_cell_counts() {
        // 3x3 leaves 5 usable cells, one tile would have no partner
        assert_eq!(BoardConfig::new((3, 3), 8), Err(GameError::OddUsableCells));
        assert_eq!(BoardConfig::new((5, 5), 8), Err(GameError::OddUsableCells));
    }

    #[test]
    fn config_rejects_empty_palette() {
        assert_eq!(BoardConfig::new((4, 4), 0), Err(GameError::EmptyPalette));
    }

    #[test]
    fn config_counts_pairs() {
        let config = BoardConfig::new((4, 4), 8).unwrap();
        assert_eq!(config.total_cells(), 16);
        assert_eq!(config.usable_cells(), 12);
        assert_eq!(config.pair_count(), 6);
    }

    #[test]
    fn corners_are_structural() {
        let board = board(&[&[0, 1, 0], &[1, 2, 1], &[0, 2, 0]]);
        assert!(board.is_corner((0, 0)));
        assert!(board.is_corner((2, 0)));
        assert!(board.is_corner((0, 2)));
        assert!(board.is_corner((2, 2)));
        assert!(!board.is_corner((1, 1)));
    }

    #[test]
    fn validate_coords_bounds_check() {
        let board = board(&[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]]);
        assert_eq!(board.validate_coords((2, 2)), Ok((2, 2)));
        assert_eq!(board.validate_coords((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.validate_coords((0, 3)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn straight_path_requires_empty_cells_between() {
        let clear = board(&[&[0, 0, 0, 0], &[1, 0, 0, 1], &[0, 0, 0, 0]]);
        assert!(clear.has_clear_path((0, 1), (3, 1)));

        let blocked = board(&[&[0, 0, 0, 0], &[1, 0, 2, 1], &[0, 0, 0, 0]]);
        assert!(!blocked.straight_clear((0, 1), (3, 1)));
    }

    #[test]
    fn one_corner_path_turns_through_an_empty_cell() {
        // (1,0) down to (1,2) then right to (3,2), corner at (1,2)... mirrored
        let layout = board(&[&[0, 1, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 1], &[0, 0, 0, 0]]);
        assert!(layout.has_clear_path((1, 0), (3, 2)));
    }

    #[test]
    fn two_corner_path_detours_around_blockers() {
        // A _ A with a blocker between, open row below for the detour
        let layout = board(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 2, 1, 0],
            &[0, 0, 0, 0, 0],
        ]);
        assert!(!layout.straight_clear((1, 1), (3, 1)));
        assert!(!layout.one_corner_clear((1, 1), (3, 1)));
        assert!(layout.has_clear_path((1, 1), (3, 1)));
    }

    #[test]
    fn walled_in_pair_has_no_path() {
        let layout = board(&[
            &[0, 3, 3, 3, 0],
            &[3, 1, 2, 1, 3],
            &[0, 3, 3, 3, 0],
        ]);
        assert!(!layout.has_clear_path((1, 1), (3, 1)));
    }

    #[test]
    fn clearing_pairs_empties_the_board() {
        let mut layout = board(&[&[0, 1, 0], &[2, 0, 2], &[0, 1, 0]]);
        assert_eq!(layout.remaining_tiles(), 4);
        layout.clear_pair((0, 1), (2, 1));
        layout.clear_pair((1, 0), (1, 2));
        assert_eq!(layout.remaining_tiles(), 0);
        assert!(layout.is_cleared());
    }
}
