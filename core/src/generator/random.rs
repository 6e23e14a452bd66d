use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Generation strategy that deals every palette id to a pair of cells and
/// scatters the pairs with a seeded Fisher-Yates shuffle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShuffleGenerator {
    seed: u64,
}

impl ShuffleGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for ShuffleGenerator {
    fn generate(self, config: &BoardConfig) -> Result<TileBoard> {
        use rand::prelude::*;

        // reject odd usable counts even for hand-built configs
        let config = BoardConfig::new(config.size, config.palette)?;

        let mut values: Vec<TileId> = Vec::with_capacity(config.usable_cells() as usize);
        for pair in 0..config.pair_count() {
            let id = TileId::for_pair(pair, config.palette);
            values.push(id);
            values.push(id);
        }

        // Fisher-Yates with inclusive bounds
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in (1..values.len()).rev() {
            let j = rng.random_range(0..=i);
            values.swap(i, j);
        }

        let (w, h) = config.size;
        let mut cells: Array2<Option<TileId>> = Array2::default(config.size.to_nd_index());
        let mut next = values.into_iter();
        for y in 0..h {
            for x in 0..w {
                if corner_cell(config.size, (x, y)) {
                    continue;
                }
                cells[(x, y).to_nd_index()] = next.next();
            }
        }
        if next.next().is_some() {
            log::warn!("generated more tiles than the board holds");
        }

        Ok(TileBoard::from_cells(cells))
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use super::*;

    fn generate(size: Coord2, palette: u8, seed: u64) -> TileBoard {
        let config = BoardConfig::new(size, palette).unwrap();
        ShuffleGenerator::new(seed).generate(&config).unwrap()
    }

    fn tile_counts(board: &TileBoard) -> BTreeMap<TileId, u32> {
        let mut counts = BTreeMap::new();
        for (_, cell) in board.iter_cells() {
            if let Some(id) = cell {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        counts
    }

    #[test]
    fn corners_stay_empty_and_the_rest_is_filled() {
        for seed in 0..4 {
            let board = generate((4, 6), 8, seed);
            for (coords, cell) in board.iter_cells() {
                if board.is_corner(coords) {
                    assert_eq!(cell, None, "corner {coords:?} must stay empty");
                } else {
                    assert!(cell.is_some(), "usable cell {coords:?} must hold a tile");
                }
            }
        }
    }

    #[test]
    fn every_tile_occurs_an_even_number_of_times() {
        for seed in 0..4 {
            let board = generate((6, 6), 8, seed);
            for (id, count) in tile_counts(&board) {
                assert_eq!(count % 2, 0, "tile {id:?} occurs {count} times");
            }
        }
    }

    #[test]
    fn four_by_four_deals_six_distinct_pairs() {
        let board = generate((4, 4), 8, 7);
        let counts = tile_counts(&board);
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&count| count == 2));
        assert_eq!(board.remaining_tiles(), 12);
    }

    #[test]
    fn palette_indices_wrap_when_pairs_exceed_palette() {
        // 6x6 means 16 pairs over a palette of 8, each id dealt twice over
        let board = generate((6, 6), 8, 3);
        let counts = tile_counts(&board);
        assert_eq!(counts.len(), 8);
        assert!(counts.keys().all(|id| (1..=8).contains(&id.get())));
        assert!(counts.values().all(|&count| count == 4));
    }

    #[test]
    fn same_seed_reproduces_the_same_board() {
        assert_eq!(generate((4, 4), 8, 42), generate((4, 4), 8, 42));
    }

    #[test]
    fn odd_configs_are_rejected() {
        let config = BoardConfig::new_unchecked((3, 3), 8);
        assert_eq!(
            ShuffleGenerator::new(0).generate(&config),
            Err(GameError::OddUsableCells)
        );
    }
}
