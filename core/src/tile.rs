use serde::{Deserialize, Serialize};

/// 1-based palette index naming the image a tile shows. Two cells match when
/// they hold equal ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u8);

impl TileId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Id dealt to the `pair_index`-th pair (0-based), wrapping around when
    /// more pairs are needed than the palette holds.
    pub const fn for_pair(pair_index: u16, palette: u8) -> Self {
        Self((pair_index % palette as u16) as u8 + 1)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}
