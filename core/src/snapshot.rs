use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of a matching game for renderers. Renderers consume
/// snapshots and never reach back into the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    /// Row-major cell contents.
    pub cells: Vec<Option<TileId>>,
    pub selected: Option<Coord2>,
    /// Pair currently waiting out the removal delay.
    pub resolving: Option<(Coord2, Coord2)>,
    pub state: MatchState,
    pub elapsed_ticks: u32,
}

impl MatchGame {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.board().size(),
            cells: self.board().iter_cells().map(|(_, cell)| cell).collect(),
            selected: self.selected(),
            resolving: self
                .pending_match()
                .map(|ticket| (ticket.first, ticket.second)),
            state: self.state(),
            elapsed_ticks: self.elapsed_ticks(),
        }
    }
}

/// Read-only view of a snake game for renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeSnapshot {
    pub size: Coord2,
    /// Segment coordinates, tail first.
    pub body: Vec<Coord2>,
    pub food: Option<Coord2>,
    pub state: SnakeState,
    pub score: u32,
    pub length: CellCount,
}

impl SnakeGame {
    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            size: self.size(),
            body: self.body().collect(),
            food: self.food(),
            state: self.state(),
            score: self.score(),
            length: self.length(),
        }
    }
}
