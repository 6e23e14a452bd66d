use serde::{Deserialize, Serialize};

use crate::*;

/// Which rule decides whether two selected tiles may pair up.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchRule {
    /// Two cells pair whenever they show the same tile, regardless of layout.
    /// This is the rule the original game shipped with.
    TileOnly,
    /// Same tile plus a clear path of at most two corners between the cells.
    PathConnected,
}

impl Default for MatchRule {
    fn default() -> Self {
        Self::TileOnly
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchState {
    Ready,
    Active,
    Solved,
}

impl MatchState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Solved)
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Claim on a successfully paired couple of cells, waiting out the
/// observation delay before the tiles are removed. Restarting the game
/// invalidates any ticket still in flight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTicket {
    epoch: u32,
    pub first: Coord2,
    pub second: Coord2,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoChange,
    Selected,
    Deselected,
    /// The pair did not match; the selection moved to the new cell.
    Mismatched,
    Matched(MatchTicket),
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            NoChange => false,
            Selected => true,
            Deselected => true,
            Mismatched => true,
            Matched(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Ticket belongs to an earlier board; nothing was mutated.
    Stale,
    Cleared,
    Solved,
}

/// The tile-matching game from deal to cleared board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchGame {
    board: TileBoard,
    rule: MatchRule,
    selected: Option<Coord2>,
    pending: Option<MatchTicket>,
    state: MatchState,
    epoch: u32,
    elapsed_ticks: u32,
}

impl MatchGame {
    pub fn new(
        generator: impl BoardGenerator,
        config: &BoardConfig,
        rule: MatchRule,
    ) -> Result<Self> {
        Ok(Self::from_board(generator.generate(config)?, rule))
    }

    /// Starts a game over a prepared layout, e.g. a saved or scripted deal.
    pub fn from_board(board: TileBoard, rule: MatchRule) -> Self {
        let state = if board.is_cleared() {
            log::debug!("board has no tiles to pair, born solved");
            MatchState::Solved
        } else {
            MatchState::Ready
        };
        Self {
            board,
            rule,
            selected: None,
            pending: None,
            state,
            epoch: 0,
            elapsed_ticks: 0,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn rule(&self) -> MatchRule {
        self.rule
    }

    pub fn board(&self) -> &TileBoard {
        &self.board
    }

    pub fn selected(&self) -> Option<Coord2> {
        self.selected
    }

    pub fn pending_match(&self) -> Option<MatchTicket> {
        self.pending
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    /// Whether `a` and `b` would pair under the current rule.
    pub fn can_pair(&self, a: Coord2, b: Coord2) -> bool {
        if a == b {
            return false;
        }
        let (Some(tile_a), Some(tile_b)) = (self.board.tile_at(a), self.board.tile_at(b)) else {
            return false;
        };
        if tile_a != tile_b {
            return false;
        }
        match self.rule {
            MatchRule::TileOnly => true,
            MatchRule::PathConnected => self.board.has_clear_path(a, b),
        }
    }

    pub fn select(&mut self, coords: Coord2) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        // clicks are ignored while a matched pair waits out its removal delay
        if self.pending.is_some() {
            return Ok(NoChange);
        }
        if self.board.tile_at(coords).is_none() {
            return Ok(NoChange);
        }

        self.mark_started();

        Ok(match self.selected {
            None => {
                self.selected = Some(coords);
                Selected
            }
            Some(previous) if previous == coords => {
                self.selected = None;
                Deselected
            }
            Some(previous) => {
                if self.can_pair(previous, coords) {
                    let ticket = MatchTicket {
                        epoch: self.epoch,
                        first: previous,
                        second: coords,
                    };
                    self.selected = None;
                    self.pending = Some(ticket);
                    Matched(ticket)
                } else {
                    self.selected = Some(coords);
                    Mismatched
                }
            }
        })
    }

    /// Commits a delayed match. A ticket issued before a restart, or one that
    /// does not belong to the waiting pair, is dropped without any mutation.
    pub fn resolve(&mut self, ticket: MatchTicket) -> ResolveOutcome {
        if self.pending != Some(ticket) {
            log::debug!(
                "dropping stale match ticket for {:?}/{:?}",
                ticket.first,
                ticket.second
            );
            return ResolveOutcome::Stale;
        }

        self.pending = None;
        self.board.clear_pair(ticket.first, ticket.second);

        if self.board.is_cleared() {
            log::debug!("board cleared after {} ticks", self.elapsed_ticks);
            self.state = MatchState::Solved;
            ResolveOutcome::Solved
        } else {
            ResolveOutcome::Cleared
        }
    }

    /// One beat of the external periodic timer. The clock freezes once solved.
    pub fn tick(&mut self) {
        if !self.state.is_finished() {
            self.elapsed_ticks += 1;
        }
    }

    /// Rebuilds the board wholesale and invalidates any ticket still in
    /// flight from before the restart.
    pub fn restart(&mut self, generator: impl BoardGenerator, config: &BoardConfig) -> Result<()> {
        self.board = generator.generate(config)?;
        self.selected = None;
        self.pending = None;
        self.state = if self.board.is_cleared() {
            MatchState::Solved
        } else {
            MatchState::Ready
        };
        self.epoch += 1;
        self.elapsed_ticks = 0;
        Ok(())
    }

    fn mark_started(&mut self) {
        if matches!(self.state, MatchState::Ready) {
            self.state = MatchState::Active;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
