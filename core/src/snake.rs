use alloc::collections::VecDeque;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeConfig {
    pub size: Coord2,
}

impl SnakeConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    pub fn new((size_x, size_y): Coord2) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        Self::new_unchecked((size_x, size_y))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Grid-unit movement direction; `y` grows downwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SnakeState {
    /// Initial state, zero velocity; nothing moves until the first input.
    Ready,
    Active,
    /// The snake covers every cell and food has nowhere left to go.
    Won,
    Lost,
}

impl SnakeState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SnakeState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SteerOutcome {
    Turned,
    /// Rejected: the requested direction lies on the current movement axis.
    Ignored,
}

impl SteerOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Turned => true,
            Self::Ignored => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CrashCause {
    Wall,
    SelfHit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    NoChange,
    Moved,
    Ate,
    Crashed(CrashCause),
    Won,
}

impl StepOutcome {
    pub const fn has_update(self) -> bool {
        use StepOutcome::*;
        match self {
            NoChange => false,
            Moved => true,
            Ate => true,
            Crashed(_) => true,
            Won => true,
        }
    }
}

/// Applies `delta` to `coords`, returning a value only when it stays in bounds.
fn advance(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let next_x = coords.0.checked_add_signed(delta.0)?;
    if next_x >= bounds.0 {
        return None;
    }
    let next_y = coords.1.checked_add_signed(delta.1)?;
    if next_y >= bounds.1 {
        return None;
    }
    Some((next_x, next_y))
}

/// The snake game, advanced one fixed tick at a time by `step`.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    config: SnakeConfig,
    /// Segment coordinates, tail first, head at the back.
    body: VecDeque<Coord2>,
    direction: Option<Direction>,
    pending_turn: Option<Direction>,
    food: Option<Coord2>,
    target_len: CellCount,
    score: u32,
    state: SnakeState,
    rng: SmallRng,
}

impl SnakeGame {
    pub fn new(config: SnakeConfig, seed: u64) -> Self {
        let (w, h) = config.size;
        let mut body = VecDeque::new();
        body.push_back((w / 2, h / 2));

        let mut game = Self {
            config,
            body,
            direction: None,
            pending_turn: None,
            food: None,
            target_len: 1,
            score: 0,
            state: Default::default(),
            rng: SmallRng::seed_from_u64(seed),
        };
        game.relocate_food();
        if game.food.is_none() {
            // a one-cell pit is full from the start
            game.mark_ended(true);
        }
        game
    }

    pub fn state(&self) -> SnakeState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn length(&self) -> CellCount {
        self.target_len
    }

    pub fn food(&self) -> Option<Coord2> {
        self.food
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn head(&self) -> Coord2 {
        *self.body.back().expect("snake body is never empty")
    }

    /// Segment coordinates, tail first.
    pub fn body(&self) -> impl ExactSizeIterator<Item = Coord2> + '_ {
        self.body.iter().copied()
    }

    /// Queues a direction change for the next tick. Turns onto the axis the
    /// snake currently moves along are ignored, which rules out instant
    /// reversals into the own body.
    pub fn steer(&mut self, direction: Direction) -> Result<SteerOutcome> {
        use SteerOutcome::*;

        self.check_not_finished()?;

        if let Some(current) = self.direction {
            if current.is_horizontal() == direction.is_horizontal() {
                return Ok(Ignored);
            }
        }

        self.pending_turn = Some(direction);
        self.mark_started();
        Ok(Turned)
    }

    /// Advances the simulation by one fixed tick.
    pub fn step(&mut self) -> Result<StepOutcome> {
        use StepOutcome::*;

        self.check_not_finished()?;

        if let Some(turn) = self.pending_turn.take() {
            self.direction = Some(turn);
        }
        let Some(direction) = self.direction else {
            return Ok(NoChange);
        };

        let Some(next) = advance(self.head(), direction.delta(), self.config.size) else {
            self.mark_ended(false);
            return Ok(Crashed(CrashCause::Wall));
        };
        if self.body.contains(&next) {
            self.mark_ended(false);
            return Ok(Crashed(CrashCause::SelfHit));
        }

        self.body.push_back(next);

        let ate = self.food == Some(next);
        if ate {
            self.target_len += 1;
            self.score += 1;
            self.relocate_food();
            if self.food.is_none() {
                self.mark_ended(true);
                return Ok(Won);
            }
        }

        while self.body.len() as CellCount > self.target_len {
            self.body.pop_front();
        }

        Ok(if ate { Ate } else { Moved })
    }

    /// Picks a uniformly random free cell for the food, or leaves the board
    /// without one when the snake covers every cell.
    fn relocate_food(&mut self) {
        let free = self.config.total_cells() - self.body.len() as CellCount;
        if free == 0 {
            log::debug!("no free cell left for food");
            self.food = None;
            return;
        }

        let mut place = self.rng.random_range(0..free);
        let (w, h) = self.config.size;
        for y in 0..h {
            for x in 0..w {
                if self.body.contains(&(x, y)) {
                    continue;
                }
                if place == 0 {
                    self.food = Some((x, y));
                    return;
                }
                place -= 1;
            }
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.state, SnakeState::Ready) {
            log::debug!("first input accepted, the snake is off");
            self.state = SnakeState::Active;
        }
    }

    fn mark_ended(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }
        self.state = if won { SnakeState::Won } else { SnakeState::Lost };
        log::debug!("snake game over, won: {won}, score: {}", self.score);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    #[cfg(test)]
    pub(crate) fn force_food(&mut self, coords: Coord2) {
        self.food = Some(coords);
    }
}
