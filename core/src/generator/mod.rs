use crate::*;
pub use random::*;

mod random;

/// Builds the initial tile layout for a matching board.
pub trait BoardGenerator {
    fn generate(self, config: &BoardConfig) -> Result<TileBoard>;
}
