#![no_std]

extern crate alloc;

pub use board::*;
pub use error::*;
pub use generator::*;
pub use matching::*;
pub use snake::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod matching;
mod snake;
mod snapshot;
mod tile;
mod types;
