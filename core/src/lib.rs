#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use controller::*;
pub use error::*;
pub use factory::*;
pub use flood::*;
pub use grid::*;
pub use types::*;

mod cell;
mod controller;
mod error;
mod factory;
mod flood;
mod grid;
mod types;

/// Shape of the grids produced by [`RandomGridFactory`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, area((rows, cols)));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }
}

/// Classic beginner board.
impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((9, 9), 10)
    }
}
