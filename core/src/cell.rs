use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a cell, the only part of a [`Cell`] that changes during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Closed,
    Opened,
    Flagged,
}

/// One square of a [`Grid`]. Only built by the grid, so the mine count always matches the layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    is_mine: bool,
    mine_count: u8,
    visibility: Visibility,
}

impl Cell {
    pub(crate) const fn new((row, col): Coord2, is_mine: bool, mine_count: u8) -> Self {
        Self {
            row,
            col,
            is_mine,
            mine_count,
            visibility: Visibility::Closed,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Number of mines among the 8 neighbours.
    pub const fn mine_count(&self) -> u8 {
        self.mine_count
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub const fn is_closed(&self) -> bool {
        matches!(self.visibility, Visibility::Closed)
    }

    pub const fn is_opened(&self) -> bool {
        matches!(self.visibility, Visibility::Opened)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.visibility, Visibility::Flagged)
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    /// Single-character glyph used by the grid text representation.
    pub const fn glyph(&self) -> char {
        match self.visibility {
            Visibility::Flagged => 'F',
            Visibility::Closed => '#',
            Visibility::Opened if self.is_mine => '*',
            Visibility::Opened => match char::from_digit(self.mine_count as u32, 10) {
                Some(digit) => digit,
                None => '?',
            },
        }
    }
}

/// Formats as `(row, col)`, the way cells are named in status messages.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn new_cell_starts_closed() {
        let cell = Cell::new((2, 3), false, 4);

        assert_eq!(cell.coords(), (2, 3));
        assert_eq!(cell.visibility(), Visibility::Closed);
        assert!(cell.is_closed());
        assert!(!cell.is_opened());
        assert!(!cell.is_flagged());
    }

    #[test]
    fn glyph_depends_on_visibility() {
        let mut cell = Cell::new((0, 0), false, 3);
        assert_eq!(cell.glyph(), '#');

        cell.set_visibility(Visibility::Flagged);
        assert_eq!(cell.glyph(), 'F');

        cell.set_visibility(Visibility::Opened);
        assert_eq!(cell.glyph(), '3');

        let mut mine = Cell::new((0, 1), true, 0);
        mine.set_visibility(Visibility::Opened);
        assert_eq!(mine.glyph(), '*');
    }

    #[test]
    fn glyph_covers_every_count() {
        let mut full = Cell::new((1, 1), false, 8);
        full.set_visibility(Visibility::Opened);
        assert_eq!(full.glyph(), '8');

        let mut corrupt = Cell::new((1, 1), false, 250);
        corrupt.set_visibility(Visibility::Opened);
        assert_eq!(corrupt.glyph(), '?');
    }

    #[test]
    fn display_names_the_position() {
        assert_eq!(Cell::new((4, 7), false, 0).to_string(), "(4, 7)");
    }
}
