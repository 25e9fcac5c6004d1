use alloc::string::{String, ToString};
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size board owning every [`Cell`] of one game.
///
/// Serialized as a mine mask plus visibilities. Mine counts, positions, and the mine total are derived again
/// on deserialization, so a stored grid can't contradict its own layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "GridSnapshot", try_from = "GridSnapshot")]
pub struct Grid {
    cells: Array2<Cell>,
    mine_total: CellCount,
}

#[derive(Serialize, Deserialize)]
struct GridSnapshot {
    mines: Array2<bool>,
    visibility: Array2<Visibility>,
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        Self {
            mines: grid.cells.map(Cell::is_mine),
            visibility: grid.cells.map(Cell::visibility),
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GameError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self> {
        if snapshot.mines.dim() != snapshot.visibility.dim() {
            return Err(GameError::ShapeMismatch);
        }

        let mut grid = Self::from_mine_mask(snapshot.mines)?;
        grid.cells.zip_mut_with(&snapshot.visibility, |cell, &visibility| {
            cell.set_visibility(visibility)
        });
        Ok(grid)
    }
}

impl Grid {
    /// Builds a grid from a mask of mine positions, deriving every cell's mine count.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let (Ok(rows), Ok(cols)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(GameError::InvalidSize);
        };
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }

        let size = (rows, cols);
        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            // in range, checked above
            let coords = (row as Coord, col as Coord);
            let mine_count = NeighborIter::new(coords, size)
                .filter(|&pos| mine_mask[nd_index(pos)])
                .count() as u8;
            Cell::new(coords, mine_mask[nd_index(coords)], mine_count)
        });
        let mine_total = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        Ok(Self { cells, mine_total })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(nd_index(size));

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[nd_index(coords)] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    /// Dimensions as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // both fit in Coord, checked at construction
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        area((rows, cols))
    }

    pub fn mine_total(&self) -> CellCount {
        self.mine_total
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[nd_index(coords)])
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&mut self.cells[nd_index(coords)])
    }

    /// Neighbour coordinates of an in-bounds position, see [`NeighborIter`].
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn adjacent_cells(&self, coords: Coord2) -> Result<impl Iterator<Item = &Cell>> {
        let coords = self.validate_coords(coords)?;
        Ok(self
            .neighbors(coords)
            .map(move |pos| &self.cells[nd_index(pos)]))
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn count_visibility(&self, visibility: Visibility) -> CellCount {
        self.iter()
            .filter(|cell| cell.visibility() == visibility)
            .count() as CellCount
    }

    /// Fixed-format text snapshot, one line per row.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.glyph())?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
