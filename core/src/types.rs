/// Single coordinate axis used for grid rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine totals and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Number of cells in a `(rows, cols)` area.
pub const fn area((rows, cols): Coord2) -> CellCount {
    // 255 * 255 fits in a u16
    rows as CellCount * cols as CellCount
}

/// `ndarray` index of a position.
pub(crate) const fn nd_index((row, col): Coord2) -> [usize; 2] {
    [row as usize, col as usize]
}

/// Walks the 3x3 block around `center`, clipped to the grid, in row-major order and skipping `center`.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    first_col: Coord,
    last: Coord2,
    next: Option<Coord2>,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, (rows, cols): Coord2) -> Self {
        let (row, col) = center;
        let first = (row.saturating_sub(1), col.saturating_sub(1));
        let last = (
            row.saturating_add(1).min(rows.saturating_sub(1)),
            col.saturating_add(1).min(cols.saturating_sub(1)),
        );
        let in_grid = rows > 0 && cols > 0 && first.0 <= last.0 && first.1 <= last.1;

        Self {
            center,
            first_col: first.1,
            last,
            next: in_grid.then_some(first),
        }
    }

    fn step(&self, (row, col): Coord2) -> Option<Coord2> {
        if col < self.last.1 {
            Some((row, col + 1))
        } else if row < self.last.0 {
            Some((row + 1, self.first_col))
        } else {
            None
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next?;
            self.next = self.step(current);
            if current != self.center {
                return Some(current);
            }
        }
    }
}
