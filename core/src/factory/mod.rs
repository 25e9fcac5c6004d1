use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Source of fully populated grids, one per game, with every cell closed.
pub trait GridFactory {
    fn grid(&mut self) -> Grid;
}

impl<F> GridFactory for F
where
    F: FnMut() -> Grid,
{
    fn grid(&mut self) -> Grid {
        self()
    }
}

/// Hands out the same layout on every call, mostly useful for tests and replays.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedGridFactory {
    template: Grid,
}

impl FixedGridFactory {
    pub fn new(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        Ok(Self {
            template: Grid::from_mine_coords(size, mine_coords)?,
        })
    }

    /// Layout drawn as text, one row per line, `*` for a mine and any other non-space character for a safe
    /// cell.
    pub fn from_layout(layout: &str) -> Result<Self> {
        let rows: Vec<Vec<bool>> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).map(|c| c == '*').collect())
            .collect();

        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(GameError::InvalidSize);
        }

        let flat: Vec<bool> = rows.into_iter().flatten().collect();
        let rows = if cols == 0 { 0 } else { flat.len() / cols };
        let mask = ndarray::Array2::from_shape_vec((rows, cols), flat)
            .map_err(|_| GameError::InvalidSize)?;

        Ok(Self {
            template: Grid::from_mine_mask(mask)?,
        })
    }
}

impl GridFactory for FixedGridFactory {
    fn grid(&mut self) -> Grid {
        self.template.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_factory_returns_fresh_copies() {
        let mut factory = FixedGridFactory::new((2, 2), &[(1, 1)]).unwrap();

        let first = factory.grid();
        let second = factory.grid();

        assert_eq!(first, second);
        assert!(second.cell((1, 1)).unwrap().is_mine());
        assert_eq!(second.count_visibility(Visibility::Closed), 4);
    }

    #[test]
    fn fixed_factory_rejects_out_of_bounds_mines() {
        assert_eq!(
            FixedGridFactory::new((2, 2), &[(0, 2)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn layout_text_places_mines() {
        let mut factory = FixedGridFactory::from_layout(
            "
            . . *
            . . .
            * . .
            ",
        )
        .unwrap();

        let grid = factory.grid();

        assert_eq!(grid.size(), (3, 3));
        assert_eq!(grid.mine_total(), 2);
        assert!(grid.cell((0, 2)).unwrap().is_mine());
        assert!(grid.cell((2, 0)).unwrap().is_mine());
        assert_eq!(grid.cell((1, 1)).unwrap().mine_count(), 2);
    }

    #[test]
    fn layout_text_requires_rectangular_rows() {
        assert_eq!(
            FixedGridFactory::from_layout("..\n...\n"),
            Err(GameError::InvalidSize)
        );
        assert_eq!(FixedGridFactory::from_layout(""), Err(GameError::InvalidSize));
    }

    #[test]
    fn closures_are_factories() {
        let mut calls = 0;
        let mut factory = || {
            calls += 1;
            Grid::from_mine_coords((1, 2), &[]).unwrap()
        };

        let grid = GridFactory::grid(&mut factory);

        assert_eq!(grid.size(), (1, 2));
        assert_eq!(calls, 1);
    }
}
