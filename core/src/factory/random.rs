use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Places mines uniformly at random, each call drawing a new layout from the same seeded stream.
#[derive(Clone, Debug)]
pub struct RandomGridFactory {
    config: GameConfig,
    rng: SmallRng,
}

impl RandomGridFactory {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }
}

impl GridFactory for RandomGridFactory {
    fn grid(&mut self) -> Grid {
        let (rows, cols) = self.config.size;
        let (rows, cols) = (rows.max(1), cols.max(1));
        let total_cells = area((rows, cols));

        let mines = if self.config.mines > total_cells {
            log::warn!(
                "Grid already full, requested {} mines but only fits {}",
                self.config.mines,
                total_cells
            );
            total_cells
        } else {
            self.config.mines
        };

        let mut mine_mask: Array2<bool> = Array2::default(nd_index((rows, cols)));
        {
            let cells = mine_mask
                .as_slice_mut()
                .expect("freshly allocated array is contiguous");
            for place in index::sample(&mut self.rng, cells.len(), mines.into()) {
                cells[place] = true;
            }
        }

        log::debug!("Generated {}x{} grid with {} mines", rows, cols, mines);
        match Grid::from_mine_mask(mine_mask) {
            Ok(grid) => grid,
            // both dimensions are clamped to at least 1 above
            Err(err) => unreachable!("invalid generated grid: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        let mut factory = RandomGridFactory::new(GameConfig::new((9, 9), 10), 7);

        for _ in 0..5 {
            let grid = factory.grid();
            assert_eq!(grid.size(), (9, 9));
            assert_eq!(grid.mine_total(), 10);
            assert_eq!(grid.iter().filter(|cell| cell.is_mine()).count(), 10);
            assert_eq!(grid.count_visibility(Visibility::Closed), 81);
        }
    }

    #[test]
    fn same_seed_same_layouts() {
        let config = GameConfig::default();
        let mut a = RandomGridFactory::new(config, 42);
        let mut b = RandomGridFactory::new(config, 42);

        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn overfull_request_fills_the_grid() {
        let config = GameConfig::new_unchecked((2, 2), 9);
        let mut factory = RandomGridFactory::new(config, 1);

        let grid = factory.grid();

        assert_eq!(grid.mine_total(), 4);
        assert!(grid.iter().all(Cell::is_mine));
    }

    #[test]
    fn empty_dimensions_are_widened() {
        let config = GameConfig::new_unchecked((0, 3), 1);
        let mut factory = RandomGridFactory::new(config, 1);

        assert_eq!(factory.grid().size(), (1, 3));
    }
}
