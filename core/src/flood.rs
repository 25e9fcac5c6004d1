use alloc::collections::VecDeque;

use crate::*;

/// Worklist discipline used by [`flood_open`].
///
/// The set of cells opened is the same for every order, only the sequence differs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FloodOrder {
    /// Expand the oldest source first (queue).
    #[default]
    BreadthFirst,
    /// Expand the newest source first (stack).
    DepthFirst,
}

/// Opens the connected zero-count region around `origin` plus its numbered border.
///
/// `origin` itself is expected to be opened already. A mine or a numbered origin opens nothing. Only `Closed`
/// cells are opened, so flags are left as they are. A cell is opened as it is queued, which keeps it from
/// being queued twice. Returns the number of cells opened.
pub fn flood_open(grid: &mut Grid, origin: Coord2, order: FloodOrder) -> Result<CellCount> {
    let start = grid.cell(origin)?;
    if start.is_mine() || start.mine_count() > 0 {
        return Ok(0);
    }

    let mut opened: CellCount = 0;
    let mut to_visit = VecDeque::from([origin]);

    loop {
        let next = match order {
            FloodOrder::BreadthFirst => to_visit.pop_front(),
            FloodOrder::DepthFirst => to_visit.pop_back(),
        };
        let Some(source) = next else {
            break;
        };

        for pos in grid.neighbors(source) {
            let cell = grid.cell_mut(pos)?;
            if !cell.is_closed() {
                continue;
            }

            cell.set_visibility(Visibility::Opened);
            opened += 1;
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                pos,
                cell.mine_count()
            );

            if cell.mine_count() == 0 {
                to_visit.push_back(pos);
            }
        }
    }

    Ok(opened)
}
