use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Called with no payload after every operation, meaning "re-render now".
pub type Observer = Box<dyn FnMut()>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
}

impl GameState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// Why a move was refused. A refused move never changes the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    GameOver,
    FlaggedCell,
    AlreadyOpened,
    ClosedTarget,
    FlagCountMismatch,
    OpenedCell,
}

/// Outcome of a player move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Opened,
    Detonated { mine: Coord2 },
    OpenedAround,
    FlagSet,
    FlagRemoved,
    Rejected(Rejection),
}

impl Outcome {
    /// Whether the grid or the game state changed
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Result of the most recently attempted operation, rendered as the status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Welcome,
    NewGame,
    Move { outcome: Outcome, at: Coord2 },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Outcome::*;
        use Rejection::*;

        let (outcome, (row, col)) = match *self {
            Self::Welcome => return f.write_str("Welcome to Minesweeper!"),
            Self::NewGame => return f.write_str("New game started"),
            Self::Move { outcome, at } => (outcome, at),
        };
        let at = CellName(row, col);

        match outcome {
            Opened => write!(f, "The cell {at} has been opened"),
            Detonated { mine: (row, col) } => {
                write!(f, "Game over. Mine opened at {}", CellName(row, col))
            }
            OpenedAround => write!(f, "Opened all fields around the cell {at}"),
            FlagSet => write!(f, "Flag set at {at}"),
            FlagRemoved => write!(f, "Flag removed at {at}"),
            Rejected(GameOver) => f.write_str("Game over"),
            Rejected(FlaggedCell) => {
                write!(f, "The cell {at} can't be opened because it has a flag")
            }
            Rejected(AlreadyOpened) => {
                write!(f, "The cell {at} can't be opened because it is already open")
            }
            Rejected(ClosedTarget) => write!(
                f,
                "Can't open cells around the cell {at} because it is closed"
            ),
            Rejected(FlagCountMismatch) => write!(
                f,
                "Can't open cells around the cell {at} because there is an incorrect number of flags around this cell"
            ),
            Rejected(OpenedCell) => {
                write!(f, "The cell {at} can't have a flag because it is opened")
            }
        }
    }
}

struct CellName(Coord, Coord);

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Session driver: owns the current grid and is the only writer of cell visibility.
///
/// Coordinates are validated before anything else, an out-of-bounds position is the only error and leaves
/// the grid, the status, and the observers untouched. Every other call ends by updating the status and
/// notifying observers, refused moves included.
pub struct GameController<F: GridFactory> {
    factory: F,
    grid: Grid,
    state: GameState,
    status: Status,
    triggered_mine: Option<Coord2>,
    flood_order: FloodOrder,
    observers: Vec<Observer>,
}

impl<F: GridFactory> GameController<F> {
    pub fn new(mut factory: F) -> Self {
        let grid = factory.grid();
        Self {
            factory,
            grid,
            state: Default::default(),
            status: Status::Welcome,
            triggered_mine: None,
            flood_order: Default::default(),
            observers: Vec::new(),
        }
    }

    pub fn with_flood_order(mut self, flood_order: FloodOrder) -> Self {
        self.flood_order = flood_order;
        self
    }

    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_text(&self) -> String {
        self.grid.to_text()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn status_line(&self) -> String {
        self.status.to_string()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn flood_order(&self) -> FloodOrder {
        self.flood_order
    }

    pub fn new_game(&mut self) {
        self.grid = self.factory.grid();
        self.state = GameState::Playing;
        self.triggered_mine = None;
        log::debug!(
            "New game on a {:?} grid with {} mines",
            self.grid.size(),
            self.grid.mine_total()
        );
        self.finish(Status::NewGame);
    }

    pub fn open_cell(&mut self, coords: Coord2) -> Result<Outcome> {
        use Visibility::*;

        let coords = self.grid.validate_coords(coords)?;
        let outcome = if self.state.is_over() {
            Outcome::Rejected(Rejection::GameOver)
        } else {
            let visibility = self.grid.cell(coords)?.visibility();
            match visibility {
                Flagged => Outcome::Rejected(Rejection::FlaggedCell),
                Opened => Outcome::Rejected(Rejection::AlreadyOpened),
                Closed => self.execute_open(coords)?,
            }
        };

        Ok(self.finish_move(outcome, coords))
    }

    pub fn open_around(&mut self, coords: Coord2) -> Result<Outcome> {
        let coords = self.grid.validate_coords(coords)?;
        let outcome = if self.state.is_over() {
            Outcome::Rejected(Rejection::GameOver)
        } else {
            let cell = self.grid.cell(coords)?;
            if cell.is_closed() {
                Outcome::Rejected(Rejection::ClosedTarget)
            } else {
                let mine_count = usize::from(cell.mine_count());
                let flag_count = self
                    .grid
                    .adjacent_cells(coords)?
                    .filter(|cell| cell.is_flagged())
                    .count();

                if flag_count == mine_count {
                    self.execute_open_around(coords)?
                } else {
                    Outcome::Rejected(Rejection::FlagCountMismatch)
                }
            }
        };

        Ok(self.finish_move(outcome, coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Outcome> {
        use Visibility::*;

        let coords = self.grid.validate_coords(coords)?;
        let outcome = if self.state.is_over() {
            Outcome::Rejected(Rejection::GameOver)
        } else {
            let cell = self.grid.cell_mut(coords)?;
            match cell.visibility() {
                Opened => Outcome::Rejected(Rejection::OpenedCell),
                Flagged => {
                    cell.set_visibility(Closed);
                    Outcome::FlagRemoved
                }
                Closed => {
                    cell.set_visibility(Flagged);
                    Outcome::FlagSet
                }
            }
        };

        Ok(self.finish_move(outcome, coords))
    }

    fn execute_open(&mut self, coords: Coord2) -> Result<Outcome> {
        let cell = self.grid.cell_mut(coords)?;
        cell.set_visibility(Visibility::Opened);
        let (is_mine, mine_count) = (cell.is_mine(), cell.mine_count());

        if is_mine {
            self.detonate(coords);
            return Ok(Outcome::Detonated { mine: coords });
        }

        log::debug!("Open cell at {:?}, mine count: {}", coords, mine_count);
        if mine_count == 0 {
            let opened = flood_open(&mut self.grid, coords, self.flood_order)?;
            log::debug!("Flood-fill from {:?} opened {} cells", coords, opened);
        }

        Ok(Outcome::Opened)
    }

    /// Opens every closed neighbour once, without cascading into zero-count cells.
    ///
    /// A mine revealed here, possible under misplaced flags, does not end the game. Only `open_cell` detonates.
    fn execute_open_around(&mut self, coords: Coord2) -> Result<Outcome> {
        let mut opened: CellCount = 0;

        for pos in self.grid.neighbors(coords) {
            let cell = self.grid.cell_mut(pos)?;
            if cell.is_closed() {
                cell.set_visibility(Visibility::Opened);
                opened += 1;
            }
        }

        log::debug!("Open around {:?} opened {} cells", coords, opened);
        Ok(Outcome::OpenedAround)
    }

    fn detonate(&mut self, mine: Coord2) {
        log::debug!("Mine detonated at {:?}", mine);
        self.triggered_mine = Some(mine);
        self.state = GameState::GameOver;
    }

    fn finish_move(&mut self, outcome: Outcome, at: Coord2) -> Outcome {
        self.finish(Status::Move { outcome, at });
        outcome
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        for observer in &mut self.observers {
            observer();
        }
    }
}
