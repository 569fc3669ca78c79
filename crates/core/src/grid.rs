//! Grid module - the playfield and its placement/line rules
//!
//! The grid is an N x N square (8 x 8 for every shipped level) stored as a
//! flat row-major `Vec<Cell>`. Coordinates are `(row, col)`, `(0, 0)` at the
//! top-left.
//!
//! Grid operations never mutate their input: `place`, `clear_lines` and
//! friends return a fresh grid. [`Grid::set`] exists for building fixtures.
//!
//! # Cell model
//!
//! | State | Blocks placement | Counts toward a line | Survives clear |
//! |-------|------------------|----------------------|----------------|
//! | `Empty` | no | no | n/a |
//! | `Filled(pattern)` | yes | yes | no |
//! | `Obstacle(..)` | yes | yes | yes |
//!
//! Fog and kintsugi are overlays on a cell, not states. A fogged or
//! kintsugi-marked empty cell is placeable and must be filled to complete
//! its line.

use crate::levels::{LevelConfig, ObstacleConfig};
use crate::pieces::BlockPiece;
use crate::types::{
    ObstacleKind, PatternKind, Position, DEFAULT_CHAIN_HP, DEFAULT_FROZEN_TURNS,
};

/// Obstacles that occupy their cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Obstacle {
    Stone,
    /// Thaws when `turns` reaches zero
    Frozen { turns: u8 },
    /// Breaks when `hp` reaches zero
    Chain { hp: u8 },
    Rotate,
}

impl Obstacle {
    pub fn kind(&self) -> ObstacleKind {
        match self {
            Obstacle::Stone => ObstacleKind::Stone,
            Obstacle::Frozen { .. } => ObstacleKind::Frozen,
            Obstacle::Chain { .. } => ObstacleKind::Chain,
            Obstacle::Rotate => ObstacleKind::Rotate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Filled(PatternKind),
    Obstacle(Obstacle),
}

/// One grid cell: a state plus the fog and kintsugi overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub state: CellState,
    /// Visually hidden; has no effect on placement
    pub fog: bool,
    /// Persistent gold line marker; doubles the line score when cleared
    pub kintsugi: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        state: CellState::Empty,
        fog: false,
        kintsugi: false,
    };

    pub const fn filled(pattern: PatternKind) -> Self {
        Cell {
            state: CellState::Filled(pattern),
            fog: false,
            kintsugi: false,
        }
    }

    pub const fn obstacle(obstacle: Obstacle) -> Self {
        Cell {
            state: CellState::Obstacle(obstacle),
            fog: false,
            kintsugi: false,
        }
    }

    pub const fn fogged() -> Self {
        Cell {
            state: CellState::Empty,
            fog: true,
            kintsugi: false,
        }
    }

    pub const fn kintsugi() -> Self {
        Cell {
            state: CellState::Empty,
            fog: false,
            kintsugi: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, CellState::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self.state, CellState::Filled(_))
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self.state, CellState::Obstacle(_))
    }

    pub fn obstacle_kind(&self) -> Option<ObstacleKind> {
        match self.state {
            CellState::Obstacle(o) => Some(o.kind()),
            _ => None,
        }
    }

    /// Filled and obstacle cells count as occupied for line completion
    pub fn is_occupied(&self) -> bool {
        !self.is_empty()
    }
}

/// Rows and columns found complete in one scan, both ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedLines {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

impl CompletedLines {
    /// Total simultaneous lines (rows + cols)
    pub fn total(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Whether `pos` lies on any completed row or column
    pub fn covers(&self, pos: Position) -> bool {
        (pos.row >= 0 && self.rows.contains(&(pos.row as usize)))
            || (pos.col >= 0 && self.cols.contains(&(pos.col as usize)))
    }
}

/// Square playfield with flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::EMPTY; size * size],
        }
    }

    /// Build the starting grid for a level
    ///
    /// A pre-baked grid is returned as a copy and the obstacle list is
    /// ignored. Otherwise obstacle entries are stamped onto an empty grid in
    /// order; a later entry replaces an earlier cell wholesale. Positions
    /// outside the grid are skipped.
    pub fn from_config(config: &LevelConfig) -> Self {
        if let Some(grid) = &config.grid {
            return grid.clone();
        }
        let mut grid = Grid::new(config.grid_size);
        for obstacle in &config.obstacles {
            grid.stamp(obstacle);
        }
        grid
    }

    fn stamp(&mut self, config: &ObstacleConfig) {
        let cell = match config.kind {
            ObstacleKind::Stone => Cell::obstacle(Obstacle::Stone),
            ObstacleKind::Rotate => Cell::obstacle(Obstacle::Rotate),
            ObstacleKind::Frozen => Cell::obstacle(Obstacle::Frozen {
                turns: config.frozen_turns.unwrap_or(DEFAULT_FROZEN_TURNS),
            }),
            ObstacleKind::Chain => Cell::obstacle(Obstacle::Chain {
                hp: config.chain_hp.unwrap_or(DEFAULT_CHAIN_HP),
            }),
            ObstacleKind::Fog => Cell::fogged(),
            ObstacleKind::Kintsugi => Cell::kintsugi(),
        };
        for &pos in &config.positions {
            self.set(pos, cell);
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        let n = self.size as i32;
        if pos.row < 0 || pos.row >= n || pos.col < 0 || pos.col >= n {
            return None;
        }
        Some(pos.row as usize * self.size + pos.col as usize)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at a position, `None` when out of bounds
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    /// Shorthand for [`Grid::cell`] with unsigned coordinates
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cell(Position::new(row as i32, col as i32))
    }

    /// Set cell at a position, returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Flat row-major cell slice
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.size {
            return &[];
        }
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Iterate `(position, cell)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let pos = Position::new((i / self.size) as i32, (i % self.size) as i32);
            (pos, cell)
        })
    }

    /// Whether every cell of `piece` anchored at `anchor` is in bounds and empty
    pub fn can_place(&self, piece: &BlockPiece, anchor: Position) -> bool {
        piece
            .shape
            .cells_at(anchor)
            .all(|pos| matches!(self.cell(pos), Some(c) if c.is_empty()))
    }

    /// Fill the cells of `piece` at `anchor`
    ///
    /// No validation; callers check [`Grid::can_place`] first. Overlays on
    /// the target cells are kept.
    pub fn place(&self, piece: &BlockPiece, anchor: Position) -> Grid {
        let mut next = self.clone();
        for pos in piece.shape.cells_at(anchor) {
            if let Some(idx) = next.index(pos) {
                next.cells[idx].state = CellState::Filled(piece.pattern);
            }
        }
        next
    }

    fn row_complete(&self, row: usize) -> bool {
        self.row(row).iter().all(Cell::is_occupied)
    }

    fn col_complete(&self, col: usize) -> bool {
        (0..self.size).all(|row| self.cells[row * self.size + col].is_occupied())
    }

    /// Rows and columns whose every cell is filled or an obstacle
    pub fn completed_lines(&self) -> CompletedLines {
        CompletedLines {
            rows: (0..self.size).filter(|&r| self.row_complete(r)).collect(),
            cols: (0..self.size).filter(|&c| self.col_complete(c)).collect(),
        }
    }

    /// Empty every non-obstacle cell lying on a listed row or column
    ///
    /// Fog is removed from cleared cells; kintsugi markers stay.
    pub fn clear_lines(&self, rows: &[usize], cols: &[usize]) -> Grid {
        let mut next = self.clone();
        for idx in 0..next.cells.len() {
            let (r, c) = (idx / self.size, idx % self.size);
            if !rows.contains(&r) && !cols.contains(&c) {
                continue;
            }
            let cell = &mut next.cells[idx];
            if cell.is_obstacle() {
                continue;
            }
            cell.state = CellState::Empty;
            cell.fog = false;
        }
        next
    }

    /// Every legal anchor for `piece`, in row-major order
    pub fn placements_for(&self, piece: &BlockPiece) -> Vec<Position> {
        let n = self.size as i32;
        let mut out = Vec::new();
        for row in 0..n {
            for col in 0..n {
                let anchor = Position::new(row, col);
                if self.can_place(piece, anchor) {
                    out.push(anchor);
                }
            }
        }
        out
    }

    fn has_placement(&self, piece: &BlockPiece) -> bool {
        let n = self.size as i32;
        (0..n).any(|row| (0..n).any(|col| self.can_place(piece, Position::new(row, col))))
    }

    /// Whether any present piece fits anywhere
    pub fn has_valid_placement(&self, pieces: &[Option<BlockPiece>]) -> bool {
        pieces.iter().flatten().any(|p| self.has_placement(p))
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Filled cells over non-obstacle cells, 0.0 when there are none
    pub fn fill_ratio(&self) -> f64 {
        let open = self.cells.iter().filter(|c| !c.is_obstacle()).count();
        if open == 0 {
            return 0.0;
        }
        self.filled_count() as f64 / open as f64
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_GRID_SIZE)
    }
}
