//! Snapshot module - plain-data view of a session
//!
//! [`GameSnapshot`] flattens a [`GameState`] into owned primitives for
//! rendering and persistence collaborators (and the adapter's JSON).
//!
//! # Cell codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | empty |
//! | 1-7 | filled, pattern index + 1 in [`PatternKind::ALL`] order |
//! | 8 | stone |
//! | 9 | frozen (`counter` = turns left) |
//! | 10 | chain (`counter` = hit points) |
//! | 11 | rotate |

use crate::game_state::{GameState, GameStatus};
use crate::grid::{Cell, CellState, Obstacle};
use crate::types::{GameMode, PatternKind, Position};

pub const CODE_EMPTY: u8 = 0;
pub const CODE_STONE: u8 = 8;
pub const CODE_FROZEN: u8 = 9;
pub const CODE_CHAIN: u8 = 10;
pub const CODE_ROTATE: u8 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSnapshot {
    pub code: u8,
    /// Frozen turns or chain hit points, 0 otherwise
    pub counter: u8,
    pub fog: bool,
    pub kintsugi: bool,
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        let (code, counter) = match cell.state {
            CellState::Empty => (CODE_EMPTY, 0),
            CellState::Filled(pattern) => (pattern_code(pattern), 0),
            CellState::Obstacle(Obstacle::Stone) => (CODE_STONE, 0),
            CellState::Obstacle(Obstacle::Frozen { turns }) => (CODE_FROZEN, turns),
            CellState::Obstacle(Obstacle::Chain { hp }) => (CODE_CHAIN, hp),
            CellState::Obstacle(Obstacle::Rotate) => (CODE_ROTATE, 0),
        };
        Self {
            code,
            counter,
            fog: cell.fog,
            kintsugi: cell.kintsugi,
        }
    }
}

/// Code for a filled cell of `pattern`
pub fn pattern_code(pattern: PatternKind) -> u8 {
    PatternKind::ALL
        .iter()
        .position(|p| *p == pattern)
        .map_or(CODE_EMPTY, |i| i as u8 + 1)
}

/// A tray slot's piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSnapshot {
    pub id: String,
    pub shape: &'static str,
    pub pattern: PatternKind,
    pub cells: Vec<Position>,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub grid_size: usize,
    /// Row-major rows of cells
    pub grid: Vec<Vec<CellSnapshot>>,
    pub pieces: Vec<Option<PieceSnapshot>>,
    pub mode: GameMode,
    pub status: GameStatus,
    pub level_id: Option<i32>,
    pub target: Option<u32>,
    pub max_moves: Option<u32>,
    pub score: u32,
    pub combo: u32,
    pub best_combo: u32,
    pub moves: u32,
    pub lines_cleared: u32,
    pub stars: u8,
    /// `[stone_breaker, shuffle, guide, lightning, wave]`
    pub boosters: [u32; 5],
    pub discovered: Vec<PatternKind>,
    pub fill_ratio: f64,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Active
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        let grid = state.grid();
        let level = state.level();
        Self {
            grid_size: grid.size(),
            grid: (0..grid.size())
                .map(|r| grid.row(r).iter().map(CellSnapshot::from).collect())
                .collect(),
            pieces: state
                .pieces()
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|p| PieceSnapshot {
                        id: p.id.clone(),
                        shape: p.shape.id,
                        pattern: p.pattern,
                        cells: p.shape.cells.to_vec(),
                        width: p.shape.width,
                        height: p.shape.height,
                    })
                })
                .collect(),
            mode: state.mode(),
            status: state.status(),
            level_id: level.map(|l| l.id),
            target: level.map(|l| l.clear_condition.target),
            max_moves: level.and_then(|l| l.max_moves),
            score: state.score(),
            combo: state.combo(),
            best_combo: state.best_combo(),
            moves: state.moves(),
            lines_cleared: state.lines_cleared(),
            stars: state.stars(),
            boosters: state.boosters().counts(),
            discovered: state.discovered_patterns().iter().copied().collect(),
            fill_ratio: grid.fill_ratio(),
        }
    }
}
