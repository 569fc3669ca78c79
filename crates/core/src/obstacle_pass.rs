//! Obstacle pass - per-turn obstacle state transitions
//!
//! Runs once per resolved placement on the post-place, pre-clear grid, in a
//! fixed order:
//!
//! 1. **Fog reveal**: fog is lifted within Chebyshev radius 2 of each placed cell
//! 2. **Kintsugi detection**: marked cells on the completed lines (read-only)
//! 3. **Chain reduction**: one hit per axis when a cleared row/col is within 1
//! 4. **Frozen thaw**: every frozen cell counts down, regardless of clears
//!
//! Chain reduction is skipped entirely on turns with no completed lines.

use log::trace;

use crate::grid::{Cell, CellState, CompletedLines, Grid, Obstacle};
use crate::types::{Position, FOG_REVEAL_RADIUS};

/// Result of one obstacle pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleOutcome {
    pub grid: Grid,
    /// Any kintsugi-marked cell lies on a completed line
    pub kintsugi: bool,
    /// Distinct marked positions on completed lines, row-major
    pub kintsugi_positions: Vec<Position>,
    /// Chains destroyed this pass
    pub chains_broken: u32,
}

/// Lift fog around every placed cell
pub fn reveal_fog(grid: &Grid, placed: &[Position]) -> Grid {
    let mut next = grid.clone();
    for &center in placed {
        let fogged: Vec<(Position, Cell)> = next
            .iter()
            .filter(|(pos, cell)| cell.fog && pos.chebyshev(center) <= FOG_REVEAL_RADIUS)
            .map(|(pos, cell)| (pos, *cell))
            .collect();
        for (pos, cell) in fogged {
            next.set(pos, Cell { fog: false, ..cell });
        }
    }
    next
}

/// Kintsugi-marked cells lying on completed lines
pub fn find_kintsugi(grid: &Grid, lines: &CompletedLines) -> Vec<Position> {
    if lines.is_empty() {
        return Vec::new();
    }
    grid.iter()
        .filter(|(pos, cell)| cell.kintsugi && lines.covers(*pos))
        .map(|(pos, _)| pos)
        .collect()
}

fn chain_hits(pos: Position, lines: &CompletedLines) -> u8 {
    let near = |line: usize, at: i32| (line as i32 - at).abs() <= 1;
    let row_hit = lines.rows.iter().any(|&r| near(r, pos.row));
    let col_hit = lines.cols.iter().any(|&c| near(c, pos.col));
    row_hit as u8 + col_hit as u8
}

/// Damage chains adjacent to cleared lines, returning the grid and chains broken
pub fn reduce_chains(grid: &Grid, lines: &CompletedLines) -> (Grid, u32) {
    if lines.is_empty() {
        return (grid.clone(), 0);
    }
    let mut next = grid.clone();
    let mut broken = 0;
    for (pos, cell) in grid.iter() {
        let CellState::Obstacle(Obstacle::Chain { hp }) = cell.state else {
            continue;
        };
        let hits = chain_hits(pos, lines);
        if hits == 0 {
            continue;
        }
        let hp = hp.saturating_sub(hits);
        if hp == 0 {
            next.set(pos, Cell::EMPTY);
            broken += 1;
        } else {
            next.set(pos, Cell::obstacle(Obstacle::Chain { hp }));
        }
        trace!("chain at ({}, {}) took {} hit(s), hp now {}", pos.row, pos.col, hits, hp);
    }
    (next, broken)
}

/// Count every frozen cell down by one, thawing those that reach zero
pub fn thaw_frozen(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    for (pos, cell) in grid.iter() {
        let CellState::Obstacle(Obstacle::Frozen { turns }) = cell.state else {
            continue;
        };
        let turns = turns.saturating_sub(1);
        if turns == 0 {
            next.set(pos, Cell::EMPTY);
            trace!("frozen cell at ({}, {}) thawed", pos.row, pos.col);
        } else {
            next.set(pos, Cell::obstacle(Obstacle::Frozen { turns }));
        }
    }
    next
}

/// Run the full pass in order
pub fn process_obstacles(grid: &Grid, placed: &[Position], lines: &CompletedLines) -> ObstacleOutcome {
    let revealed = reveal_fog(grid, placed);
    let kintsugi_positions = find_kintsugi(&revealed, lines);
    let (chained, chains_broken) = reduce_chains(&revealed, lines);
    let grid = thaw_frozen(&chained);
    ObstacleOutcome {
        grid,
        kintsugi: !kintsugi_positions.is_empty(),
        kintsugi_positions,
        chains_broken,
    }
}
