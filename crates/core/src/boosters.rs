//! Boosters module - inventory, catalog and the five booster effects
//!
//! | Booster | Target | Effect | Cost |
//! |---------|--------|--------|------|
//! | Stone Breaker | cell | Empty one cell, whatever it holds | 50 |
//! | Shuffle | none | Replace the tray with 3 fresh pieces | 30 |
//! | Guide | none | Suggest the best placement (read-only) | 20 |
//! | Lightning | row | Empty an entire row, obstacles included | 80 |
//! | Wave | column | Empty an entire column, obstacles included | 80 |
//!
//! The effect functions here never touch the inventory. Consumption is the
//! orchestrator's job, see [`crate::game_state::GameState::use_booster`].
//! Out-of-bounds targets leave the grid unchanged.

use crate::error::EngineError;
use crate::grid::{Cell, Grid};
use crate::pieces::{BlockPiece, PieceGenerator, PieceTray};
use crate::types::{BoosterKind, Position, DEFAULT_BOOSTER_COUNTS};

/// Static metadata for a booster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoosterDefinition {
    pub kind: BoosterKind,
    pub name: &'static str,
    pub description: &'static str,
    pub coin_cost: u32,
}

/// Catalog in [`BoosterKind::index`] order
pub const BOOSTER_DEFINITIONS: [BoosterDefinition; 5] = [
    BoosterDefinition {
        kind: BoosterKind::StoneBreaker,
        name: "Stone Breaker",
        description: "Destroys one obstacle on the selected cell.",
        coin_cost: 50,
    },
    BoosterDefinition {
        kind: BoosterKind::Shuffle,
        name: "Shuffle",
        description: "Replaces all current pieces with a new random set.",
        coin_cost: 30,
    },
    BoosterDefinition {
        kind: BoosterKind::Guide,
        name: "Guide",
        description: "Highlights the placement that yields the highest score.",
        coin_cost: 20,
    },
    BoosterDefinition {
        kind: BoosterKind::Lightning,
        name: "Lightning",
        description: "Clears an entire selected row, obstacles included.",
        coin_cost: 80,
    },
    BoosterDefinition {
        kind: BoosterKind::Wave,
        name: "Wave",
        description: "Clears an entire selected column, obstacles included.",
        coin_cost: 80,
    },
];

pub fn booster_definition(kind: BoosterKind) -> &'static BoosterDefinition {
    &BOOSTER_DEFINITIONS[kind.index()]
}

pub fn booster_cost(kind: BoosterKind) -> u32 {
    booster_definition(kind).coin_cost
}

/// Non-negative count per booster kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoosterInventory {
    counts: [u32; 5],
}

impl BoosterInventory {
    pub const fn from_counts(counts: [u32; 5]) -> Self {
        Self { counts }
    }

    /// Zero of everything
    pub const fn empty() -> Self {
        Self { counts: [0; 5] }
    }

    /// Counts as `[stone_breaker, shuffle, guide, lightning, wave]`
    pub fn counts(&self) -> [u32; 5] {
        self.counts
    }

    pub fn get(&self, kind: BoosterKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn has(&self, kind: BoosterKind) -> bool {
        self.get(kind) > 0
    }

    /// One fewer of `kind`; fails when none remain
    pub fn consume(self, kind: BoosterKind) -> Result<Self, EngineError> {
        if !self.has(kind) {
            return Err(EngineError::BoosterDepleted(kind));
        }
        let mut next = self;
        next.counts[kind.index()] -= 1;
        Ok(next)
    }

    pub fn add(self, kind: BoosterKind, amount: u32) -> Self {
        let mut next = self;
        let slot = &mut next.counts[kind.index()];
        *slot = slot.saturating_add(amount);
        next
    }
}

impl Default for BoosterInventory {
    fn default() -> Self {
        Self::from_counts(DEFAULT_BOOSTER_COUNTS)
    }
}

/// A suggested placement from the guide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideSuggestion {
    pub piece_index: usize,
    pub position: Position,
    /// Lines the placement would complete
    pub lines: usize,
    pub score: f64,
}

/// Empty a single cell, destroying any obstacle or overlay on it
pub fn stone_breaker(grid: &Grid, target: Position) -> Grid {
    let mut next = grid.clone();
    next.set(target, Cell::EMPTY);
    next
}

/// Replace the tray with a fresh set drawn from `generator`
pub fn shuffle(generator: &mut PieceGenerator) -> PieceTray {
    generator.generate_tray()
}

/// Best placement over every present piece and legal anchor
///
/// Candidates score `lines * 1000 + (size - distance)`, where distance is the
/// Manhattan offset of the piece's bounding-box center from the grid center.
/// Scans piece-major then row-major; the first strictly-greater score wins.
pub fn guide(grid: &Grid, pieces: &[Option<BlockPiece>]) -> Option<GuideSuggestion> {
    let size = grid.size() as i32;
    let center = (size - 1) as f64 / 2.0;
    let mut best: Option<GuideSuggestion> = None;

    for (piece_index, piece) in pieces.iter().enumerate() {
        let Some(piece) = piece else {
            continue;
        };
        let half_h = piece.shape.height as f64 / 2.0;
        let half_w = piece.shape.width as f64 / 2.0;
        for row in 0..size {
            for col in 0..size {
                let anchor = Position::new(row, col);
                if !grid.can_place(piece, anchor) {
                    continue;
                }
                let lines = grid.place(piece, anchor).completed_lines().total();
                let distance =
                    (row as f64 + half_h - center).abs() + (col as f64 + half_w - center).abs();
                let score = lines as f64 * 1000.0 + (size as f64 - distance);
                if best.map_or(true, |b| score > b.score) {
                    best = Some(GuideSuggestion {
                        piece_index,
                        position: anchor,
                        lines,
                        score,
                    });
                }
            }
        }
    }
    best
}

/// Empty an entire row, out of range is a no-op
pub fn lightning(grid: &Grid, row: i32) -> Grid {
    let mut next = grid.clone();
    for col in 0..grid.size() as i32 {
        next.set(Position::new(row, col), Cell::EMPTY);
    }
    next
}

/// Empty an entire column, out of range is a no-op
pub fn wave(grid: &Grid, col: i32) -> Grid {
    let mut next = grid.clone();
    for row in 0..grid.size() as i32 {
        next.set(Position::new(row, col), Cell::EMPTY);
    }
    next
}
