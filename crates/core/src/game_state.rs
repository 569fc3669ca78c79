//! Game state module - the session aggregate and its turn state machine
//!
//! This module ties together all core components: grid, pieces, obstacle
//! pass, scoring and boosters. A [`GameState`] is a value: every operation
//! takes `&self` and returns a new state plus the feedback events the turn
//! produced, so a session can be snapshotted, replayed or undone freely.
//!
//! # States
//!
//! ```text
//! Active ──► GameOver
//!    └─────► LevelCleared
//! ```
//!
//! Terminal states only end with a fresh session.
//!
//! # Turn order
//!
//! 1. Validate the slot and anchor (else one `invalidDrop`)
//! 2. Place, detect completed lines, update the combo streak
//! 3. Run the obstacle pass on the post-place, pre-clear grid
//! 4. Clear completed lines, score the move
//! 5. Emit `place`, `lineClear`, `combo`/`superCombo`, `chain`
//! 6. Refill the tray once all three slots are used
//! 7. Check level clear, then game over

use std::collections::BTreeSet;

use arrayvec::ArrayVec;
use chrono::{DateTime, Utc};
use log::debug;

use crate::boosters::{self, BoosterInventory, GuideSuggestion};
use crate::grid::Grid;
use crate::levels::LevelConfig;
use crate::obstacle_pass::process_obstacles;
use crate::pieces::{BlockPiece, PieceGenerator, PieceTray};
use crate::scoring::{calculate_move_score, calculate_stars, combo_index};
use crate::snapshot::GameSnapshot;
use crate::types::{
    BoosterKind, ClearKind, FeedbackEvent, FeedbackKind, GameMode, PatternKind, Position,
    COMBO_EVENT_THRESHOLD, DEFAULT_GRID_SIZE, SUPER_COMBO_THRESHOLD,
};

/// Events produced by a single call, in emission order
pub type FeedbackEvents = ArrayVec<FeedbackEvent, 6>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Active,
    GameOver,
    LevelCleared,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::GameOver => "gameOver",
            GameStatus::LevelCleared => "levelCleared",
        }
    }
}

/// Target of a booster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoosterTarget {
    None,
    /// Stone Breaker
    Cell(Position),
    /// Lightning row or Wave column
    Line(i32),
}

/// Outcome of [`GameState::place_piece`]
#[derive(Debug, Clone)]
pub struct TurnResult {
    pub state: GameState,
    pub events: FeedbackEvents,
}

/// Outcome of [`GameState::use_booster`]
#[derive(Debug, Clone)]
pub struct BoosterResult {
    pub state: GameState,
    pub events: FeedbackEvents,
    /// Set when a guide was used successfully
    pub suggestion: Option<GuideSuggestion>,
}

/// Legal anchors for one tray slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiecePlacements {
    pub piece_index: usize,
    pub anchors: Vec<Position>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    pieces: PieceTray,
    generator: PieceGenerator,
    mode: GameMode,
    level: Option<LevelConfig>,
    status: GameStatus,
    score: u32,
    /// Consecutive clearing moves
    combo: u32,
    best_combo: u32,
    moves: u32,
    lines_cleared: u32,
    stars: u8,
    boosters: BoosterInventory,
    discovered: BTreeSet<PatternKind>,
    started_at: DateTime<Utc>,
}

fn event(kind: FeedbackKind, intensity: f32) -> FeedbackEvent {
    FeedbackEvent::new(kind).with_intensity(intensity)
}

fn invalid_drop() -> FeedbackEvents {
    let mut events = FeedbackEvents::new();
    events.push(event(FeedbackKind::InvalidDrop, 0.3));
    events
}

impl GameState {
    /// Start a session with entropy-backed pieces
    ///
    /// The grid comes from `level` when given, otherwise an empty 8x8.
    pub fn new(mode: GameMode, level: Option<LevelConfig>) -> Self {
        Self::with_generator(mode, level, PieceGenerator::new())
    }

    /// Start a fully replayable session: every piece set comes from `seed`
    pub fn new_seeded(mode: GameMode, level: Option<LevelConfig>, seed: u32) -> Self {
        Self::with_generator(mode, level, PieceGenerator::seeded(seed))
    }

    fn with_generator(mode: GameMode, level: Option<LevelConfig>, mut generator: PieceGenerator) -> Self {
        let grid = match &level {
            Some(config) => Grid::from_config(config),
            None => Grid::new(DEFAULT_GRID_SIZE),
        };
        let pieces = generator.generate_tray();
        debug!(
            "new {} session (level {:?}, seeded: {})",
            mode.as_str(),
            level.as_ref().map(|l| l.id),
            generator.is_seeded()
        );
        Self {
            grid,
            pieces,
            generator,
            mode,
            level,
            status: GameStatus::Active,
            score: 0,
            combo: 0,
            best_combo: 0,
            moves: 0,
            lines_cleared: 0,
            stars: 0,
            boosters: BoosterInventory::default(),
            discovered: BTreeSet::new(),
            started_at: Utc::now(),
        }
    }

    /// Replace the inventory, e.g. with one restored from storage
    pub fn with_boosters(mut self, boosters: BoosterInventory) -> Self {
        self.boosters = boosters;
        self
    }

    /// Replace the grid, e.g. to resume a saved board
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    /// Replace the tray
    pub fn with_pieces(mut self, pieces: PieceTray) -> Self {
        self.pieces = pieces;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    pub fn pieces(&self) -> &PieceTray {
        &self.pieces
    }

    pub fn piece(&self, index: usize) -> Option<&BlockPiece> {
        self.pieces.get(index).and_then(Option::as_ref)
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn level(&self) -> Option<&LevelConfig> {
        self.level.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Stars earned, set when the level is cleared
    pub fn stars(&self) -> u8 {
        self.stars
    }

    pub fn boosters(&self) -> &BoosterInventory {
        &self.boosters
    }

    pub fn discovered_patterns(&self) -> &BTreeSet<PatternKind> {
        &self.discovered
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }

    /// Whether the level's clear condition is met (never in classic mode)
    ///
    /// A `moves` condition is met once the score reaches the one-star threshold.
    pub fn is_level_cleared(&self) -> bool {
        if self.mode == GameMode::Classic {
            return false;
        }
        let Some(level) = &self.level else {
            return false;
        };
        match level.clear_condition.kind {
            ClearKind::Score => self.score >= level.clear_condition.target,
            ClearKind::Lines => self.lines_cleared >= level.clear_condition.target,
            ClearKind::Moves => self.score >= level.star_thresholds[0],
        }
    }

    /// Whether the move cap is reached or no present piece fits anywhere
    ///
    /// An all-empty tray is never game over on its own.
    pub fn is_game_over(&self) -> bool {
        if let Some(max) = self.level.as_ref().and_then(|l| l.max_moves) {
            if self.moves >= max {
                return true;
            }
        }
        if self.pieces.iter().all(Option::is_none) {
            return false;
        }
        !self.grid.has_valid_placement(&self.pieces)
    }

    /// Every legal anchor per present piece
    pub fn available_placements(&self) -> Vec<PiecePlacements> {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(piece_index, piece)| {
                piece.as_ref().map(|p| PiecePlacements {
                    piece_index,
                    anchors: self.grid.placements_for(p),
                })
            })
            .collect()
    }

    fn unchanged(&self, events: FeedbackEvents) -> TurnResult {
        TurnResult {
            state: self.clone(),
            events,
        }
    }

    /// Place the piece in slot `index` with its top-left at `anchor`
    pub fn place_piece(&self, index: usize, anchor: Position) -> TurnResult {
        if self.is_terminal() {
            return self.unchanged(FeedbackEvents::new());
        }
        let Some(piece) = self.piece(index) else {
            return self.unchanged(invalid_drop());
        };
        if !self.grid.can_place(piece, anchor) {
            return self.unchanged(invalid_drop());
        }

        let placed = self.grid.place(piece, anchor);
        let lines = placed.completed_lines();
        let total_lines = lines.total();
        let combo = if total_lines > 0 { self.combo + 1 } else { 0 };

        let cells: Vec<Position> = piece.shape.cells_at(anchor).collect();
        let outcome = process_obstacles(&placed, &cells, &lines);
        let grid = if total_lines > 0 {
            outcome.grid.clear_lines(&lines.rows, &lines.cols)
        } else {
            outcome.grid
        };

        let result = calculate_move_score(
            piece.cell_count(),
            total_lines,
            combo_index(combo),
            outcome.kintsugi,
        );

        let mut events = FeedbackEvents::new();
        events.push(event(FeedbackKind::Place, 0.5).with_score(result.placement_score));
        if total_lines > 0 {
            events.push(
                event(FeedbackKind::LineClear, (0.3 + total_lines as f32 * 0.2).min(1.0))
                    .with_lines(lines.rows.clone(), lines.cols.clone())
                    .with_score(result.line_clear_score),
            );
            if combo >= COMBO_EVENT_THRESHOLD {
                let kind = if combo >= SUPER_COMBO_THRESHOLD {
                    FeedbackKind::SuperCombo
                } else {
                    FeedbackKind::Combo
                };
                events.push(
                    event(kind, (0.4 + combo as f32 * 0.15).min(1.0))
                        .with_combo(combo)
                        .with_score(result.total),
                );
            }
        }
        if outcome.chains_broken > 0 {
            events.push(event(FeedbackKind::Chain, 0.7));
        }

        let mut next = self.clone();
        next.discovered.insert(piece.pattern);
        next.pieces[index] = None;
        if next.pieces.iter().all(Option::is_none) {
            next.pieces = next.generator.generate_tray();
        }
        next.grid = grid;
        next.score = self.score.saturating_add(result.total);
        next.combo = combo;
        next.best_combo = self.best_combo.max(combo);
        next.moves = self.moves + 1;
        next.lines_cleared = self.lines_cleared + total_lines as u32;

        debug!(
            "placed {} at ({}, {}): {} line(s), combo {}, +{} (score {})",
            piece.shape.id, anchor.row, anchor.col, total_lines, combo, result.total, next.score
        );

        if let Some(terminal) = next.settle() {
            events.push(terminal);
        }

        TurnResult {
            state: next,
            events,
        }
    }

    /// Apply level-clear (first) or game-over, returning the terminal event
    fn settle(&mut self) -> Option<FeedbackEvent> {
        if self.is_level_cleared() {
            self.stars = self
                .level
                .as_ref()
                .map_or(0, |l| calculate_stars(self.score, l.star_thresholds));
            self.status = GameStatus::LevelCleared;
            debug!("level cleared with {} ({} stars)", self.score, self.stars);
            return Some(event(FeedbackKind::LevelClear, 1.0).with_score(self.score));
        }
        self.check_game_over()
    }

    fn check_game_over(&mut self) -> Option<FeedbackEvent> {
        if !self.is_game_over() {
            return None;
        }
        self.status = GameStatus::GameOver;
        debug!("game over at {} after {} moves", self.score, self.moves);
        Some(event(FeedbackKind::GameOver, 0.8).with_score(self.score))
    }

    /// Spend one booster of `kind`
    ///
    /// Depleted boosters and targets of the wrong shape are rejected with an
    /// `invalidDrop` and cost nothing. A guide with no suggestion is also
    /// free and changes nothing.
    pub fn use_booster(&self, kind: BoosterKind, target: BoosterTarget) -> BoosterResult {
        let reject = |events: FeedbackEvents| BoosterResult {
            state: self.clone(),
            events,
            suggestion: None,
        };
        if self.is_terminal() {
            return reject(FeedbackEvents::new());
        }
        let target_fits = match kind {
            BoosterKind::StoneBreaker => matches!(target, BoosterTarget::Cell(_)),
            BoosterKind::Lightning | BoosterKind::Wave => matches!(target, BoosterTarget::Line(_)),
            BoosterKind::Shuffle | BoosterKind::Guide => true,
        };
        if !target_fits {
            return reject(invalid_drop());
        }
        let Ok(boosters) = self.boosters.consume(kind) else {
            return reject(invalid_drop());
        };

        let mut next = self.clone();
        next.boosters = boosters;
        let mut events = FeedbackEvents::new();
        let mut suggestion = None;
        let size = self.grid.size() as i32;
        let line_index = |line: i32| -> Vec<usize> {
            if (0..size).contains(&line) {
                vec![line as usize]
            } else {
                Vec::new()
            }
        };

        match (kind, target) {
            (BoosterKind::StoneBreaker, BoosterTarget::Cell(pos)) => {
                next.grid = boosters::stone_breaker(&self.grid, pos);
                events.push(event(FeedbackKind::Place, 0.8));
            }
            (BoosterKind::Shuffle, _) => {
                next.pieces = boosters::shuffle(&mut next.generator);
                events.push(event(FeedbackKind::Place, 0.4));
            }
            (BoosterKind::Guide, _) => {
                let Some(found) = boosters::guide(&self.grid, &self.pieces) else {
                    return reject(FeedbackEvents::new());
                };
                suggestion = Some(found);
                events.push(event(FeedbackKind::Hover, 0.3));
            }
            (BoosterKind::Lightning, BoosterTarget::Line(row)) => {
                next.grid = boosters::lightning(&self.grid, row);
                events.push(
                    event(FeedbackKind::LineClear, 0.9).with_lines(line_index(row), Vec::new()),
                );
            }
            (BoosterKind::Wave, BoosterTarget::Line(col)) => {
                next.grid = boosters::wave(&self.grid, col);
                events.push(
                    event(FeedbackKind::LineClear, 0.9).with_lines(Vec::new(), line_index(col)),
                );
            }
            _ => return reject(invalid_drop()),
        }

        debug!(
            "used {} ({:?}), {} left",
            kind.as_str(),
            target,
            next.boosters.get(kind)
        );

        if let Some(terminal) = next.check_game_over() {
            events.push(terminal);
        }

        BoosterResult {
            state: next,
            events,
            suggestion,
        }
    }
}
