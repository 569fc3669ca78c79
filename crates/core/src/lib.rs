//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every rule of Wagara Blast: the grid, pieces,
//! obstacles, scoring, boosters, levels, daily challenges and the turn
//! orchestrator. It has **no dependencies** on UI, networking, or I/O:
//!
//! - **Deterministic**: a seed (or a calendar date) reproduces a session exactly
//! - **Immutable**: every operation returns a new state, inputs are never touched
//! - **Synchronous**: no suspension points, no shared mutable state
//!
//! # Module Structure
//!
//! - [`grid`]: N x N playfield, placement validation, line detection and clearing
//! - [`shapes`]: the 14 polyomino shapes
//! - [`pieces`]: piece instances and the (optionally seeded) generator
//! - [`patterns`]: wagara pattern catalog with weighted selection
//! - [`obstacles`]: static obstacle metadata
//! - [`obstacle_pass`]: per-turn fog, kintsugi, chain and frozen transitions
//! - [`scoring`]: placement, line clear, combo and kintsugi points
//! - [`boosters`]: inventory and the five booster effects
//! - [`levels`]: level configuration and the static 15-level table
//! - [`daily`]: per-date challenge synthesis and streaks
//! - [`game_state`]: the session aggregate and its turn state machine
//! - [`snapshot`]: plain-data view for rendering and persistence
//! - [`rng`]: Mulberry32 and entropy random sources, date seeds
//!
//! # Example
//!
//! ```
//! use wagara_blast_core::{GameState, BoosterTarget};
//! use wagara_blast_core::types::{BoosterKind, GameMode};
//!
//! // A replayable classic session
//! let game = GameState::new_seeded(GameMode::Classic, None, 12345);
//!
//! // Place the first piece wherever it fits
//! let anchor = game.available_placements()[0].anchors[0];
//! let turn = game.place_piece(0, anchor);
//! assert!(turn.state.score() > 0);
//! assert_eq!(game.score(), 0); // the old state is untouched
//!
//! // Ask the guide for a hint
//! let hint = turn.state.use_booster(BoosterKind::Guide, BoosterTarget::None);
//! assert!(hint.suggestion.is_some());
//! ```

pub mod boosters;
pub mod daily;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod levels;
pub mod obstacle_pass;
pub mod obstacles;
pub mod patterns;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use wagara_blast_types as types;

// Re-export commonly used types for convenience
pub use boosters::{BoosterInventory, GuideSuggestion};
pub use daily::{generate_daily_challenge, seed_for_date};
pub use error::EngineError;
pub use game_state::{
    BoosterResult, BoosterTarget, FeedbackEvents, GameState, GameStatus, PiecePlacements,
    TurnResult,
};
pub use grid::{Cell, CellState, CompletedLines, Grid, Obstacle};
pub use levels::{all_levels, load_level, max_level_id, ClearCondition, LevelConfig, ObstacleConfig};
pub use pieces::{generate_pieces, BlockPiece, PieceGenerator, PieceTray};
pub use rng::{date_seed, today_string, RandomSource, SeededRandom};
pub use scoring::{calculate_stars, ScoreResult};
pub use shapes::{shape_by_id, BlockShape, BLOCK_SHAPES};
pub use snapshot::GameSnapshot;
