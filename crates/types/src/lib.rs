//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental vocabulary used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the adapter protocol, and any rendering collaborator alike.
//!
//! # Grid
//!
//! The playfield is a square grid, 8x8 unless a level says otherwise.
//! Coordinates are `(row, col)` with `(0, 0)` at the top-left corner.
//! Positions are signed so that anchors outside the grid can be expressed
//! (and rejected) without wrapping.
//!
//! # Gameplay Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_SIZE` | 8 | Grid size for classic mode and daily challenges |
//! | `PIECES_PER_SET` | 3 | Pieces offered in the tray at once |
//! | `POINTS_PER_CELL` | 10 | Placement score per cell of the placed shape |
//! | `FOG_REVEAL_RADIUS` | 2 | Chebyshev radius revealed around placed cells |
//! | `SUPER_COMBO_THRESHOLD` | 4 | Combo streak at which `superCombo` replaces `combo` |
//! | `DEFAULT_FROZEN_TURNS` | 3 | Thaw countdown when a level omits it |
//! | `DEFAULT_CHAIN_HP` | 2 | Chain hit points when a level omits them |
//! | `DAILY_POSITION_ATTEMPTS` | 200 | Retry budget for random obstacle placement |
//! | `DEFAULT_BOOSTER_COUNTS` | 3/3/3/1/1 | Session inventory (stone breaker, shuffle, guide, lightning, wave) |
//!
//! # Examples
//!
//! ```
//! use wagara_blast_types::{BoosterKind, PatternKind, Position, DEFAULT_GRID_SIZE};
//!
//! let pattern = PatternKind::from_str("Seigaiha").unwrap();
//! assert_eq!(pattern, PatternKind::Seigaiha);
//! assert_eq!(pattern.as_str(), "seigaiha");
//!
//! let booster = BoosterKind::from_str("stoneBreaker").unwrap();
//! assert_eq!(booster, BoosterKind::StoneBreaker);
//!
//! let p = Position::new(2, 3).offset(Position::new(1, -1));
//! assert_eq!(p, Position::new(3, 2));
//! assert_eq!(DEFAULT_GRID_SIZE, 8);
//! ```

/// Grid size used for classic mode and daily challenges
pub const DEFAULT_GRID_SIZE: usize = 8;

/// Number of pieces offered to the player at once
pub const PIECES_PER_SET: usize = 3;

/// Placement score awarded per cell of the placed shape
pub const POINTS_PER_CELL: u32 = 10;

/// Chebyshev radius of fog revealed around every placed cell
pub const FOG_REVEAL_RADIUS: i32 = 2;

/// Combo streak at which the `superCombo` event replaces `combo`
pub const SUPER_COMBO_THRESHOLD: u32 = 4;

/// First combo streak that emits a combo event at all
pub const COMBO_EVENT_THRESHOLD: u32 = 2;

/// Frozen thaw countdown when an obstacle config omits it
pub const DEFAULT_FROZEN_TURNS: u8 = 3;

/// Chain hit points when an obstacle config omits them
pub const DEFAULT_CHAIN_HP: u8 = 2;

/// Attempts allowed when drawing random obstacle positions for a daily challenge
pub const DAILY_POSITION_ATTEMPTS: u32 = 200;

/// Level id used by synthesized daily challenges
pub const DAILY_LEVEL_ID: i32 = -1;

/// Booster counts handed to a new session, indexed by [`BoosterKind::index`]
pub const DEFAULT_BOOSTER_COUNTS: [u32; 5] = [3, 3, 3, 1, 1];

/// A row/column coordinate on the grid (or an anchor that may lie outside it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Translate by a relative offset
    pub const fn offset(self, by: Position) -> Self {
        Self {
            row: self.row + by.row,
            col: self.col + by.col,
        }
    }

    /// Chebyshev distance (max of row and column deltas)
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.row - other.row)
            .abs()
            .max((self.col - other.col).abs())
    }
}

/// The seven traditional wagara patterns a filled cell can carry
///
/// Patterns have no gameplay effect; they are collected and tracked per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternKind {
    Ichimatsu,
    Asanoha,
    Seigaiha,
    Shippou,
    Yagasuri,
    Kikkou,
    Uroko,
}

impl PatternKind {
    /// All patterns in catalog order
    pub const ALL: [PatternKind; 7] = [
        PatternKind::Ichimatsu,
        PatternKind::Asanoha,
        PatternKind::Seigaiha,
        PatternKind::Shippou,
        PatternKind::Yagasuri,
        PatternKind::Kikkou,
        PatternKind::Uroko,
    ];

    /// Parse pattern kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ichimatsu" => Some(PatternKind::Ichimatsu),
            "asanoha" => Some(PatternKind::Asanoha),
            "seigaiha" => Some(PatternKind::Seigaiha),
            "shippou" => Some(PatternKind::Shippou),
            "yagasuri" => Some(PatternKind::Yagasuri),
            "kikkou" => Some(PatternKind::Kikkou),
            "uroko" => Some(PatternKind::Uroko),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Ichimatsu => "ichimatsu",
            PatternKind::Asanoha => "asanoha",
            PatternKind::Seigaiha => "seigaiha",
            PatternKind::Shippou => "shippou",
            PatternKind::Yagasuri => "yagasuri",
            PatternKind::Kikkou => "kikkou",
            PatternKind::Uroko => "uroko",
        }
    }
}

/// The six obstacle varieties a level can place on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObstacleKind {
    Stone,
    Kintsugi,
    Frozen,
    Chain,
    Fog,
    /// Recognized but inert: occupies its cell and never changes.
    Rotate,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 6] = [
        ObstacleKind::Stone,
        ObstacleKind::Kintsugi,
        ObstacleKind::Frozen,
        ObstacleKind::Chain,
        ObstacleKind::Fog,
        ObstacleKind::Rotate,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stone" => Some(ObstacleKind::Stone),
            "kintsugi" => Some(ObstacleKind::Kintsugi),
            "frozen" => Some(ObstacleKind::Frozen),
            "chain" => Some(ObstacleKind::Chain),
            "fog" => Some(ObstacleKind::Fog),
            "rotate" => Some(ObstacleKind::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Stone => "stone",
            ObstacleKind::Kintsugi => "kintsugi",
            ObstacleKind::Frozen => "frozen",
            ObstacleKind::Chain => "chain",
            ObstacleKind::Fog => "fog",
            ObstacleKind::Rotate => "rotate",
        }
    }
}

/// The five booster power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoosterKind {
    StoneBreaker,
    Shuffle,
    Guide,
    Lightning,
    Wave,
}

impl BoosterKind {
    pub const ALL: [BoosterKind; 5] = [
        BoosterKind::StoneBreaker,
        BoosterKind::Shuffle,
        BoosterKind::Guide,
        BoosterKind::Lightning,
        BoosterKind::Wave,
    ];

    /// Stable index into per-booster tables
    pub fn index(&self) -> usize {
        match self {
            BoosterKind::StoneBreaker => 0,
            BoosterKind::Shuffle => 1,
            BoosterKind::Guide => 2,
            BoosterKind::Lightning => 3,
            BoosterKind::Wave => 4,
        }
    }

    /// Parse booster kind from its wire key (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stonebreaker" => Some(BoosterKind::StoneBreaker),
            "shuffle" => Some(BoosterKind::Shuffle),
            "guide" => Some(BoosterKind::Guide),
            "lightning" => Some(BoosterKind::Lightning),
            "wave" => Some(BoosterKind::Wave),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoosterKind::StoneBreaker => "stoneBreaker",
            BoosterKind::Shuffle => "shuffle",
            BoosterKind::Guide => "guide",
            BoosterKind::Lightning => "lightning",
            BoosterKind::Wave => "wave",
        }
    }
}

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Classic,
    Level,
    Daily,
}

impl GameMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "level" => Some(GameMode::Level),
            "daily" => Some(GameMode::Daily),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Level => "level",
            GameMode::Daily => "daily",
        }
    }
}

/// How a level decides it has been cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClearKind {
    Score,
    Lines,
    Moves,
}

impl ClearKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearKind::Score => "score",
            ClearKind::Lines => "lines",
            ClearKind::Moves => "moves",
        }
    }
}

/// Feedback event kinds consumed by audio, haptic and animation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    Pickup,
    Hover,
    Place,
    InvalidDrop,
    LineClear,
    Combo,
    SuperCombo,
    Chain,
    LevelClear,
    GameOver,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Pickup => "pickup",
            FeedbackKind::Hover => "hover",
            FeedbackKind::Place => "place",
            FeedbackKind::InvalidDrop => "invalidDrop",
            FeedbackKind::LineClear => "lineClear",
            FeedbackKind::Combo => "combo",
            FeedbackKind::SuperCombo => "superCombo",
            FeedbackKind::Chain => "chain",
            FeedbackKind::LevelClear => "levelClear",
            FeedbackKind::GameOver => "gameOver",
        }
    }

    /// Whether this event ends the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, FeedbackKind::LevelClear | FeedbackKind::GameOver)
    }
}

/// A single feedback event produced by the engine for one call
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEvent {
    pub kind: FeedbackKind,
    /// Haptic intensity multiplier (0..1)
    pub intensity: Option<f32>,
    pub combo_count: Option<u32>,
    pub cleared_rows: Vec<usize>,
    pub cleared_cols: Vec<usize>,
    /// Score delta attached to the event
    pub score: Option<u32>,
}

impl FeedbackEvent {
    pub fn new(kind: FeedbackKind) -> Self {
        Self {
            kind,
            intensity: None,
            combo_count: None,
            cleared_rows: Vec::new(),
            cleared_cols: Vec::new(),
            score: None,
        }
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn with_score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_combo(mut self, combo: u32) -> Self {
        self.combo_count = Some(combo);
        self
    }

    pub fn with_lines(mut self, rows: Vec<usize>, cols: Vec<usize>) -> Self {
        self.cleared_rows = rows;
        self.cleared_cols = cols;
        self
    }
}
