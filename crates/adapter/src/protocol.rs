//! Protocol module - JSON message types for the adapter
//!
//! Line-delimited JSON: one object per line, tagged by `type`. Every request
//! may carry a `seq`, which the response echoes back (0 when absent).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use wagara_blast_core::snapshot::{CellSnapshot, GameSnapshot, PieceSnapshot};
use wagara_blast_core::{GuideSuggestion, PiecePlacements};
use wagara_blast_types::{BoosterKind, FeedbackEvent, GameMode, Position};

pub const PROTOCOL_VERSION: &str = "1.0.0";
pub const GAME_ID: &str = "wagara-blast";

// ============== Client -> Engine Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    Classic,
    Level,
    Daily,
}

impl From<ModeName> for GameMode {
    fn from(value: ModeName) -> Self {
        match value {
            ModeName::Classic => GameMode::Classic,
            ModeName::Level => GameMode::Level,
            ModeName::Daily => GameMode::Daily,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoosterName {
    StoneBreaker,
    Shuffle,
    Guide,
    Lightning,
    Wave,
}

impl From<BoosterName> for BoosterKind {
    fn from(value: BoosterName) -> Self {
        match value {
            BoosterName::StoneBreaker => BoosterKind::StoneBreaker,
            BoosterName::Shuffle => BoosterKind::Shuffle,
            BoosterName::Guide => BoosterKind::Guide,
            BoosterName::Lightning => BoosterKind::Lightning,
            BoosterName::Wave => BoosterKind::Wave,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelloRequest {
    #[serde(default)]
    pub seq: u64,
    #[serde(default)]
    pub client: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewGameRequest {
    #[serde(default)]
    pub seq: u64,
    pub mode: ModeName,
    /// Level id, required in level mode
    #[serde(default)]
    pub level: Option<i32>,
    /// `YYYY-MM-DD`, daily mode defaults to today
    #[serde(default)]
    pub date: Option<String>,
    /// Makes the piece stream replayable
    #[serde(default)]
    pub seed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaceRequest {
    #[serde(default)]
    pub seq: u64,
    pub piece: usize,
    pub row: i32,
    pub col: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoosterRequest {
    #[serde(default)]
    pub seq: u64,
    pub booster: BoosterName,
    #[serde(default)]
    pub row: Option<i32>,
    #[serde(default)]
    pub col: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub seq: u64,
}

/// Parsed inbound request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Hello(HelloRequest),
    NewGame(NewGameRequest),
    Place(PlaceRequest),
    Booster(BoosterRequest),
    Placements(QueryRequest),
    Observe(QueryRequest),
}

impl Request {
    pub fn seq(&self) -> u64 {
        match self {
            Request::Hello(r) => r.seq,
            Request::NewGame(r) => r.seq,
            Request::Place(r) => r.seq,
            Request::Booster(r) => r.seq,
            Request::Placements(r) | Request::Observe(r) => r.seq,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Request::Hello(_) => "hello",
            Request::NewGame(_) => "new_game",
            Request::Place(_) => "place",
            Request::Booster(_) => "booster",
            Request::Placements(_) => "placements",
            Request::Observe(_) => "observe",
        }
    }
}

/// Parse one request line
pub fn parse_request(json: &str) -> Result<Request, serde_json::Error> {
    serde_json::from_str(json)
}

/// Recover `seq` from a line that failed to parse as a request
pub fn seq_best_effort(json: &str) -> u64 {
    #[derive(Deserialize)]
    struct SeqOnly {
        seq: Option<u64>,
    }
    serde_json::from_str::<SeqOnly>(json)
        .ok()
        .and_then(|s| s.seq)
        .unwrap_or(0)
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Line is not a valid request
    ParseError,
    /// Line exceeded the configured maximum length
    LineTooLong,
    HandshakeRequired,
    /// Gameplay request before any `new_game`
    NoGame,
    UnknownLevel,
    InvalidDate,
    InvalidRequest,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "parse_error",
            ErrorCode::LineTooLong => "line_too_long",
            ErrorCode::HandshakeRequired => "handshake_required",
            ErrorCode::NoGame => "no_game",
            ErrorCode::UnknownLevel => "unknown_level",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidRequest => "invalid_request",
        }
    }
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WelcomeMessage {
    pub seq: u64,
    pub protocol_version: &'static str,
    pub game_id: &'static str,
    pub client_id: u64,
    pub grid_size: usize,
    pub max_level: i32,
    pub boosters: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub code: u8,
    #[serde(skip_serializing_if = "is_zero")]
    pub counter: u8,
    #[serde(skip_serializing_if = "is_false")]
    pub fog: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub kintsugi: bool,
}

fn is_zero(v: &u8) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl From<&CellSnapshot> for CellView {
    fn from(cell: &CellSnapshot) -> Self {
        Self {
            code: cell.code,
            counter: cell.counter,
            fog: cell.fog,
            kintsugi: cell.kintsugi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub id: String,
    pub shape: &'static str,
    pub pattern: &'static str,
    /// `[row, col]` offsets from the anchor
    pub cells: Vec<[i32; 2]>,
    pub width: i32,
    pub height: i32,
}

impl From<&PieceSnapshot> for PieceView {
    fn from(piece: &PieceSnapshot) -> Self {
        Self {
            id: piece.id.clone(),
            shape: piece.shape,
            pattern: piece.pattern.as_str(),
            cells: piece.cells.iter().map(|p| [p.row, p.col]).collect(),
            width: piece.width,
            height: piece.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateView {
    pub grid_size: usize,
    pub grid: Vec<Vec<CellView>>,
    pub pieces: Vec<Option<PieceView>>,
    pub mode: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_moves: Option<u32>,
    pub score: u32,
    pub combo: u32,
    pub best_combo: u32,
    pub moves: u32,
    pub lines_cleared: u32,
    pub stars: u8,
    pub boosters: BTreeMap<&'static str, u32>,
    pub discovered: Vec<&'static str>,
    pub fill_ratio: f64,
}

impl From<&GameSnapshot> for StateView {
    fn from(snap: &GameSnapshot) -> Self {
        Self {
            grid_size: snap.grid_size,
            grid: snap
                .grid
                .iter()
                .map(|row| row.iter().map(CellView::from).collect())
                .collect(),
            pieces: snap
                .pieces
                .iter()
                .map(|slot| slot.as_ref().map(PieceView::from))
                .collect(),
            mode: snap.mode.as_str(),
            status: snap.status.as_str(),
            level: snap.level_id,
            target: snap.target,
            max_moves: snap.max_moves,
            score: snap.score,
            combo: snap.combo,
            best_combo: snap.best_combo,
            moves: snap.moves,
            lines_cleared: snap.lines_cleared,
            stars: snap.stars,
            boosters: BoosterKind::ALL
                .iter()
                .map(|b| (b.as_str(), snap.boosters[b.index()]))
                .collect(),
            discovered: snap.discovered.iter().map(|p| p.as_str()).collect(),
            fill_ratio: snap.fill_ratio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventView {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cols: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl From<&FeedbackEvent> for EventView {
    fn from(event: &FeedbackEvent) -> Self {
        Self {
            kind: event.kind.as_str(),
            intensity: event.intensity,
            combo: event.combo_count,
            rows: event.cleared_rows.clone(),
            cols: event.cleared_cols.clone(),
            score: event.score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SuggestionView {
    pub piece: usize,
    pub row: i32,
    pub col: i32,
    pub lines: usize,
}

impl From<&GuideSuggestion> for SuggestionView {
    fn from(s: &GuideSuggestion) -> Self {
        Self {
            piece: s.piece_index,
            row: s.position.row,
            col: s.position.col,
            lines: s.lines,
        }
    }
}

/// Observation message (state after a request, plus the events it produced)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationMessage {
    pub seq: u64,
    pub state: StateView,
    pub events: Vec<EventView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<SuggestionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementView {
    pub piece: usize,
    pub anchors: Vec<[i32; 2]>,
}

impl From<&PiecePlacements> for PlacementView {
    fn from(p: &PiecePlacements) -> Self {
        Self {
            piece: p.piece_index,
            anchors: p.anchors.iter().map(|a: &Position| [a.row, a.col]).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementsMessage {
    pub seq: u64,
    pub placements: Vec<PlacementView>,
}

/// Error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Outbound message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Welcome(WelcomeMessage),
    Observation(ObservationMessage),
    Placements(PlacementsMessage),
    Error(ErrorMessage),
}

impl Response {
    pub fn seq(&self) -> u64 {
        match self {
            Response::Welcome(m) => m.seq,
            Response::Observation(m) => m.seq,
            Response::Placements(m) => m.seq,
            Response::Error(m) => m.seq,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}

// ============== Utility Functions ==============

/// Create a welcome message
pub fn create_welcome(seq: u64, client_id: u64) -> WelcomeMessage {
    WelcomeMessage {
        seq,
        protocol_version: PROTOCOL_VERSION,
        game_id: GAME_ID,
        client_id,
        grid_size: wagara_blast_types::DEFAULT_GRID_SIZE,
        max_level: wagara_blast_core::max_level_id(),
        boosters: BoosterKind::ALL.iter().map(|b| b.as_str()).collect(),
    }
}

/// Create an error response
pub fn create_error(seq: u64, code: ErrorCode, message: impl Into<String>) -> Response {
    Response::Error(ErrorMessage {
        seq,
        code,
        message: message.into(),
    })
}
