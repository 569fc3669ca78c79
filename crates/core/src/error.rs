//! Engine errors
//!
//! Only caller-side invariant violations surface as errors. Invalid gameplay
//! actions are reported through feedback events instead.

use thiserror::Error;

use crate::types::BoosterKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("level {id} not found, valid range: 1-{max}")]
    LevelNotFound { id: i32, max: i32 },

    #[error("cannot consume booster \"{}\": none remaining in inventory", .0.as_str())]
    BoosterDepleted(BoosterKind),

    #[error("invalid calendar date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}
