//! Wagara Blast (workspace facade crate).
//!
//! Exposes `wagara_blast::{types, core, adapter}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use wagara_blast_adapter as adapter;
pub use wagara_blast_core as core;
pub use wagara_blast_types as types;
