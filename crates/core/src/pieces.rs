//! Pieces module - piece instances and the piece generator
//!
//! A [`BlockPiece`] binds a catalog shape to a pattern and an id. Pieces are
//! produced three at a time into the tray and discarded once placed.
//!
//! Two draw modes:
//! - **Unseeded**: OS entropy, ids `piece_{n}` from the generator's own counter
//! - **Seeded**: [`SeededRandom`], ids `piece_seeded_{i}_{shape}_{pattern}` so a
//!   seed always reproduces the same set
//!
//! Every piece draws its shape uniformly, then its pattern from the weighted pool.

use crate::patterns::random_pattern;
use crate::rng::{EntropyRandom, RandomSource, SeededRandom};
use crate::shapes::{BlockShape, BLOCK_SHAPES, SINGLE};
use crate::types::{PatternKind, PIECES_PER_SET};

/// A shape bound to a pattern, ready to be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPiece {
    pub shape: &'static BlockShape,
    pub pattern: PatternKind,
    pub id: String,
}

impl BlockPiece {
    pub fn new(shape: &'static BlockShape, pattern: PatternKind, id: impl Into<String>) -> Self {
        Self {
            shape,
            pattern,
            id: id.into(),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.shape.cell_count()
    }
}

/// The tray of pieces on offer; a slot is `None` once its piece is placed
pub type PieceTray = [Option<BlockPiece>; PIECES_PER_SET];

/// Draw one shape and one pattern, in that order
fn draw(rng: &mut impl RandomSource) -> (&'static BlockShape, PatternKind) {
    let shape = rng.pick(&BLOCK_SHAPES).copied().unwrap_or(&SINGLE);
    let pattern = random_pattern(rng);
    (shape, pattern)
}

fn seeded_id(index: u64, shape: &BlockShape, pattern: PatternKind) -> String {
    format!("piece_seeded_{}_{}_{}", index, shape.id, pattern.as_str())
}

/// Generate `count` pieces from an injected source with deterministic ids
///
/// Two fresh sources sharing a seed produce identical lists.
pub fn generate_pieces(count: usize, rng: &mut impl RandomSource) -> Vec<BlockPiece> {
    (0..count)
        .map(|i| {
            let (shape, pattern) = draw(rng);
            BlockPiece::new(shape, pattern, seeded_id(i as u64, shape, pattern))
        })
        .collect()
}

/// Fill a tray from a list of pieces, padding with empty slots
pub fn into_tray(pieces: Vec<BlockPiece>) -> PieceTray {
    let mut tray: PieceTray = Default::default();
    for (slot, piece) in tray.iter_mut().zip(pieces) {
        *slot = Some(piece);
    }
    tray
}

#[derive(Debug, Clone)]
enum Source {
    Entropy(EntropyRandom),
    Seeded(SeededRandom),
}

/// Stateful piece generator owned by a game session
///
/// Holds its random source and id counter, so sessions never share hidden
/// global state. Cloning a generator forks its sequence.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    source: Source,
    issued: u64,
}

impl PieceGenerator {
    /// Entropy-backed generator
    pub fn new() -> Self {
        Self {
            source: Source::Entropy(EntropyRandom::new()),
            issued: 0,
        }
    }

    /// Deterministic generator
    pub fn seeded(seed: u32) -> Self {
        Self {
            source: Source::Seeded(SeededRandom::new(seed)),
            issued: 0,
        }
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self.source, Source::Seeded(_))
    }

    /// Number of pieces issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Restart the id counter (ids only; the random sequence continues)
    pub fn reset_ids(&mut self) {
        self.issued = 0;
    }

    /// Generate `count` pieces
    pub fn generate(&mut self, count: usize) -> Vec<BlockPiece> {
        let mut pieces = Vec::with_capacity(count);
        for _ in 0..count {
            let n = self.issued;
            self.issued += 1;
            let piece = match &mut self.source {
                Source::Entropy(rng) => {
                    let (shape, pattern) = draw(rng);
                    BlockPiece::new(shape, pattern, format!("piece_{}", n))
                }
                Source::Seeded(rng) => {
                    let (shape, pattern) = draw(rng);
                    BlockPiece::new(shape, pattern, seeded_id(n, shape, pattern))
                }
            };
            pieces.push(piece);
        }
        pieces
    }

    /// Generate a full tray
    pub fn generate_tray(&mut self) -> PieceTray {
        into_tray(self.generate(PIECES_PER_SET))
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
