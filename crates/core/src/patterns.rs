//! Patterns module - wagara pattern catalog and weighted selection
//!
//! Each filled cell carries one of seven patterns. Patterns are drawn with
//! frequency weighting: a flat pool holds every pattern `frequency` times and
//! a uniform draw from it yields the weighted distribution.
//!
//! | Pattern | Name | Frequency |
//! |---------|------|-----------|
//! | ichimatsu | Ichimatsu | 5 |
//! | asanoha | Asanoha | 4 |
//! | seigaiha | Seigaiha | 4 |
//! | shippou | Shippou | 3 |
//! | yagasuri | Yagasuri | 3 |
//! | kikkou | Kikkou | 2 |
//! | uroko | Uroko | 2 |

use crate::rng::RandomSource;
use crate::types::PatternKind;

/// Static metadata for a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternDefinition {
    pub kind: PatternKind,
    pub name: &'static str,
    /// Relative draw weight
    pub frequency: u32,
}

/// All patterns in catalog order
pub const PATTERN_DEFINITIONS: [PatternDefinition; 7] = [
    PatternDefinition {
        kind: PatternKind::Ichimatsu,
        name: "Ichimatsu",
        frequency: 5,
    },
    PatternDefinition {
        kind: PatternKind::Asanoha,
        name: "Asanoha",
        frequency: 4,
    },
    PatternDefinition {
        kind: PatternKind::Seigaiha,
        name: "Seigaiha",
        frequency: 4,
    },
    PatternDefinition {
        kind: PatternKind::Shippou,
        name: "Shippou",
        frequency: 3,
    },
    PatternDefinition {
        kind: PatternKind::Yagasuri,
        name: "Yagasuri",
        frequency: 3,
    },
    PatternDefinition {
        kind: PatternKind::Kikkou,
        name: "Kikkou",
        frequency: 2,
    },
    PatternDefinition {
        kind: PatternKind::Uroko,
        name: "Uroko",
        frequency: 2,
    },
];

/// Size of the weighted pool (sum of all frequencies)
pub const WEIGHTED_POOL_SIZE: usize = 23;

/// Lookup a pattern's definition
pub fn pattern_definition(kind: PatternKind) -> &'static PatternDefinition {
    // PATTERN_DEFINITIONS is indexed in the same order as PatternKind::ALL
    let idx = PatternKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or_default();
    &PATTERN_DEFINITIONS[idx]
}

/// Flat weighted pool, each pattern repeated `frequency` times in catalog order
pub fn weighted_pool() -> [PatternKind; WEIGHTED_POOL_SIZE] {
    let mut pool = [PatternKind::Ichimatsu; WEIGHTED_POOL_SIZE];
    let mut i = 0;
    for def in &PATTERN_DEFINITIONS {
        for _ in 0..def.frequency {
            pool[i] = def.kind;
            i += 1;
        }
    }
    pool
}

/// Draw one pattern from the weighted pool
pub fn random_pattern(rng: &mut impl RandomSource) -> PatternKind {
    let pool = weighted_pool();
    rng.pick(&pool).copied().unwrap_or(PatternKind::Ichimatsu)
}
