//! Levels module - level configuration and the static level table
//!
//! Levels 1-15 are fixed data on an 8x8 grid, each cleared by reaching its
//! score target. Obstacles are introduced progressively:
//!
//! | Levels | New obstacle |
//! |--------|--------------|
//! | 1-3 | none |
//! | 4-5 | stone |
//! | 6-7 | kintsugi |
//! | 8-9 | frozen |
//! | 10-11 | chain |
//! | 12-13 | fog |
//! | 14-15 | everything, level 15 capped at 30 moves |
//!
//! [`load_level`] hands out a copy, so callers can never corrupt the table.

use std::sync::OnceLock;

use log::debug;

use crate::error::EngineError;
use crate::grid::Grid;
use crate::types::{ClearKind, ObstacleKind, PatternKind, Position, DEFAULT_GRID_SIZE};

/// Highest published level id
pub const MAX_LEVEL_ID: i32 = 15;

/// One obstacle entry of a level: a kind stamped on a set of positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleConfig {
    pub kind: ObstacleKind,
    pub positions: Vec<Position>,
    /// Thaw countdown for frozen cells
    pub frozen_turns: Option<u8>,
    /// Hit points for chain cells
    pub chain_hp: Option<u8>,
}

impl ObstacleConfig {
    pub fn new(kind: ObstacleKind, positions: Vec<Position>) -> Self {
        Self {
            kind,
            positions,
            frozen_turns: None,
            chain_hp: None,
        }
    }

    pub fn with_frozen_turns(mut self, turns: u8) -> Self {
        self.frozen_turns = Some(turns);
        self
    }

    pub fn with_chain_hp(mut self, hp: u8) -> Self {
        self.chain_hp = Some(hp);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearCondition {
    pub kind: ClearKind,
    pub target: u32,
}

/// Everything needed to start a level or daily challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    pub id: i32,
    pub grid_size: usize,
    pub clear_condition: ClearCondition,
    pub obstacles: Vec<ObstacleConfig>,
    /// Ascending score thresholds for one, two and three stars
    pub star_thresholds: [u32; 3],
    pub max_moves: Option<u32>,
    /// Pre-baked starting grid, used as is in place of `obstacles`
    pub grid: Option<Grid>,
    pub description: String,
    pub introduces_pattern: Option<PatternKind>,
    pub introduces_obstacle: Option<ObstacleKind>,
}

impl LevelConfig {
    /// A score-cleared level on the default grid, target equal to the one-star threshold
    pub fn score_level(id: i32, star_thresholds: [u32; 3], description: impl Into<String>) -> Self {
        Self {
            id,
            grid_size: DEFAULT_GRID_SIZE,
            clear_condition: ClearCondition {
                kind: ClearKind::Score,
                target: star_thresholds[0],
            },
            obstacles: Vec::new(),
            star_thresholds,
            max_moves: None,
            grid: None,
            description: description.into(),
            introduces_pattern: None,
            introduces_obstacle: None,
        }
    }

    pub fn with_obstacle(mut self, obstacle: ObstacleConfig) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn with_max_moves(mut self, moves: u32) -> Self {
        self.max_moves = Some(moves);
        self
    }

    pub fn introducing(mut self, pattern: Option<PatternKind>, obstacle: Option<ObstacleKind>) -> Self {
        self.introduces_pattern = pattern;
        self.introduces_obstacle = obstacle;
        self
    }
}

fn at(cells: &[(i32, i32)]) -> Vec<Position> {
    cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
}

fn full_row(row: i32) -> Vec<Position> {
    (0..DEFAULT_GRID_SIZE as i32)
        .map(|c| Position::new(row, c))
        .collect()
}

fn corners() -> Vec<Position> {
    at(&[(0, 0), (0, 7), (7, 0), (7, 7)])
}

fn stone(positions: Vec<Position>) -> ObstacleConfig {
    ObstacleConfig::new(ObstacleKind::Stone, positions)
}

fn kintsugi_row(row: i32) -> ObstacleConfig {
    ObstacleConfig::new(ObstacleKind::Kintsugi, full_row(row))
}

fn frozen(positions: Vec<Position>, turns: u8) -> ObstacleConfig {
    ObstacleConfig::new(ObstacleKind::Frozen, positions).with_frozen_turns(turns)
}

fn chain(positions: Vec<Position>, hp: u8) -> ObstacleConfig {
    ObstacleConfig::new(ObstacleKind::Chain, positions).with_chain_hp(hp)
}

fn fog(positions: Vec<Position>) -> ObstacleConfig {
    ObstacleConfig::new(ObstacleKind::Fog, positions)
}

fn build_levels() -> Vec<LevelConfig> {
    use ObstacleKind as O;
    use PatternKind as P;

    let fog_block: Vec<Position> = (2..=5)
        .flat_map(|r| (2..=5).map(move |c| Position::new(r, c)))
        .collect();

    vec![
        LevelConfig::score_level(
            1,
            [500, 800, 1200],
            "Welcome to Wagara Blast! Clear lines by filling rows or columns.",
        )
        .introducing(Some(P::Ichimatsu), None),
        LevelConfig::score_level(2, [800, 1200, 1800], "Keep placing pieces to build combos!")
            .introducing(Some(P::Asanoha), None),
        LevelConfig::score_level(
            3,
            [1200, 1800, 2500],
            "Try clearing multiple lines at once for bonus points!",
        )
        .introducing(Some(P::Seigaiha), None),
        LevelConfig::score_level(
            4,
            [1500, 2200, 3000],
            "Stone blocks cannot be moved or placed on. Work around them!",
        )
        .with_obstacle(stone(at(&[(3, 3), (3, 4), (4, 3), (4, 4)])))
        .introducing(Some(P::Shippou), Some(O::Stone)),
        LevelConfig::score_level(
            5,
            [2000, 3000, 4000],
            "More stones! Plan your placements carefully.",
        )
        .with_obstacle(stone(at(&[
            (0, 0),
            (0, 7),
            (7, 0),
            (7, 7),
            (3, 3),
            (4, 4),
        ]))),
        LevelConfig::score_level(
            6,
            [2500, 3500, 5000],
            "Kintsugi lines glow with gold. Clear them for double score!",
        )
        .with_obstacle(kintsugi_row(3))
        .introducing(Some(P::Yagasuri), Some(O::Kintsugi)),
        LevelConfig::score_level(
            7,
            [3000, 4500, 6000],
            "Two kintsugi lines and stones. Aim for the gold!",
        )
        .with_obstacle(kintsugi_row(2))
        .with_obstacle(kintsugi_row(5))
        .with_obstacle(stone(at(&[(0, 0), (7, 7)]))),
        LevelConfig::score_level(
            8,
            [3500, 5000, 7000],
            "Frozen cells thaw after a few turns. Be patient!",
        )
        .with_obstacle(frozen(at(&[(1, 1), (1, 6), (6, 1), (6, 6)]), 3))
        .introducing(Some(P::Kikkou), Some(O::Frozen)),
        LevelConfig::score_level(
            9,
            [4000, 6000, 8000],
            "Frozen and stone mixed. Timing is everything!",
        )
        .with_obstacle(frozen(
            at(&[(2, 2), (2, 5), (5, 2), (5, 5), (3, 3), (4, 4)]),
            4,
        ))
        .with_obstacle(stone(at(&[(0, 3), (0, 4)]))),
        LevelConfig::score_level(
            10,
            [5000, 7500, 10000],
            "Chain cells break when adjacent lines are cleared. Hit them twice!",
        )
        .with_obstacle(chain(
            at(&[(3, 0), (3, 1), (3, 2), (4, 5), (4, 6), (4, 7)]),
            2,
        ))
        .introducing(Some(P::Uroko), Some(O::Chain)),
        LevelConfig::score_level(
            11,
            [5500, 8000, 11000],
            "Stronger chains! Clear adjacent lines to weaken them.",
        )
        .with_obstacle(chain(
            at(&[
                (2, 2),
                (2, 3),
                (2, 4),
                (2, 5),
                (5, 2),
                (5, 3),
                (5, 4),
                (5, 5),
            ]),
            3,
        ))
        .with_obstacle(stone(at(&[(4, 0), (4, 7)]))),
        LevelConfig::score_level(
            12,
            [6000, 9000, 12000],
            "Fog hides the grid! Place pieces nearby to reveal hidden cells.",
        )
        .with_obstacle(fog(fog_block))
        .introducing(None, Some(O::Fog)),
        LevelConfig::score_level(
            13,
            [7000, 10000, 14000],
            "Fog and ice! Clear the mist and wait for the thaw.",
        )
        .with_obstacle(fog(at(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (5, 5),
            (5, 6),
            (5, 7),
            (6, 5),
            (6, 6),
            (6, 7),
            (7, 5),
            (7, 6),
            (7, 7),
        ])))
        .with_obstacle(frozen(at(&[(3, 3), (3, 4), (4, 3), (4, 4)]), 3)),
        LevelConfig::score_level(
            14,
            [8000, 12000, 16000],
            "The gauntlet begins! Multiple obstacle types in one level.",
        )
        .with_obstacle(stone(corners()))
        .with_obstacle(kintsugi_row(4))
        .with_obstacle(chain(at(&[(2, 3), (2, 4), (5, 3), (5, 4)]), 2))
        .with_obstacle(frozen(at(&[(6, 3), (6, 4)]), 3)),
        LevelConfig::score_level(
            15,
            [10000, 15000, 20000],
            "The ultimate challenge! All obstacles, limited moves. Master the wagara!",
        )
        .with_max_moves(30)
        .with_obstacle(stone(corners()))
        .with_obstacle(kintsugi_row(3))
        .with_obstacle(chain(at(&[(1, 3), (1, 4), (6, 3), (6, 4)]), 3))
        .with_obstacle(frozen(at(&[(5, 1), (5, 6)]), 4))
        .with_obstacle(fog(at(&[
            (1, 0),
            (1, 1),
            (1, 6),
            (1, 7),
            (6, 0),
            (6, 1),
            (6, 6),
            (6, 7),
        ]))),
    ]
}

fn table() -> &'static [LevelConfig] {
    static LEVELS: OnceLock<Vec<LevelConfig>> = OnceLock::new();
    LEVELS.get_or_init(build_levels)
}

/// Load a copy of a static level
pub fn load_level(id: i32) -> Result<LevelConfig, EngineError> {
    let level = table()
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .ok_or(EngineError::LevelNotFound {
            id,
            max: MAX_LEVEL_ID,
        })?;
    debug!("loaded level {} ({} obstacle groups)", id, level.obstacles.len());
    Ok(level)
}

/// Copies of every static level in id order
pub fn all_levels() -> Vec<LevelConfig> {
    table().to_vec()
}

pub fn max_level_id() -> i32 {
    MAX_LEVEL_ID
}
