//! Obstacles module - static obstacle metadata
//!
//! Reference data only. The live state of an obstacle (thaw countdown, chain
//! hit points) is stored on grid cells, see [`crate::grid::Cell`].
//!
//! | Kind | Destructible | Hits | Blocks placement |
//! |------|--------------|------|------------------|
//! | stone | no | 0 | yes |
//! | kintsugi | yes | 2 | yes |
//! | frozen | yes | 1 | no |
//! | chain | yes | 3 | no |
//! | fog | yes | 1 | no |
//! | rotate | no | 0 | yes |
//!
//! The table describes the catalog. Placement rules on the grid are decided
//! by cell state: kintsugi and fog live on empty cells and never block.

use crate::types::ObstacleKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleDefinition {
    pub kind: ObstacleKind,
    pub name: &'static str,
    pub destructible: bool,
    pub hits_required: u8,
    pub blocks_placement: bool,
}

pub const OBSTACLE_DEFINITIONS: [ObstacleDefinition; 6] = [
    ObstacleDefinition {
        kind: ObstacleKind::Stone,
        name: "Stone",
        destructible: false,
        hits_required: 0,
        blocks_placement: true,
    },
    ObstacleDefinition {
        kind: ObstacleKind::Kintsugi,
        name: "Kintsugi",
        destructible: true,
        hits_required: 2,
        blocks_placement: true,
    },
    ObstacleDefinition {
        kind: ObstacleKind::Frozen,
        name: "Frozen",
        destructible: true,
        hits_required: 1,
        blocks_placement: false,
    },
    ObstacleDefinition {
        kind: ObstacleKind::Chain,
        name: "Chain",
        destructible: true,
        hits_required: 3,
        blocks_placement: false,
    },
    ObstacleDefinition {
        kind: ObstacleKind::Fog,
        name: "Fog",
        destructible: true,
        hits_required: 1,
        blocks_placement: false,
    },
    ObstacleDefinition {
        kind: ObstacleKind::Rotate,
        name: "Rotate",
        destructible: false,
        hits_required: 0,
        blocks_placement: true,
    },
];

pub fn obstacle_definition(kind: ObstacleKind) -> &'static ObstacleDefinition {
    match kind {
        ObstacleKind::Stone => &OBSTACLE_DEFINITIONS[0],
        ObstacleKind::Kintsugi => &OBSTACLE_DEFINITIONS[1],
        ObstacleKind::Frozen => &OBSTACLE_DEFINITIONS[2],
        ObstacleKind::Chain => &OBSTACLE_DEFINITIONS[3],
        ObstacleKind::Fog => &OBSTACLE_DEFINITIONS[4],
        ObstacleKind::Rotate => &OBSTACLE_DEFINITIONS[5],
    }
}

pub fn is_destructible(kind: ObstacleKind) -> bool {
    obstacle_definition(kind).destructible
}

pub fn blocks_placement(kind: ObstacleKind) -> bool {
    obstacle_definition(kind).blocks_placement
}

pub fn hits_required(kind: ObstacleKind) -> u8 {
    obstacle_definition(kind).hits_required
}
