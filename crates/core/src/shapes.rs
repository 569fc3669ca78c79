//! Shapes module - the fixed library of 14 polyomino block shapes
//!
//! Every shape is a list of `(row, col)` offsets from an implicit top-left
//! anchor plus its bounding box. Offsets never go negative, so a shape
//! anchored at `(r, c)` covers `r..r+height` x `c..c+width`.

use crate::types::Position;

/// Immutable catalog entry for a placeable shape
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct BlockShape {
    pub id: &'static str,
    pub name: &'static str,
    pub cells: &'static [Position],
    /// Bounding-box width (columns)
    pub width: i32,
    /// Bounding-box height (rows)
    pub height: i32,
}

impl BlockShape {
    /// Number of cells in the shape
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Absolute positions covered when anchored at `anchor`
    pub fn cells_at(&self, anchor: Position) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().map(move |&offset| anchor.offset(offset))
    }
}

const fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

pub static SINGLE: BlockShape = BlockShape {
    id: "single",
    name: "Single",
    cells: &[p(0, 0)],
    width: 1,
    height: 1,
};

pub static DOMINO_H: BlockShape = BlockShape {
    id: "domino_h",
    name: "Domino (H)",
    cells: &[p(0, 0), p(0, 1)],
    width: 2,
    height: 1,
};

pub static DOMINO_V: BlockShape = BlockShape {
    id: "domino_v",
    name: "Domino (V)",
    cells: &[p(0, 0), p(1, 0)],
    width: 1,
    height: 2,
};

pub static TROMINO_H: BlockShape = BlockShape {
    id: "tromino_h",
    name: "Tromino (H)",
    cells: &[p(0, 0), p(0, 1), p(0, 2)],
    width: 3,
    height: 1,
};

pub static TROMINO_V: BlockShape = BlockShape {
    id: "tromino_v",
    name: "Tromino (V)",
    cells: &[p(0, 0), p(1, 0), p(2, 0)],
    width: 1,
    height: 3,
};

/// ```text
/// X .
/// X .
/// X X
/// ```
pub static L_SHAPE: BlockShape = BlockShape {
    id: "l_shape",
    name: "L-Shape",
    cells: &[p(0, 0), p(1, 0), p(2, 0), p(2, 1)],
    width: 2,
    height: 3,
};

/// ```text
/// . X
/// . X
/// X X
/// ```
pub static L_SHAPE_REV: BlockShape = BlockShape {
    id: "l_shape_rev",
    name: "L-Shape (Rev)",
    cells: &[p(0, 1), p(1, 1), p(2, 0), p(2, 1)],
    width: 2,
    height: 3,
};

/// ```text
/// X X X
/// . X .
/// ```
pub static T_SHAPE: BlockShape = BlockShape {
    id: "t_shape",
    name: "T-Shape",
    cells: &[p(0, 0), p(0, 1), p(0, 2), p(1, 1)],
    width: 3,
    height: 2,
};

pub static SQUARE_2X2: BlockShape = BlockShape {
    id: "square_2x2",
    name: "Square 2x2",
    cells: &[p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
    width: 2,
    height: 2,
};

/// ```text
/// X X .
/// . X X
/// ```
pub static Z_SHAPE: BlockShape = BlockShape {
    id: "z_shape",
    name: "Z-Shape",
    cells: &[p(0, 0), p(0, 1), p(1, 1), p(1, 2)],
    width: 3,
    height: 2,
};

/// ```text
/// . X X
/// X X .
/// ```
pub static Z_SHAPE_REV: BlockShape = BlockShape {
    id: "z_shape_rev",
    name: "Z-Shape (Rev)",
    cells: &[p(0, 1), p(0, 2), p(1, 0), p(1, 1)],
    width: 3,
    height: 2,
};

pub static SQUARE_3X3: BlockShape = BlockShape {
    id: "square_3x3",
    name: "Square 3x3",
    cells: &[
        p(0, 0),
        p(0, 1),
        p(0, 2),
        p(1, 0),
        p(1, 1),
        p(1, 2),
        p(2, 0),
        p(2, 1),
        p(2, 2),
    ],
    width: 3,
    height: 3,
};

pub static I_SHAPE_4: BlockShape = BlockShape {
    id: "i_shape_4",
    name: "I-Shape (4)",
    cells: &[p(0, 0), p(1, 0), p(2, 0), p(3, 0)],
    width: 1,
    height: 4,
};

pub static RECT_2X3: BlockShape = BlockShape {
    id: "rect_2x3",
    name: "Rectangle 2x3",
    cells: &[p(0, 0), p(0, 1), p(1, 0), p(1, 1), p(2, 0), p(2, 1)],
    width: 2,
    height: 3,
};

/// All 14 shapes in catalog order
pub static BLOCK_SHAPES: [&BlockShape; 14] = [
    &SINGLE,
    &DOMINO_H,
    &DOMINO_V,
    &TROMINO_H,
    &TROMINO_V,
    &L_SHAPE,
    &L_SHAPE_REV,
    &T_SHAPE,
    &SQUARE_2X2,
    &Z_SHAPE,
    &Z_SHAPE_REV,
    &SQUARE_3X3,
    &I_SHAPE_4,
    &RECT_2X3,
];

/// Look up a shape by its id
pub fn shape_by_id(id: &str) -> Option<&'static BlockShape> {
    BLOCK_SHAPES.iter().copied().find(|s| s.id == id)
}

/// Shapes with 1-2 cells
pub fn small_shapes() -> Vec<&'static BlockShape> {
    BLOCK_SHAPES
        .iter()
        .copied()
        .filter(|s| s.cell_count() <= 2)
        .collect()
}

/// Shapes with 5 or more cells
pub fn large_shapes() -> Vec<&'static BlockShape> {
    BLOCK_SHAPES
        .iter()
        .copied()
        .filter(|s| s.cell_count() >= 5)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_fourteen_unique_ids() {
        let ids: HashSet<_> = BLOCK_SHAPES.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn test_cells_fit_bounding_box() {
        for shape in BLOCK_SHAPES {
            let max_row = shape.cells.iter().map(|c| c.row).max().unwrap();
            let max_col = shape.cells.iter().map(|c| c.col).max().unwrap();
            assert_eq!(max_row + 1, shape.height, "{}", shape.id);
            assert_eq!(max_col + 1, shape.width, "{}", shape.id);
            assert!(shape.cells.iter().all(|c| c.row >= 0 && c.col >= 0));
        }
    }

    #[test]
    fn test_cell_counts_span_one_to_nine() {
        let min = BLOCK_SHAPES.iter().map(|s| s.cell_count()).min().unwrap();
        let max = BLOCK_SHAPES.iter().map(|s| s.cell_count()).max().unwrap();
        assert_eq!(min, 1);
        assert_eq!(max, 9);
    }

    #[test]
    fn test_lookup_and_size_classes() {
        assert_eq!(shape_by_id("t_shape"), Some(&T_SHAPE));
        assert!(shape_by_id("pentomino").is_none());
        assert_eq!(small_shapes().len(), 3);
        let large: Vec<_> = large_shapes().iter().map(|s| s.id).collect();
        assert_eq!(large, vec!["square_3x3", "rect_2x3"]);
    }

    #[test]
    fn test_cells_at_translates() {
        let cells: Vec<_> = DOMINO_V.cells_at(Position::new(2, 5)).collect();
        assert_eq!(cells, vec![Position::new(2, 5), Position::new(3, 5)]);
    }
}
