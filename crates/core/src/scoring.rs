//! Scoring module - placement, line clear, combo and kintsugi rules
//!
//! | Simultaneous lines | Base points |
//! |--------------------|-------------|
//! | 1 | 100 |
//! | 2 | 300 |
//! | L >= 3 | 200 * L |
//!
//! The combo multiplier is `1 + combo_index / 2`, where `combo_index` is the
//! clearing streak minus one (0 for the first clear in a streak). A cleared
//! kintsugi line doubles the combo-adjusted line score. Placement points
//! (10 per cell) are never multiplied.

use crate::types::POINTS_PER_CELL;

/// Score breakdown for one move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub placement_score: u32,
    /// Combo-adjusted and kintsugi-doubled line points
    pub line_clear_score: u32,
    pub kintsugi_applied: bool,
    pub total: u32,
}

/// Points for placing a shape of `cells` cells
pub fn calculate_placement_score(cells: usize) -> u32 {
    (cells as u32).saturating_mul(POINTS_PER_CELL)
}

fn base_line_score(lines: usize) -> u32 {
    match lines {
        0 => 0,
        1 => 100,
        2 => 300,
        n => 200 * n as u32,
    }
}

/// Combo index for a clearing streak: 0 for the first clear, then streak - 1
pub fn combo_index(combo: u32) -> u32 {
    combo.saturating_sub(1)
}

/// Line clear points for `lines` simultaneous lines at `combo_index`
///
/// Equal to `floor(base * (1 + combo_index * 0.5))`, computed in integers.
pub fn calculate_line_clear_score(lines: usize, combo_index: u32) -> u32 {
    let base = base_line_score(lines);
    base.saturating_mul(2 + combo_index) / 2
}

/// Kintsugi doubles the line score
pub fn kintsugi_bonus(line_score: u32) -> u32 {
    line_score.saturating_mul(2)
}

/// Full breakdown for one move
pub fn calculate_move_score(cells: usize, lines: usize, combo_index: u32, kintsugi: bool) -> ScoreResult {
    let placement_score = calculate_placement_score(cells);
    let mut line_clear_score = calculate_line_clear_score(lines, combo_index);
    let kintsugi_applied = kintsugi && lines > 0;
    if kintsugi_applied {
        line_clear_score = kintsugi_bonus(line_clear_score);
    }
    ScoreResult {
        placement_score,
        line_clear_score,
        kintsugi_applied,
        total: placement_score + line_clear_score,
    }
}

/// Total points for one move
pub fn total_move_score(cells: usize, lines: usize, combo_index: u32, kintsugi: bool) -> u32 {
    calculate_move_score(cells, lines, combo_index, kintsugi).total
}

/// Stars earned for `score` (0-3), checking the three-star threshold first
pub fn calculate_stars(score: u32, thresholds: [u32; 3]) -> u8 {
    let [one, two, three] = thresholds;
    if score >= three {
        3
    } else if score >= two {
        2
    } else if score >= one {
        1
    } else {
        0
    }
}
