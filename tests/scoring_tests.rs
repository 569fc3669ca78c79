//! Scoring tests - base table, combo scaling, kintsugi and stars

use wagara_blast::core::scoring::{
    calculate_line_clear_score, calculate_move_score, calculate_placement_score, calculate_stars,
    combo_index, kintsugi_bonus, total_move_score,
};

#[test]
fn test_combo_scaling_floors() {
    // 100 * 1.5 and 300 * 2.0
    assert_eq!(calculate_line_clear_score(1, 1), 150);
    assert_eq!(calculate_line_clear_score(2, 2), 600);
    // 100 * 2.5
    assert_eq!(calculate_line_clear_score(1, 3), 250);
}

#[test]
fn test_strictly_increasing_in_combo() {
    for lines in 1..=6 {
        for combo in 0..20 {
            assert!(
                calculate_line_clear_score(lines, combo + 1) > calculate_line_clear_score(lines, combo),
                "lines {} combo {}",
                lines,
                combo
            );
        }
    }
}

#[test]
fn test_more_lines_never_score_less() {
    for combo in 0..20 {
        assert!(calculate_line_clear_score(3, combo) >= calculate_line_clear_score(2, combo));
        assert!(calculate_line_clear_score(2, combo) >= calculate_line_clear_score(1, combo));
    }
}

#[test]
fn test_combo_index() {
    assert_eq!(combo_index(0), 0);
    assert_eq!(combo_index(1), 0);
    assert_eq!(combo_index(2), 1);
    assert_eq!(combo_index(5), 4);
}

#[test]
fn test_single_column_bar_scores_forty() {
    let r = calculate_move_score(4, 0, 0, false);
    assert_eq!(r.placement_score, 40);
    assert_eq!(r.line_clear_score, 0);
    assert_eq!(r.total, 40);
}

#[test]
fn test_first_clear_scores_one_ten() {
    let r = calculate_move_score(1, 1, combo_index(1), false);
    assert_eq!(r.placement_score, 10);
    assert_eq!(r.line_clear_score, 100);
    assert!(!r.kintsugi_applied);
    assert_eq!(r.total, 110);
}

#[test]
fn test_kintsugi_clear_scores_two_ten() {
    let r = calculate_move_score(1, 1, combo_index(1), true);
    assert_eq!(r.line_clear_score, 200);
    assert!(r.kintsugi_applied);
    assert_eq!(r.total, 210);
    assert_eq!(total_move_score(1, 1, 0, true), 210);
}

#[test]
fn test_placement_never_scaled() {
    let plain = calculate_move_score(6, 2, 3, false);
    let gilded = calculate_move_score(6, 2, 3, true);
    assert_eq!(plain.placement_score, calculate_placement_score(6));
    assert_eq!(gilded.placement_score, calculate_placement_score(6));
    assert_eq!(gilded.line_clear_score, kintsugi_bonus(plain.line_clear_score));
    // No lines, no bonus even with kintsugi
    assert_eq!(calculate_move_score(3, 0, 0, true).total, 30);
}

#[test]
fn test_stars() {
    let t = [500, 800, 1200];
    assert_eq!(calculate_stars(0, t), 0);
    assert_eq!(calculate_stars(499, t), 0);
    assert_eq!(calculate_stars(500, t), 1);
    assert_eq!(calculate_stars(800, t), 2);
    assert_eq!(calculate_stars(5000, t), 3);
    // Unordered thresholds are checked from three stars down
    assert_eq!(calculate_stars(60, [100, 50, 500]), 2);
}
