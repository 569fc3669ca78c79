//! Daily challenge tests - determinism, weekday profiles and streaks

use chrono::NaiveDate;
use wagara_blast::core::daily::{
    daily_streak, generate_daily_challenge, is_daily_completed, seed_for_date, MAX_STREAK_DAYS,
};
use wagara_blast::core::{EngineError, GameState, Grid};
use wagara_blast::types::{GameMode, ObstacleKind, DAILY_LEVEL_ID};

#[test]
fn test_challenge_is_a_pure_function_of_the_date() {
    for date in ["2024-06-01", "2024-06-02", "2025-01-15"] {
        assert_eq!(
            generate_daily_challenge(date).unwrap(),
            generate_daily_challenge(date).unwrap()
        );
    }
    assert_ne!(seed_for_date("2024-06-01"), seed_for_date("2024-06-02"));
}

#[test]
fn test_daily_sessions_replay_from_the_date_seed() {
    let date = "2024-09-10";
    let start = || {
        GameState::new_seeded(
            GameMode::Daily,
            Some(generate_daily_challenge(date).unwrap()),
            seed_for_date(date),
        )
    };
    let (a, b) = (start(), start());
    assert_eq!(a.snapshot().pieces, b.snapshot().pieces);
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.level().map(|l| l.id), Some(DAILY_LEVEL_ID));
}

#[test]
fn test_a_week_of_profiles() {
    // 2024-04-01 was a Monday
    let monday = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let expected: [&[ObstacleKind]; 7] = [
        &[],
        &[ObstacleKind::Stone],
        &[ObstacleKind::Kintsugi],
        &[ObstacleKind::Frozen],
        &[ObstacleKind::Chain],
        &[ObstacleKind::Fog, ObstacleKind::Stone],
        &[
            ObstacleKind::Stone,
            ObstacleKind::Kintsugi,
            ObstacleKind::Frozen,
            ObstacleKind::Chain,
        ],
    ];
    let mut day = monday;
    for kinds in expected {
        let date = day.format("%Y-%m-%d").to_string();
        let challenge = generate_daily_challenge(&date).unwrap();
        let got: Vec<ObstacleKind> = challenge.obstacles.iter().map(|o| o.kind).collect();
        assert_eq!(got, kinds, "{}", date);
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn test_kintsugi_day_marks_a_full_row() {
    // Wednesday
    let challenge = generate_daily_challenge("2024-04-03").unwrap();
    let row = challenge.obstacles[0].positions[0].row;
    assert!((2..=5).contains(&row));
    let grid = Grid::from_config(&challenge);
    assert!(grid.row(row as usize).iter().all(|c| c.kintsugi));
}

#[test]
fn test_frozen_and_chain_payloads() {
    // Thursday and Friday
    let thursday = generate_daily_challenge("2024-04-04").unwrap();
    let turns = thursday.obstacles[0].frozen_turns.unwrap();
    assert!((2..=4).contains(&turns));
    assert!((3..=6).contains(&thursday.obstacles[0].positions.len()));

    let friday = generate_daily_challenge("2024-04-05").unwrap();
    let hp = friday.obstacles[0].chain_hp.unwrap();
    assert!((2..=3).contains(&hp));
}

#[test]
fn test_every_day_of_a_year_is_playable() {
    let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for _ in 0..366 {
        let date = day.format("%Y-%m-%d").to_string();
        let challenge = generate_daily_challenge(&date).unwrap();
        let grid = Grid::from_config(&challenge);
        for r in 3..=4 {
            for c in 3..=4 {
                assert!(!grid.get(r, c).unwrap().is_obstacle(), "{}", date);
            }
        }
        let t = challenge.clear_condition.target;
        assert!((2500..=6000).contains(&t), "{}", date);
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn test_invalid_dates() {
    for bad in ["", "2024/01/01", "2023-02-29", "tomorrow"] {
        assert_eq!(
            generate_daily_challenge(bad),
            Err(EngineError::InvalidDate(bad.to_string()))
        );
    }
}

#[test]
fn test_streak_counts_back_from_today() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let completed: Vec<String> = ["2024-03-10", "2024-03-09", "2024-03-08", "2024-03-06"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(daily_streak(&completed, today), 3);
    assert!(is_daily_completed("2024-03-06", &completed));

    // Missing today breaks the streak
    let yesterday_only = vec!["2024-03-09".to_string()];
    assert_eq!(daily_streak(&yesterday_only, today), 0);
    assert_eq!(MAX_STREAK_DAYS, 365);
}
