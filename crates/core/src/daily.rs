//! Daily challenge module - deterministic per-date level synthesis
//!
//! The date string is hashed into a seed ([`date_seed`]) and every random
//! choice is drawn from a [`SeededRandom`], so the same date yields the same
//! challenge on every device. The obstacle profile follows the weekday:
//!
//! | Day | Obstacles | Difficulty rank |
//! |-----|-----------|-----------------|
//! | Mon | none | 1 |
//! | Tue | 2-5 stones | 2 |
//! | Wed | one kintsugi row (row 2-5) | 3 |
//! | Thu | 3-6 frozen, 2-4 turns | 4 |
//! | Fri | 3-6 chains, 2-3 hp | 5 |
//! | Sat | 8-14 fog, 1-3 stones | 6 |
//! | Sun | stones, kintsugi row, frozen, chains | 7 |
//!
//! Target score is `2000 + rank * 500 + rand(0..=500)`, drawn after the
//! obstacles. Star thresholds are the target, x1.5 and x2.2 (floored).

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::error::EngineError;
use crate::levels::{ClearCondition, LevelConfig, ObstacleConfig};
use crate::rng::{date_seed, today_string, RandomSource, SeededRandom};
use crate::types::{
    ClearKind, ObstacleKind, Position, DAILY_LEVEL_ID, DAILY_POSITION_ATTEMPTS, DEFAULT_GRID_SIZE,
};

/// Longest streak counted, in days
pub const MAX_STREAK_DAYS: u32 = 365;

/// Difficulty rank by weekday, Sunday first
const DIFFICULTY_RANK: [u32; 7] = [7, 1, 2, 3, 4, 5, 6];

fn parse_date(date: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| EngineError::InvalidDate(date.to_string()))
}

/// Seed used for a given date
pub fn seed_for_date(date: &str) -> u32 {
    date_seed(date)
}

/// Draw up to `count` distinct positions outside the central 2x2
///
/// Gives up after the attempt budget even when short.
fn random_positions(rng: &mut SeededRandom, size: usize, count: i32) -> Vec<Position> {
    let n = size as i32;
    let center = n / 2;
    let reserved = |p: Position| (center - 1..=center).contains(&p.row) && (center - 1..=center).contains(&p.col);

    let mut used = HashSet::new();
    let mut positions = Vec::new();
    let mut attempts = 0;
    while (positions.len() as i32) < count && attempts < DAILY_POSITION_ATTEMPTS {
        attempts += 1;
        let row = rng.next_int(0, n - 1);
        let col = rng.next_int(0, n - 1);
        let pos = Position::new(row, col);
        if !reserved(pos) && used.insert(pos) {
            positions.push(pos);
        }
    }
    positions
}

fn kintsugi_row(rng: &mut SeededRandom, size: usize) -> ObstacleConfig {
    let row = rng.next_int(2, 5);
    let positions = (0..size as i32).map(|c| Position::new(row, c)).collect();
    ObstacleConfig::new(ObstacleKind::Kintsugi, positions)
}

fn daily_obstacles(rng: &mut SeededRandom, size: usize, weekday: u32) -> Vec<ObstacleConfig> {
    let mut obstacles = Vec::new();
    match weekday {
        // Monday
        1 => {}
        2 => {
            let count = rng.next_int(2, 5);
            obstacles.push(ObstacleConfig::new(
                ObstacleKind::Stone,
                random_positions(rng, size, count),
            ));
        }
        3 => obstacles.push(kintsugi_row(rng, size)),
        4 => {
            let count = rng.next_int(3, 6);
            let positions = random_positions(rng, size, count);
            let turns = rng.next_int(2, 4) as u8;
            obstacles.push(ObstacleConfig::new(ObstacleKind::Frozen, positions).with_frozen_turns(turns));
        }
        5 => {
            let count = rng.next_int(3, 6);
            let positions = random_positions(rng, size, count);
            let hp = rng.next_int(2, 3) as u8;
            obstacles.push(ObstacleConfig::new(ObstacleKind::Chain, positions).with_chain_hp(hp));
        }
        6 => {
            let count = rng.next_int(8, 14);
            obstacles.push(ObstacleConfig::new(ObstacleKind::Fog, random_positions(rng, size, count)));
            let count = rng.next_int(1, 3);
            obstacles.push(ObstacleConfig::new(
                ObstacleKind::Stone,
                random_positions(rng, size, count),
            ));
        }
        // Sunday
        _ => {
            let count = rng.next_int(2, 3);
            obstacles.push(ObstacleConfig::new(
                ObstacleKind::Stone,
                random_positions(rng, size, count),
            ));
            obstacles.push(kintsugi_row(rng, size));
            let count = rng.next_int(2, 4);
            let positions = random_positions(rng, size, count);
            let turns = rng.next_int(2, 3) as u8;
            obstacles.push(ObstacleConfig::new(ObstacleKind::Frozen, positions).with_frozen_turns(turns));
            let count = rng.next_int(2, 4);
            obstacles.push(
                ObstacleConfig::new(ObstacleKind::Chain, random_positions(rng, size, count)).with_chain_hp(2),
            );
        }
    }
    obstacles
}

/// Synthesize the challenge for a `YYYY-MM-DD` date
pub fn generate_daily_challenge(date: &str) -> Result<LevelConfig, EngineError> {
    let weekday = parse_date(date)?.weekday().num_days_from_sunday();
    let mut rng = SeededRandom::new(date_seed(date));
    let size = DEFAULT_GRID_SIZE;

    let obstacles = daily_obstacles(&mut rng, size, weekday);
    let rank = DIFFICULTY_RANK[weekday as usize];
    let target = 2000 + rank * 500 + rng.next_int(0, 500) as u32;
    let star_thresholds = [target, target * 3 / 2, target * 11 / 5];

    debug!(
        "daily challenge {} (weekday {}): target {}, {} obstacle groups",
        date,
        weekday,
        target,
        obstacles.len()
    );

    Ok(LevelConfig {
        id: DAILY_LEVEL_ID,
        grid_size: size,
        clear_condition: ClearCondition {
            kind: ClearKind::Score,
            target,
        },
        obstacles,
        star_thresholds,
        max_moves: None,
        grid: None,
        description: format!("Daily Challenge - {}", date),
        introduces_pattern: None,
        introduces_obstacle: None,
    })
}

/// Today's challenge in local time
pub fn todays_challenge() -> Result<LevelConfig, EngineError> {
    generate_daily_challenge(&today_string())
}

/// Whether `date` appears among the completed dates
pub fn is_daily_completed(date: &str, completed: &[String]) -> bool {
    completed.iter().any(|d| d == date)
}

/// Consecutive completed days ending at `today`, capped at [`MAX_STREAK_DAYS`]
pub fn daily_streak(completed: &[String], today: NaiveDate) -> u32 {
    let done: HashSet<&str> = completed.iter().map(String::as_str).collect();
    let mut streak = 0;
    let mut day = today;
    while streak < MAX_STREAK_DAYS {
        if !done.contains(day.format("%Y-%m-%d").to_string().as_str()) {
            break;
        }
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use chrono::Duration;

    #[test]
    fn test_same_date_same_challenge() {
        let a = generate_daily_challenge("2024-03-15").unwrap();
        let b = generate_daily_challenge("2024-03-15").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id, -1);
        assert_eq!(a.description, "Daily Challenge - 2024-03-15");
    }

    #[test]
    fn test_monday_has_no_obstacles() {
        // 2024-01-01 was a Monday
        let c = generate_daily_challenge("2024-01-01").unwrap();
        assert!(c.obstacles.is_empty());
        assert!((2500..=3000).contains(&c.clear_condition.target));
    }

    #[test]
    fn test_weekday_profiles() {
        // 2024-01-02 Tue through 2024-01-07 Sun
        let kinds = |date: &str| -> Vec<ObstacleKind> {
            generate_daily_challenge(date)
                .unwrap()
                .obstacles
                .iter()
                .map(|o| o.kind)
                .collect()
        };
        assert_eq!(kinds("2024-01-02"), vec![ObstacleKind::Stone]);
        assert_eq!(kinds("2024-01-03"), vec![ObstacleKind::Kintsugi]);
        assert_eq!(kinds("2024-01-04"), vec![ObstacleKind::Frozen]);
        assert_eq!(kinds("2024-01-05"), vec![ObstacleKind::Chain]);
        assert_eq!(kinds("2024-01-06"), vec![ObstacleKind::Fog, ObstacleKind::Stone]);
        assert_eq!(
            kinds("2024-01-07"),
            vec![
                ObstacleKind::Stone,
                ObstacleKind::Kintsugi,
                ObstacleKind::Frozen,
                ObstacleKind::Chain
            ]
        );
    }

    #[test]
    fn test_targets_and_stars() {
        for day in 1..=28 {
            let date = format!("2024-02-{:02}", day);
            let c = generate_daily_challenge(&date).unwrap();
            let weekday = parse_date(&date).unwrap().weekday().num_days_from_sunday();
            let base = 2000 + DIFFICULTY_RANK[weekday as usize] * 500;
            let t = c.clear_condition.target;
            assert!((base..=base + 500).contains(&t), "{}", date);
            assert_eq!(c.star_thresholds[0], t);
            assert_eq!(c.star_thresholds[1], (t as f64 * 1.5).floor() as u32);
            assert_eq!(c.star_thresholds[2], (t as f64 * 2.2).floor() as u32);
        }
    }

    #[test]
    fn test_center_is_kept_clear() {
        for day in 1..=31 {
            let date = format!("2024-03-{:02}", day);
            let c = generate_daily_challenge(&date).unwrap();
            for o in c.obstacles.iter().filter(|o| o.kind != ObstacleKind::Kintsugi) {
                for p in &o.positions {
                    let centered = (3..=4).contains(&p.row) && (3..=4).contains(&p.col);
                    assert!(!centered, "{} {:?}", date, p);
                }
                let unique: HashSet<_> = o.positions.iter().collect();
                assert_eq!(unique.len(), o.positions.len());
            }
            // Every challenge builds a playable grid
            let grid = Grid::from_config(&c);
            assert!(grid.get(3, 3).unwrap().is_empty() || grid.get(3, 3).unwrap().kintsugi);
        }
    }

    #[test]
    fn test_position_budget_stops_short() {
        let mut rng = SeededRandom::new(1);
        // 2x2 grid is entirely reserved
        assert!(random_positions(&mut rng, 2, 3).is_empty());
    }

    #[test]
    fn test_invalid_date() {
        assert_eq!(
            generate_daily_challenge("not-a-date"),
            Err(EngineError::InvalidDate("not-a-date".to_string()))
        );
        assert!(generate_daily_challenge("2024-02-30").is_err());
    }

    #[test]
    fn test_streaks() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let completed: Vec<String> = ["2024-02-28", "2024-02-29", "2024-03-01", "2024-02-26"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(daily_streak(&completed, today), 3);
        assert_eq!(daily_streak(&[], today), 0);
        assert!(is_daily_completed("2024-02-29", &completed));
        assert!(!is_daily_completed("2024-02-27", &completed));
    }

    #[test]
    fn test_streak_cap() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let completed: Vec<String> = (0..400)
            .map(|i| (today - Duration::days(i)).format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(daily_streak(&completed, today), MAX_STREAK_DAYS);
    }

    #[test]
    fn test_seed_for_date_matches_hash() {
        assert_eq!(seed_for_date("2024-01-01"), date_seed("2024-01-01"));
    }
}
