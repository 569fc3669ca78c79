//! Obstacle tests - fog, kintsugi, chain and frozen transitions across turns

use wagara_blast::core::levels::load_level;
use wagara_blast::core::obstacle_pass::{process_obstacles, reduce_chains, thaw_frozen};
use wagara_blast::core::obstacles::{blocks_placement, hits_required, is_destructible};
use wagara_blast::core::shapes::SINGLE;
use wagara_blast::core::{
    BlockPiece, Cell, CellState, CompletedLines, GameState, Grid, Obstacle, PieceTray,
};
use wagara_blast::types::{FeedbackKind, GameMode, ObstacleKind, PatternKind, Position};

fn singles() -> PieceTray {
    [
        Some(BlockPiece::new(&SINGLE, PatternKind::Ichimatsu, "a")),
        Some(BlockPiece::new(&SINGLE, PatternKind::Asanoha, "b")),
        Some(BlockPiece::new(&SINGLE, PatternKind::Seigaiha, "c")),
    ]
}

fn session(grid: Grid) -> GameState {
    GameState::new_seeded(GameMode::Classic, None, 99)
        .with_grid(grid)
        .with_pieces(singles())
}

fn fill(grid: &mut Grid, row: i32, cols: std::ops::Range<i32>) {
    for c in cols {
        grid.set(Position::new(row, c), Cell::filled(PatternKind::Kikkou));
    }
}

#[test]
fn test_chain_breaks_over_two_turns() {
    let mut grid = Grid::new(8);
    grid.set(Position::new(3, 0), Cell::obstacle(Obstacle::Chain { hp: 2 }));
    fill(&mut grid, 2, 1..8);
    fill(&mut grid, 4, 1..8);
    let state = session(grid);

    // Complete row 2, adjacent to the chain
    let turn = state.place_piece(0, Position::new(2, 0));
    assert_eq!(
        turn.state.grid().get(3, 0).unwrap().state,
        CellState::Obstacle(Obstacle::Chain { hp: 1 })
    );
    assert!(!turn.events.iter().any(|e| e.kind == FeedbackKind::Chain));

    // Complete row 4 on the next turn
    let turn = turn.state.place_piece(1, Position::new(4, 0));
    assert_eq!(*turn.state.grid().get(3, 0).unwrap(), Cell::EMPTY);
    assert!(turn.events.iter().any(|e| e.kind == FeedbackKind::Chain));
}

#[test]
fn test_chain_hp_never_negative() {
    let mut grid = Grid::new(8);
    grid.set(Position::new(3, 3), Cell::obstacle(Obstacle::Chain { hp: 1 }));
    grid.set(Position::new(6, 6), Cell::obstacle(Obstacle::Chain { hp: 3 }));
    // Both axes hit (3,3): two hits against one hp
    let lines = CompletedLines {
        rows: vec![2],
        cols: vec![4],
    };
    let (next, broken) = reduce_chains(&grid, &lines);
    assert_eq!(broken, 1);
    assert_eq!(*next.get(3, 3).unwrap(), Cell::EMPTY);
    // Far from both lines
    assert_eq!(
        next.get(6, 6).unwrap().state,
        CellState::Obstacle(Obstacle::Chain { hp: 3 })
    );
}

#[test]
fn test_frozen_needs_exact_passes() {
    let mut grid = Grid::new(8);
    grid.set(Position::new(0, 0), Cell::obstacle(Obstacle::Frozen { turns: 1 }));
    grid.set(Position::new(7, 7), Cell::obstacle(Obstacle::Frozen { turns: 3 }));

    let once = thaw_frozen(&grid);
    assert!(once.get(0, 0).unwrap().is_empty());
    assert!(once.get(7, 7).unwrap().is_obstacle());

    let twice = thaw_frozen(&once);
    assert!(twice.get(7, 7).unwrap().is_obstacle());
    let thrice = thaw_frozen(&twice);
    assert!(thrice.get(7, 7).unwrap().is_empty());
}

#[test]
fn test_frozen_thaws_during_play() {
    let level = load_level(8).unwrap();
    let mut state = GameState::new_seeded(GameMode::Level, Some(level), 5).with_pieces(singles());
    assert!(state.grid().get(1, 1).unwrap().is_obstacle());

    // Three placements far from the frozen cells
    for (i, col) in [(0usize, 3), (1, 4), (2, 5)] {
        state = state.place_piece(i, Position::new(7, col)).state;
    }
    for (r, c) in [(1, 1), (1, 6), (6, 1), (6, 6)] {
        assert!(state.grid().get(r, c).unwrap().is_empty(), "({}, {})", r, c);
    }
}

#[test]
fn test_fog_lifts_within_radius() {
    let level = load_level(12).unwrap();
    let state = GameState::new_seeded(GameMode::Level, Some(level), 5).with_pieces(singles());
    assert!(state.grid().get(2, 2).unwrap().fog);

    let turn = state.place_piece(0, Position::new(0, 0));
    let grid = turn.state.grid();
    assert!(!grid.get(2, 2).unwrap().fog);
    assert!(grid.get(2, 3).unwrap().fog);
    assert!(grid.get(3, 2).unwrap().fog);
}

#[test]
fn test_fogged_cells_accept_pieces() {
    let level = load_level(12).unwrap();
    let state = GameState::new_seeded(GameMode::Level, Some(level), 5).with_pieces(singles());
    let turn = state.place_piece(0, Position::new(4, 4));
    assert_eq!(turn.events[0].kind, FeedbackKind::Place);
    // The placed cell and its neighborhood are revealed
    assert!(turn.state.grid().get(4, 4).unwrap().is_filled());
    assert!(!turn.state.grid().get(5, 5).unwrap().fog);
}

#[test]
fn test_kintsugi_detection_reads_pre_clear_grid() {
    let mut grid = Grid::new(8);
    fill(&mut grid, 6, 0..8);
    grid.set(
        Position::new(6, 3),
        Cell {
            kintsugi: true,
            ..Cell::filled(PatternKind::Uroko)
        },
    );
    let lines = grid.completed_lines();
    let outcome = process_obstacles(&grid, &[Position::new(6, 7)], &lines);
    assert!(outcome.kintsugi);
    assert_eq!(outcome.kintsugi_positions, vec![Position::new(6, 3)]);
    assert_eq!(outcome.chains_broken, 0);

    let none = process_obstacles(&grid, &[], &CompletedLines::default());
    assert!(!none.kintsugi);
}

#[test]
fn test_obstacle_catalog() {
    assert!(blocks_placement(ObstacleKind::Stone));
    assert!(!blocks_placement(ObstacleKind::Fog));
    assert!(blocks_placement(ObstacleKind::Rotate));
    assert!(!is_destructible(ObstacleKind::Stone));
    assert!(is_destructible(ObstacleKind::Chain));
    assert_eq!(hits_required(ObstacleKind::Chain), 3);
    assert_eq!(hits_required(ObstacleKind::Stone), 0);
}
