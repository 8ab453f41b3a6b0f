use broadside::{
    decide_and_fire, BacktrackingHunter, Cell, Coord, DfsHunter, Grid, MinimaxSearcher,
    OpponentKind, ShotOutcome, Strategy, TurnError,
};
use rand::{rngs::SmallRng, SeedableRng};

fn single_ship(at: Coord) -> Grid {
    let mut grid = Grid::new();
    grid.set(at, Cell::Ship).unwrap();
    grid
}

/// Two open rows on top of an otherwise resolved grid.
const ENDGAME: &str = "
    ..O.......
    ...OO.....
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
";

#[test]
fn test_dfs_sweeps_in_reverse_row_major() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut grid = single_ship(Coord::new(5, 5));
    let mut dfs = DfsHunter::new();
    let first = decide_and_fire(&mut dfs, &mut rng, &mut grid).unwrap();
    assert_eq!(first, (Coord::new(9, 9), ShotOutcome::Miss));
    let second = decide_and_fire(&mut dfs, &mut rng, &mut grid).unwrap();
    assert_eq!(second, (Coord::new(9, 8), ShotOutcome::Miss));
}

#[test]
fn test_dfs_pushes_neighbours_of_a_hit() {
    let mut grid = single_ship(Coord::new(5, 5));
    let mut dfs = DfsHunter::new();
    let outcome = grid.fire(Coord::new(5, 5)).unwrap();
    dfs.record_outcome(Coord::new(5, 5), outcome, &grid);
    assert_eq!(
        dfs.frontier(),
        &[Coord::new(4, 5), Coord::new(6, 5), Coord::new(5, 6), Coord::new(5, 4)]
    );
}

#[test]
fn test_dfs_finds_lone_ship_then_expands() {
    let mut rng = SmallRng::seed_from_u64(1);
    let target = Coord::new(5, 5);
    let mut grid = single_ship(target);
    let mut dfs = DfsHunter::new();
    let mut shots = 0;
    loop {
        let (coord, outcome) = decide_and_fire(&mut dfs, &mut rng, &mut grid).unwrap();
        shots += 1;
        if outcome.is_hit() {
            assert_eq!(coord, target);
            break;
        }
    }
    // (9,9) down to (5,6) in reverse row-major order
    assert_eq!(shots, 45);
    let top: Vec<_> = dfs.frontier().iter().rev().take(2).copied().collect();
    assert_eq!(top, vec![Coord::new(5, 4), Coord::new(4, 5)]);
    assert_eq!(
        decide_and_fire(&mut dfs, &mut rng, &mut grid),
        Err(TurnError::GameOver)
    );
}

#[test]
fn test_backtracking_follows_hits_depth_first() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut grid: Grid = ENDGAME.parse().unwrap();
    let mut hunter = BacktrackingHunter::new();
    let coord = Coord::new(1, 3);
    let outcome = grid.fire(coord).unwrap();
    hunter.record_outcome(coord, outcome, &grid);
    // rows below are resolved, so only N, E and W survive
    assert_eq!(
        hunter.moves(),
        &[Coord::new(0, 3), Coord::new(1, 4), Coord::new(1, 2)]
    );
    let (next, _) = decide_and_fire(&mut hunter, &mut rng, &mut grid).unwrap();
    assert_eq!(next, Coord::new(1, 2));
}

#[test]
fn test_backtracking_random_restart_is_seeded() {
    let play = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = single_ship(Coord::new(0, 0));
        let mut hunter = BacktrackingHunter::new();
        (0..10)
            .map(|_| decide_and_fire(&mut hunter, &mut rng, &mut grid).map(|(c, _)| c))
            .collect::<Vec<_>>()
    };
    assert_eq!(play(42), play(42));
}

#[test]
fn test_minimax_prefers_first_ship_cell() {
    let grid: Grid = ENDGAME.parse().unwrap();
    let searcher = MinimaxSearcher::new();
    let (coord, score) = searcher.best_move(&grid).unwrap();
    assert_eq!(coord, Coord::new(0, 2));
    // 80 misses on the board, then hit, miss, hit, miss
    assert_eq!(score, -400 + 10 - 5 + 10 - 5);
}

#[test]
fn test_minimax_breaks_ties_by_first_cell() {
    let mut grid: Grid = ENDGAME.parse().unwrap();
    for c in [Coord::new(0, 2), Coord::new(1, 3), Coord::new(1, 4)] {
        grid.set(c, Cell::Empty).unwrap();
    }
    let searcher = MinimaxSearcher::new();
    let (coord, _) = searcher.best_move(&grid).unwrap();
    assert_eq!(coord, Coord::new(0, 0));
}

#[test]
fn test_minimax_is_deterministic() {
    let grid: Grid = ENDGAME.parse().unwrap();
    let mut a = MinimaxSearcher::new();
    let mut b = MinimaxSearcher::new();
    let mut rng_a = SmallRng::seed_from_u64(1);
    let mut rng_b = SmallRng::seed_from_u64(2);
    let first = a.select_target(&mut rng_a, &grid);
    assert_eq!(first, b.select_target(&mut rng_b, &grid));
    assert_eq!(first, a.select_target(&mut rng_a, &grid));
    assert!(!a.requires_cooldown());
}

#[test]
fn test_minimax_finishes_endgame_without_waste() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut grid: Grid = ENDGAME.parse().unwrap();
    let mut searcher = MinimaxSearcher::new();
    let mut shots = Vec::new();
    loop {
        match decide_and_fire(&mut searcher, &mut rng, &mut grid) {
            Ok((coord, outcome)) => {
                assert!(outcome.is_hit());
                shots.push(coord);
            }
            Err(TurnError::GameOver) => break,
            Err(e) => panic!("unexpected {}", e),
        }
    }
    assert_eq!(shots, vec![Coord::new(0, 2), Coord::new(1, 3), Coord::new(1, 4)]);
    assert_eq!(searcher.visited().len(), 3);
}

#[test]
fn test_every_opponent_reports_game_over() {
    let mut rng = SmallRng::seed_from_u64(5);
    for kind in OpponentKind::ALL {
        let mut grid = Grid::new();
        let mut strategy = kind.build();
        assert_eq!(
            decide_and_fire(strategy.as_mut(), &mut rng, &mut grid),
            Err(TurnError::GameOver),
            "{}",
            kind
        );
        assert!(strategy.visited().is_empty());
    }
}

#[test]
fn test_only_minimax_skips_cooldown() {
    for kind in OpponentKind::ALL {
        let strategy = kind.build();
        assert_eq!(strategy.requires_cooldown(), kind != OpponentKind::Minimax);
    }
}

#[test]
fn test_every_opponent_marks_each_shot_once() {
    let mut rng = SmallRng::seed_from_u64(13);
    for kind in OpponentKind::ALL {
        let mut grid = single_ship(Coord::new(9, 0));
        let mut strategy = kind.build();
        let (coord, _) = decide_and_fire(strategy.as_mut(), &mut rng, &mut grid).unwrap();
        assert!(strategy.visited().contains(coord), "{}", kind);
        assert_eq!(strategy.visited().len(), 1, "{}", kind);
    }
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "visited twice")]
fn test_recording_a_shot_twice_panics() {
    let mut grid = single_ship(Coord::new(5, 5));
    let mut dfs = DfsHunter::new();
    let coord = Coord::new(0, 0);
    let outcome = grid.fire(coord).unwrap();
    dfs.record_outcome(coord, outcome, &grid);
    dfs.record_outcome(coord, outcome, &grid);
}
