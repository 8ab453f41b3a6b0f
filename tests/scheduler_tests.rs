use broadside::{
    Coord, CooldownGate, Grid, GridError, Layout, Match, MatchConfig, MatchError, MatchStatus,
    OpponentKind, ShotEvent, ShotOutcome, Side, Strategy, TurnPoll,
};
use rand::{rngs::SmallRng, SeedableRng};

/// Row 0 open with a ship at A1 and B1; everything else already missed.
const TINY: &str = "
    OO........
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
    XXXXXXXXXX
";

fn tiny_match(kind: OpponentKind, cooldown_ms: u64) -> Match {
    let grid: Grid = TINY.parse().unwrap();
    let config = MatchConfig {
        cooldown_ms,
        ..MatchConfig::default()
    };
    Match::from_grids(kind, config, grid, grid)
}

#[test]
fn test_cooldown_gate() {
    let mut gate = CooldownGate::new(1000);
    gate.arm(250);
    assert_eq!(gate.remaining(250), 1000);
    assert_eq!(gate.remaining(900), 350);
    assert!(!gate.is_open(1249));
    assert!(gate.is_open(1250));
    assert_eq!(gate.remaining(5000), 0);
}

#[test]
fn test_human_moves_first() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut m = Match::new(OpponentKind::Dfs, MatchConfig::default(), &mut rng).unwrap();
    assert!(m.is_human_turn());
    assert_eq!(m.poll_opponent(10_000, &mut rng), TurnPoll::HumanTurn);
    assert_eq!(m.status(), MatchStatus::InProgress);
}

#[test]
fn test_opponent_waits_for_cooldown() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut m = tiny_match(OpponentKind::Dfs, 1000);
    let shot = m.human_fire(Coord::new(0, 9), 100).unwrap();
    assert_eq!(shot.outcome, ShotOutcome::Miss);
    assert!(!m.is_human_turn());

    assert_eq!(m.poll_opponent(100, &mut rng), TurnPoll::Thinking { remaining_ms: 1000 });
    assert_eq!(m.poll_opponent(600, &mut rng), TurnPoll::Thinking { remaining_ms: 500 });
    assert_eq!(m.human_fire(Coord::new(0, 8), 700), Err(MatchError::NotYourTurn));

    let fired = m.poll_opponent(1100, &mut rng);
    assert_eq!(
        fired,
        TurnPoll::Fired(ShotEvent {
            shooter: Side::Computer,
            coord: Coord::new(0, 9),
            outcome: ShotOutcome::Miss,
        })
    );
    assert!(m.is_human_turn());
    assert_eq!(m.poll_opponent(1200, &mut rng), TurnPoll::HumanTurn);
}

#[test]
fn test_minimax_is_not_gated() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut m = tiny_match(OpponentKind::Minimax, 1000);
    m.human_fire(Coord::new(0, 5), 0).unwrap();
    match m.poll_opponent(0, &mut rng) {
        TurnPoll::Fired(event) => {
            assert_eq!(event.coord, Coord::new(0, 0));
            assert!(event.outcome.is_hit());
        }
        other => panic!("expected a shot, got {:?}", other),
    }
}

#[test]
fn test_resolved_target_keeps_turn() {
    let mut m = tiny_match(OpponentKind::Greedy, 0);
    let target = Coord::new(5, 5);
    assert_eq!(
        m.human_fire(target, 0),
        Err(MatchError::Grid(GridError::AlreadyFired(target)))
    );
    assert!(m.is_human_turn());
    assert!(m.history().is_empty());
}

#[test]
fn test_human_wins() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut m = tiny_match(OpponentKind::Optimal, 0);
    m.human_fire(Coord::new(0, 0), 0).unwrap();
    assert!(matches!(m.poll_opponent(0, &mut rng), TurnPoll::Fired(_)));
    let last = m.human_fire(Coord::new(0, 1), 0).unwrap();
    assert!(last.outcome.is_hit());
    assert_eq!(m.status(), MatchStatus::HumanWon);
    assert_eq!(
        m.poll_opponent(0, &mut rng),
        TurnPoll::Finished(MatchStatus::HumanWon)
    );
    assert_eq!(
        m.human_fire(Coord::new(0, 2), 0),
        Err(MatchError::Finished(MatchStatus::HumanWon))
    );
    assert_eq!(m.shots_by(Side::Human), 2);
    assert_eq!(m.shots_by(Side::Computer), 1);
}

#[test]
fn test_computer_wins() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut m = tiny_match(OpponentKind::Minimax, 0);
    let mut now = 0;
    for target in ["J1", "I1"] {
        m.human_fire(target.parse().unwrap(), now).unwrap();
        now += 16;
        assert!(matches!(m.poll_opponent(now, &mut rng), TurnPoll::Fired(_)));
    }
    assert_eq!(m.status(), MatchStatus::ComputerWon);
    assert!(m.human_grid().is_game_over());
    assert!(!m.computer_grid().is_game_over());

    let sides: Vec<Side> = m.history().iter().map(|e| e.shooter).collect();
    assert_eq!(sides, vec![Side::Human, Side::Computer, Side::Human, Side::Computer]);
}

#[test]
fn test_switch_opponent_discards_state() {
    let mut rng = SmallRng::seed_from_u64(6);
    let mut m = tiny_match(OpponentKind::Dfs, 0);
    m.human_fire(Coord::new(0, 9), 0).unwrap();
    assert!(matches!(m.poll_opponent(0, &mut rng), TurnPoll::Fired(_)));
    assert_eq!(m.opponent().visited().len(), 1);

    m.switch_opponent(OpponentKind::QLearning);
    assert_eq!(m.opponent_kind(), OpponentKind::QLearning);
    assert!(m.opponent().visited().is_empty());
    assert_eq!(m.history().len(), 2);
    assert!(m.is_human_turn());
}

#[test]
fn test_redeploy_resets_match() {
    let mut rng = SmallRng::seed_from_u64(7);
    let config = MatchConfig {
        cooldown_ms: 0,
        human_layout: Layout::Sparse,
        computer_layout: Layout::Seamless,
    };
    let mut m = Match::new(OpponentKind::Backtracking, config, &mut rng).unwrap();
    m.human_fire(Coord::new(0, 0), 0).unwrap();
    assert!(matches!(m.poll_opponent(0, &mut rng), TurnPoll::Fired(_)));

    m.redeploy(&mut rng).unwrap();
    assert!(m.history().is_empty());
    assert!(m.is_human_turn());
    assert!(m.opponent().visited().is_empty());
    assert_eq!(m.status(), MatchStatus::InProgress);
    assert_eq!(*m.human_grid(), Layout::Sparse.deploy(&mut rng).unwrap());
}

#[test]
fn test_full_match_terminates() {
    let mut rng = SmallRng::seed_from_u64(8);
    let config = MatchConfig {
        cooldown_ms: 0,
        ..MatchConfig::default()
    };
    let mut m = Match::new(OpponentKind::Optimal, config, &mut rng).unwrap();
    let mut targets = Coord::all();
    let mut now = 0;
    while !m.status().is_finished() {
        if m.is_human_turn() {
            let target = targets.next().unwrap();
            m.human_fire(target, now).unwrap();
        } else {
            m.poll_opponent(now, &mut rng);
        }
        now += 16;
    }
    assert!(matches!(m.status(), MatchStatus::HumanWon | MatchStatus::ComputerWon));
    assert!(m.history().len() <= 200);
}
