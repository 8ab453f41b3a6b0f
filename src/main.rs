#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    decide_and_fire, init_logging, print_grid, print_match, print_probability_board, Coord,
    CooldownGate, Layout, Match, MatchConfig, MatchStatus, OpponentKind, ShotEvent, Side,
    TurnError, TurnPoll, TURN_COOLDOWN_MS,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::time::{Duration, Instant};

/// Roughly 60 frames per second.
#[cfg(feature = "std")]
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against a computer opponent in the terminal.
    Play {
        #[arg(long, value_enum, default_value_t = OpponentKind::Optimal)]
        opponent: OpponentKind,
        #[arg(long, value_enum, default_value_t = Layout::Random, help = "Layout of your own fleet")]
        layout: Layout,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = TURN_COOLDOWN_MS)]
        cooldown_ms: u64,
    },
    /// Watch a computer opponent sink a randomly deployed fleet.
    Watch {
        #[arg(long, value_enum, default_value_t = OpponentKind::Optimal)]
        opponent: OpponentKind,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = TURN_COOLDOWN_MS)]
        cooldown_ms: u64,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[cfg(feature = "std")]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            opponent,
            layout,
            seed,
            cooldown_ms,
        } => {
            let config = MatchConfig {
                cooldown_ms,
                human_layout: layout,
                ..MatchConfig::default()
            };
            play(opponent, config, make_rng(seed)).await
        }
        Commands::Watch {
            opponent,
            seed,
            cooldown_ms,
        } => watch(opponent, cooldown_ms, make_rng(seed)).await,
    }
}

#[cfg(feature = "std")]
fn describe(event: &ShotEvent) -> String {
    let who = match event.shooter {
        Side::Human => "You fire",
        Side::Computer => "Opponent fires",
    };
    let what = if event.outcome.is_hit() { "HIT" } else { "miss" };
    format!("{} at {}: {}", who, event.coord, what)
}

#[cfg(feature = "std")]
fn prompt() {
    println!("\nEnter a target (e.g. B7), `switch <opponent>`, `redeploy` or `quit`:");
}

/// Outcome of one line typed during play.
#[cfg(feature = "std")]
enum Command {
    Fire(Coord),
    Switch(OpponentKind),
    Redeploy,
    Show,
    Quit,
}

#[cfg(feature = "std")]
fn parse_command(line: &str) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("quit") | Some("q") => Ok(Command::Quit),
        Some("redeploy") => Ok(Command::Redeploy),
        Some("show") | None => Ok(Command::Show),
        Some("switch") => {
            let name = words
                .next()
                .ok_or_else(|| anyhow::anyhow!("usage: switch <opponent>"))?;
            OpponentKind::from_str(name, true)
                .map(Command::Switch)
                .map_err(|e| anyhow::anyhow!(e))
        }
        Some(target) => target
            .parse::<Coord>()
            .map(Command::Fire)
            .map_err(|e| anyhow::anyhow!(e)),
    }
}

#[cfg(feature = "std")]
async fn play(kind: OpponentKind, config: MatchConfig, mut rng: SmallRng) -> anyhow::Result<()> {
    let mut game = Match::new(kind, config, &mut rng).map_err(|e| anyhow::anyhow!(e))?;
    let start = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut frame = tokio::time::interval(FRAME);
    let mut thinking_shown = false;

    print_match(&game);
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(line.trim()) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Show) => print_match(&game),
                    Ok(Command::Redeploy) => {
                        game.redeploy(&mut rng).map_err(|e| anyhow::anyhow!(e))?;
                        println!("Fleets redeployed.");
                        print_match(&game);
                    }
                    Ok(Command::Switch(next)) => {
                        game.switch_opponent(next);
                        println!("Now playing against {}.", game.opponent().name());
                    }
                    Ok(Command::Fire(coord)) => match game.human_fire(coord, elapsed_ms(start)) {
                        Ok(event) => {
                            println!("{}", describe(&event));
                            thinking_shown = false;
                        }
                        Err(e) => println!("{}", e),
                    },
                    Err(e) => println!("{}", e),
                }
                prompt();
            }
            _ = frame.tick() => {
                match game.poll_opponent(elapsed_ms(start), &mut rng) {
                    TurnPoll::HumanTurn => {}
                    TurnPoll::Thinking { remaining_ms } => {
                        if !thinking_shown {
                            println!("{} is thinking ({} ms)...", game.opponent().name(), remaining_ms);
                            thinking_shown = true;
                        }
                    }
                    TurnPoll::Fired(event) => {
                        println!("{}", describe(&event));
                        print_match(&game);
                        prompt();
                    }
                    TurnPoll::Finished(status) => {
                        announce(&game, status);
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn announce(game: &Match, status: MatchStatus) {
    print_match(game);
    match status {
        MatchStatus::HumanWon => println!("\nVICTORY! You have sunk all enemy ships."),
        MatchStatus::ComputerWon => println!("\nDEFEAT. All your ships have been destroyed."),
        MatchStatus::OpponentExhausted => {
            println!("\n{} has no moves left.", game.opponent().name())
        }
        MatchStatus::InProgress => {}
    }
}

#[cfg(feature = "std")]
async fn watch(kind: OpponentKind, cooldown_ms: u64, mut rng: SmallRng) -> anyhow::Result<()> {
    let mut grid = Layout::Random
        .deploy(&mut rng)
        .map_err(|e| anyhow::anyhow!(e))?;
    let mut strategy = kind.build();
    let mut gate = CooldownGate::new(cooldown_ms);
    let mut frame = tokio::time::interval(FRAME);
    let start = Instant::now();
    let mut shots = 0usize;

    println!("Watching {} ...", strategy.name());
    print_grid("Target fleet", &grid, true);
    gate.arm(0);

    loop {
        frame.tick().await;
        let now = elapsed_ms(start);
        if strategy.requires_cooldown() && !gate.is_open(now) {
            continue;
        }
        match decide_and_fire(strategy.as_mut(), &mut rng, &mut grid) {
            Ok((coord, outcome)) => {
                shots += 1;
                println!("Shot {}: {} -> {:?}", shots, coord, outcome);
                print_grid("Target fleet", &grid, true);
                if let Some(pdf) = strategy.heatmap() {
                    print_probability_board(pdf, &grid);
                }
                gate.arm(now);
            }
            Err(TurnError::GameOver) => break,
            Err(e) => return Err(anyhow::anyhow!(e)),
        }
    }
    println!("\n{} sank the fleet in {} shots.", strategy.name(), shots);
    Ok(())
}
