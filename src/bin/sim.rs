use broadside::{decide_and_fire, Layout, OpponentKind, TurnError};
use clap::ValueEnum;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Play one game without any cooldown and return the number of shots fired.
fn play_game(kind: OpponentKind, rng: &mut SmallRng) -> anyhow::Result<usize> {
    let mut grid = Layout::Random.deploy(rng).map_err(|e| anyhow::anyhow!(e))?;
    let mut strategy = kind.build();
    let mut shots = 0;
    loop {
        match decide_and_fire(strategy.as_mut(), rng, &mut grid) {
            Ok(_) => shots += 1,
            Err(TurnError::GameOver) => return Ok(shots),
            Err(e) => return Err(anyhow::anyhow!(e)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    broadside::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if !(3..=4).contains(&args.len()) {
        eprintln!("Usage: {} <opponent> <seed> [games]", args[0]);
        std::process::exit(1);
    }
    let kind = OpponentKind::from_str(&args[1], true).map_err(|e| anyhow::anyhow!(e))?;
    let seed: u64 = args[2].parse()?;
    let games: usize = match args.get(3) {
        Some(n) => n.parse()?,
        None => 1,
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let shots = (0..games)
        .map(|_| play_game(kind, &mut rng))
        .collect::<anyhow::Result<Vec<usize>>>()?;

    let mean = if shots.is_empty() {
        0.0
    } else {
        shots.iter().sum::<usize>() as f64 / shots.len() as f64
    };
    let result = json!({
        "opponent": kind.to_string(),
        "seed": seed,
        "games": games,
        "shots": shots,
        "mean": mean,
        "min": shots.iter().min(),
        "max": shots.iter().max(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
