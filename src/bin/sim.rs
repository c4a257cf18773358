use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

use salvo::{init_logging, play_ai_match, AiLevel, Rules};

/// Run one computer-vs-computer match and print its summary as JSON.
#[derive(Parser)]
struct Args {
    seed: u64,
    #[arg(long, value_enum, default_value_t = AiLevel::Hard)]
    level_a: AiLevel,
    #[arg(long, value_enum, default_value_t = AiLevel::Medium)]
    level_b: AiLevel,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let (state, summary) = play_ai_match(
        "sim",
        (args.level_a, args.level_b),
        Rules::default(),
        &mut rng,
    )?;

    let result = json!({
        "seed": args.seed,
        "summary": summary,
        "winner": summary.winner,
        "status": state.status,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
