use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use salvo::{
    init_logging, parse_placement, play_ai_match, random_fleet, ui, validate_fleet, AiLevel,
    Rules, RulesOverrides, Side,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a computer-vs-computer match and print both fog views.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = AiLevel::Hard)]
        level_a: AiLevel,
        #[arg(long, value_enum, default_value_t = AiLevel::Medium)]
        level_b: AiLevel,
        #[arg(long, help = "Allow ships to touch, diagonals included")]
        allow_touching: bool,
        #[arg(long, help = "Pass the turn after every shot, hits included")]
        no_repeat_turn: bool,
    },
    /// Validate a fleet given as placements like "A1 H 4".
    Validate {
        placements: Vec<String>,
        #[arg(long)]
        allow_touching: bool,
    },
    /// Print a random legal fleet as JSON.
    RandomFleet {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        allow_touching: bool,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            seed,
            level_a,
            level_b,
            allow_touching,
            no_repeat_turn,
        } => {
            if let Some(s) = seed {
                info!("using fixed seed {} (match will be reproducible)", s);
            }
            let mut rng = make_rng(seed);
            let rules = Rules::with_overrides(RulesOverrides {
                allow_touching: Some(allow_touching),
                repeat_turn_on_hit: Some(!no_repeat_turn),
                ..RulesOverrides::default()
            });
            let (state, summary) =
                play_ai_match("local", (level_a, level_b), rules, &mut rng)?;
            for side in [Side::A, Side::B] {
                println!("Side {} fleet:", side);
                println!("{}", ui::render_board(state.board(side)));
                println!("Side {} view of its opponent:", side);
                println!("{}", ui::render_fog(state.fog(side)));
            }
            println!(
                "Winner: {} on turn {} ({} shots by A, {} by B)",
                summary.winner, summary.turn_no, summary.shots_a, summary.shots_b
            );
        }
        Commands::Validate {
            placements,
            allow_touching,
        } => {
            let mut fleet = Vec::with_capacity(placements.len());
            for (i, text) in placements.iter().enumerate() {
                let ship = parse_placement(format!("ship-{}", i + 1), text)
                    .with_context(|| format!("placement {:?}", text))?;
                fleet.push(ship);
            }
            match validate_fleet(&fleet, allow_touching) {
                Ok(()) => println!("OK"),
                Err(violation) => println!("{}: {}", violation.code(), violation),
            }
        }
        Commands::RandomFleet {
            seed,
            allow_touching,
        } => {
            let mut rng = make_rng(seed);
            let fleet = random_fleet(&mut rng, allow_touching)?;
            println!("{}", serde_json::to_string_pretty(&fleet)?);
        }
    }
    Ok(())
}
