// ABOUTME: Command-line interface for the yahtzee rules engine.
// ABOUTME: Scores hands, plays interactive games, and simulates many games.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use yahtzee::scorecard::YAHTZEE_BONUS_POINTS;
use yahtzee::{Category, Engine, GameId, KeepMask, TurnSnapshot};

#[derive(Parser)]
#[command(name = "yahtzee")]
#[command(about = "Rules engine for the Yahtzee dice game")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score five dice in a category
    Score {
        /// Category name (e.g., "full_house", "SMALL_STRAIGHT")
        category: String,

        /// The five dice
        #[arg(num_args = 5, required = true)]
        dice: Vec<u8>,
    },
    /// Play a game interactively on stdin
    Play {
        /// Player name the final score is recorded under
        #[arg(long, default_value = "player")]
        name: String,

        /// Seed for reproducible dice
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Simulate many games with a greedy policy
    Sim {
        /// Number of games to play
        #[arg(short, long, default_value = "10000")]
        n: usize,

        /// Seed for reproducible dice
        #[arg(long)]
        seed: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { category, dice } => match yahtzee::score_hand(&category, &dice) {
            Ok(score) => {
                println!("{}", score);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Play { name, seed } => {
            let engine = match seed {
                Some(seed) => Engine::seeded(seed),
                None => Engine::in_memory(),
            };
            if let Err(e) = play(engine, &name) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Sim { n, seed, json } => {
            let result = match seed {
                Some(seed) => yahtzee::simulate_seeded(n, seed),
                None => yahtzee::simulate(n),
            };
            match result {
                Ok(result) => {
                    if json {
                        print_sim_json(&result);
                    } else {
                        print_sim_histogram(&result);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

type CliEngine = Engine<yahtzee::MemoryStore, yahtzee::PlayerStats, yahtzee::FastRng>;

const HELP: &str = "commands:
  keep <mask>       reroll, keeping dice flagged 1 (e.g. keep 11000)
  roll              reroll all five dice
  options           show what the dice score in each open category
  score <category>  score the dice (e.g. score full house)
  card              show the scorecard
  quit              abandon the game";

fn play(mut engine: CliEngine, name: &str) -> yahtzee::Result<()> {
    let id = engine.create_game(name)?;
    println!("{}", HELP);
    print_turn(&engine.open_turn(id)?);

    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let rest: Vec<&str> = words.collect();

        let outcome = match command {
            "" => Ok(false),
            "keep" => reroll(&mut engine, id, rest.first().copied().unwrap_or("00000")),
            "roll" => reroll(&mut engine, id, "00000"),
            "options" => show_options(&engine, id),
            "score" => score(&mut engine, id, &rest.join(" ")),
            "card" => engine.game(id).map(|game| {
                println!("{}", game.scorecard());
                false
            }),
            "quit" => {
                engine.cancel_game(id)?;
                println!("Game abandoned.");
                return Ok(());
            }
            _ => {
                println!("{}", HELP);
                Ok(false)
            }
        };

        match outcome {
            Ok(true) => {
                if let Some(record) = engine.recorder().get(name) {
                    println!("{}: {} played, high score {}", name, record.total_played, record.high_score);
                }
                return Ok(());
            }
            Ok(false) => {}
            Err(e) => println!("Error: {}", e),
        }
        prompt();
    }

    Ok(())
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn reroll(engine: &mut CliEngine, id: GameId, mask: &str) -> yahtzee::Result<bool> {
    let keep: KeepMask = mask.parse()?;
    print_turn(&engine.reroll(id, keep)?);
    Ok(false)
}

fn show_options(engine: &CliEngine, id: GameId) -> yahtzee::Result<bool> {
    let game = engine.game(id)?;
    let dice = game
        .current_turn()
        .and_then(|turn| turn.dice())
        .ok_or(yahtzee::Error::NoTurnInProgress)?;
    let card = game.scorecard();
    for (category, score) in card.preview(&dice) {
        if card.is_scored(category) {
            println!("  {:<16}{:>4}  (bonus +{})", category.name(), score, YAHTZEE_BONUS_POINTS);
        } else {
            println!("  {:<16}{:>4}", category.name(), score);
        }
    }
    Ok(false)
}

/// Score the current turn. Returns true once the game is over.
fn score(engine: &mut CliEngine, id: GameId, category: &str) -> yahtzee::Result<bool> {
    let category: Category = category.parse()?;
    let report = engine.score_turn(id, category)?;
    if report.yahtzee_bonus {
        println!("Yahtzee bonus! ({} so far)", report.scorecard.yahtzee_bonus_count);
    } else {
        println!("{} for {} points (total {})", report.category, report.score, report.scorecard.total);
    }

    if let Some(final_score) = report.final_score {
        println!("{}", engine.game(id)?.scorecard());
        println!("Final score: {}", final_score);
        return Ok(true);
    }

    print_turn(&engine.open_turn(id)?);
    Ok(false)
}

fn print_turn(turn: &TurnSnapshot) {
    println!("turn {} roll {}: {}", turn.number, turn.roll_count, turn.dice);
}

fn print_sim_json(result: &yahtzee::SimResult) {
    use serde_json::json;

    let output = json!({
        "n": result.n,
        "min": result.min,
        "max": result.max,
        "mean": result.mean,
        "median": result.median(),
        "std_dev": result.std_dev,
        "distribution": result.distribution,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_sim_histogram(result: &yahtzee::SimResult) {
    println!("final scores (n={})", result.n);
    println!();

    // Bucket by 20 points so the chart stays readable.
    let mut buckets: std::collections::BTreeMap<u32, usize> = std::collections::BTreeMap::new();
    for (value, count) in result.sorted_outcomes() {
        *buckets.entry(value / 20 * 20).or_insert(0) += count;
    }

    let max_count = buckets.values().copied().max().unwrap_or(1);
    let max_bar_width = 40;

    for (start, count) in buckets {
        let pct = (count as f64 / result.n as f64) * 100.0;
        let bar_width = (count as f64 / max_count as f64 * max_bar_width as f64) as usize;
        let bar: String = "█".repeat(bar_width);

        println!("{:>4}-{:<4}: {:40} {:5.1}%", start, start + 19, bar, pct);
    }

    println!();
    println!(
        "mean: {:.2}, median: {:.1}, std: {:.2}, min: {}, max: {}",
        result.mean,
        result.median(),
        result.std_dev,
        result.min,
        result.max
    );
}
