// ABOUTME: Core library for the Yahtzee rules engine.
// ABOUTME: Dice rolling, category scoring, scorecards, turns, games, and simulation.

//! # Yahtzee
//!
//! The rules engine of the Yahtzee dice game: five dice, up to three rolls
//! per turn, thirteen scoring categories, and the upper-section and Yahtzee
//! bonuses.
//!
//! ## Quick Start
//!
//! ```
//! use yahtzee::{Category, Engine, KeepMask};
//!
//! let mut engine = Engine::seeded(42);
//! let game = engine.create_game("alice").unwrap();
//!
//! let turn = engine.open_turn(game).unwrap();
//! println!("turn {} rolled {}", turn.number, turn.dice);
//!
//! // Keep the first two dice, reroll the rest.
//! let keep: KeepMask = "11000".parse().unwrap();
//! engine.reroll(game, keep).unwrap();
//!
//! let report = engine.score_turn(game, Category::Chance).unwrap();
//! println!("scored {}", report.score);
//! ```
//!
//! ## Scoring a hand directly
//!
//! ```
//! assert_eq!(yahtzee::score_hand("full_house", &[2, 2, 2, 3, 3]).unwrap(), 25);
//! assert_eq!(yahtzee::score_hand("aces", &[1, 1, 1, 4, 5]).unwrap(), 3);
//! ```

pub mod category;
pub mod engine;
pub mod error;
pub mod game;
pub mod recorder;
pub mod roller;
pub mod scorecard;
pub mod scoring;
pub mod sim;
pub mod turn;

pub use category::Category;
pub use engine::{Engine, GameId, GameStore, MemoryStore};
pub use error::{Error, Result};
pub use game::{Game, HistoryEntry, ScoreReport};
pub use recorder::{PlayerRecord, PlayerStats, ScoreRecorder};
pub use roller::{Dice, FastRng, KeepMask, Rng};
pub use scorecard::{Assignment, Scorecard, ScorecardSnapshot};
pub use sim::{simulate, simulate_seeded, SimResult};
pub use turn::{Turn, TurnSnapshot, TurnState};

/// Score five dice in a category named by string, on an empty scorecard.
///
/// # Examples
///
/// ```
/// assert_eq!(yahtzee::score_hand("SMALL_STRAIGHT", &[1, 2, 3, 4, 6]).unwrap(), 30);
/// assert!(yahtzee::score_hand("LARGE_STRAIGHT", &[1, 2, 3]).is_err());
/// ```
pub fn score_hand(category: &str, dice: &[u8]) -> Result<u32> {
    let category: Category = category.parse()?;
    let dice = Dice::try_from(dice)?;
    Ok(scoring::score(&dice, category, &Scorecard::new()))
}

/// Roll five dice with a custom RNG.
///
/// # Examples
///
/// ```
/// use yahtzee::{roll_with_rng, FastRng};
///
/// let mut rng = FastRng::with_seed(42);
/// let dice = roll_with_rng(&mut rng).unwrap();
/// assert!(dice.values().iter().all(|d| (1..=6).contains(d)));
/// ```
pub fn roll_with_rng(rng: &mut impl Rng) -> Result<Dice> {
    Dice::roll(rng)
}
