// ABOUTME: Monte Carlo simulation of complete games under a greedy policy.
// ABOUTME: Runs many games to compute the final-score distribution and statistics.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::game::Game;
use crate::roller::{Dice, FastRng, KeepMask, Rng, NUM_DICE};
use crate::scoring;
use std::collections::HashMap;

/// Final scores from a batch of greedy games.
#[derive(Debug, Clone)]
pub struct SimResult {
    /// How many games ended on each final score.
    pub distribution: HashMap<u32, usize>,
    /// Lowest final score of the batch.
    pub min: u32,
    /// Highest final score of the batch.
    pub max: u32,
    pub mean: f64,
    /// Population standard deviation of the final scores.
    pub std_dev: f64,
    /// Games played.
    pub n: usize,
}

impl SimResult {
    /// Final scores from lowest to highest, paired with their game counts.
    pub fn sorted_outcomes(&self) -> Vec<(u32, usize)> {
        let mut outcomes: Vec<(u32, usize)> =
            self.distribution.iter().map(|(&score, &count)| (score, count)).collect();
        outcomes.sort_unstable_by_key(|&(score, _)| score);
        outcomes
    }

    /// Share of games that ended on each final score.
    pub fn probabilities(&self) -> HashMap<u32, f64> {
        let games = self.n as f64;
        self.distribution
            .iter()
            .map(|(&score, &count)| (score, count as f64 / games))
            .collect()
    }

    /// Most frequent final score; the lower score wins a tie.
    pub fn mode(&self) -> Option<u32> {
        self.distribution
            .iter()
            .max_by_key(|(&score, &count)| (count, std::cmp::Reverse(score)))
            .map(|(&score, _)| score)
    }

    /// Median final score, averaging the middle pair for an even batch.
    pub fn median(&self) -> f64 {
        let outcomes = self.sorted_outcomes();
        let games: usize = outcomes.iter().map(|&(_, count)| count).sum();
        if games == 0 {
            return 0.0;
        }

        let score_at = |rank: usize| -> f64 {
            let mut seen = 0;
            for &(score, count) in &outcomes {
                seen += count;
                if seen > rank {
                    return score as f64;
                }
            }
            0.0
        };

        if games % 2 == 0 {
            (score_at(games / 2 - 1) + score_at(games / 2)) / 2.0
        } else {
            score_at(games / 2)
        }
    }
}

/// Play `n` games with an entropy-seeded RNG.
pub fn simulate(n: usize) -> Result<SimResult> {
    simulate_with_rng(n, &mut FastRng::new())
}

/// Play `n` games with a seeded RNG for reproducibility.
pub fn simulate_seeded(n: usize, seed: u64) -> Result<SimResult> {
    simulate_with_rng(n, &mut FastRng::with_seed(seed))
}

/// Play `n` games drawing dice from `rng`.
pub fn simulate_with_rng(n: usize, rng: &mut impl Rng) -> Result<SimResult> {
    if n == 0 {
        return Err(Error::InvalidInput("simulation needs at least one game".to_string()));
    }

    let mut distribution: HashMap<u32, usize> = HashMap::new();
    let mut sum: f64 = 0.0;
    let mut sum_sq: f64 = 0.0;
    let mut min = u32::MAX;
    let mut max = u32::MIN;

    for _ in 0..n {
        let total = play_greedy(rng)?
            .final_score()
            .ok_or(Error::NotComplete)?;

        *distribution.entry(total).or_insert(0) += 1;
        sum += total as f64;
        sum_sq += total as f64 * total as f64;
        min = min.min(total);
        max = max.max(total);
    }

    let mean = sum / n as f64;
    let variance = (sum_sq / n as f64) - (mean * mean);
    let std_dev = variance.max(0.0).sqrt();

    Ok(SimResult {
        distribution,
        min,
        max,
        mean,
        std_dev,
        n,
    })
}

/// Play one full game: chase the most common face for up to two rerolls,
/// then take the open category worth the most.
pub fn play_greedy(rng: &mut impl Rng) -> Result<Game> {
    let mut game = Game::new("sim");

    while !game.is_over() {
        let mut dice = game.open_turn(rng)?.dice;
        for _ in 1..crate::turn::MAX_ROLLS {
            if scoring::is_yahtzee(&dice) {
                break;
            }
            dice = game.reroll(keep_most_common(&dice), rng)?.dice;
        }
        game.score_turn(pick_category(&game, &dice))?;
    }

    Ok(game)
}

/// Keep every die showing the most frequent face, highest face on ties.
fn keep_most_common(dice: &Dice) -> KeepMask {
    let counts = dice.counts();
    let target = (1..=6u8)
        .max_by_key(|&face| (counts[face as usize], face))
        .unwrap_or(6);

    let mut keep = [false; NUM_DICE];
    for (flag, value) in keep.iter_mut().zip(dice.values()) {
        *flag = value == target;
    }
    KeepMask::new(keep)
}

fn pick_category(game: &Game, dice: &Dice) -> Category {
    // Open slots only: a Yahtzee bonus fills nothing, so constant dice
    // would never finish the card.
    // Earliest category wins ties, so zeros go into the upper section first.
    let card = game.scorecard();
    let mut best: Option<(Category, u32)> = None;
    for (category, score) in card.preview(dice) {
        if card.is_scored(category) {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((category, score));
        }
    }
    best.map(|(category, _)| category).unwrap_or(Category::Chance)
}
