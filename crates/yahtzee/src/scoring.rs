// ABOUTME: Category scoring under standard Yahtzee rules.
// ABOUTME: Maps five dice and a category to the points that category earns.

use crate::category::Category;
use crate::roller::Dice;
use crate::scorecard::Scorecard;

pub const FULL_HOUSE_POINTS: u32 = 25;
pub const SMALL_STRAIGHT_POINTS: u32 = 30;
pub const LARGE_STRAIGHT_POINTS: u32 = 40;
pub const YAHTZEE_POINTS: u32 = 50;

const SMALL_STRAIGHTS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];
const LARGE_STRAIGHTS: [[u8; 5]; 2] = [[1, 2, 3, 4, 5], [2, 3, 4, 5, 6]];

/// Points `dice` would earn in `category` on `scorecard`.
///
/// Every category but YAHTZEE depends on the dice alone. Once the YAHTZEE
/// slot is filled, the category itself is worth nothing more; a repeat
/// five of a kind is credited through the scorecard's bonus counter instead.
pub fn score(dice: &Dice, category: Category, scorecard: &Scorecard) -> u32 {
    match category {
        Category::Yahtzee if scorecard.slot(Category::Yahtzee).is_some() => 0,
        _ => raw_score(dice, category),
    }
}

/// Points `dice` earn in `category` on an empty scorecard.
pub fn raw_score(dice: &Dice, category: Category) -> u32 {
    let counts = dice.counts();

    match category {
        Category::Aces
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.face().unwrap_or_default();
            counts[face as usize] as u32 * face as u32
        }
        Category::ThreeOfAKind => {
            if has_n_of_a_kind(&counts, 3) {
                dice.sum()
            } else {
                0
            }
        }
        Category::FourOfAKind => {
            if has_n_of_a_kind(&counts, 4) {
                dice.sum()
            } else {
                0
            }
        }
        Category::FullHouse => {
            if is_full_house(&counts) {
                FULL_HOUSE_POINTS
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if SMALL_STRAIGHTS.iter().any(|run| contains_run(&counts, run)) {
                SMALL_STRAIGHT_POINTS
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if LARGE_STRAIGHTS.iter().any(|run| contains_run(&counts, run)) {
                LARGE_STRAIGHT_POINTS
            } else {
                0
            }
        }
        Category::Yahtzee => {
            if is_yahtzee(dice) {
                YAHTZEE_POINTS
            } else {
                0
            }
        }
        Category::Chance => dice.sum(),
    }
}

/// True when all five dice show the same face.
pub fn is_yahtzee(dice: &Dice) -> bool {
    has_n_of_a_kind(&dice.counts(), 5)
}

fn has_n_of_a_kind(counts: &[u8; 7], n: u8) -> bool {
    counts[1..].iter().any(|&c| c >= n)
}

// Exactly one pair and one triple; five of a kind does not qualify.
fn is_full_house(counts: &[u8; 7]) -> bool {
    counts[1..].contains(&2) && counts[1..].contains(&3)
}

fn contains_run(counts: &[u8; 7], run: &[u8]) -> bool {
    run.iter().all(|&face| counts[face as usize] > 0)
}
