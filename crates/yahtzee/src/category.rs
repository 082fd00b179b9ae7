// ABOUTME: The thirteen scoring categories of a Yahtzee scorecard.
// ABOUTME: Provides section membership, parsing, and display names.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A scorecard category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Aces,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

impl Category {
    /// Number of categories on a scorecard.
    pub const COUNT: usize = 13;

    /// All categories in scorecard order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// The upper section, ACES through SIXES.
    pub const UPPER: [Category; 6] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// Position of this category in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns true for ACES through SIXES.
    pub fn is_upper(self) -> bool {
        self.face().is_some()
    }

    /// The die face counted by an upper-section category.
    pub fn face(self) -> Option<u8> {
        match self {
            Category::Aces => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    /// Canonical upper-case name, as used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Category::Aces => "ACES",
            Category::Twos => "TWOS",
            Category::Threes => "THREES",
            Category::Fours => "FOURS",
            Category::Fives => "FIVES",
            Category::Sixes => "SIXES",
            Category::ThreeOfAKind => "THREE_OF_A_KIND",
            Category::FourOfAKind => "FOUR_OF_A_KIND",
            Category::FullHouse => "FULL_HOUSE",
            Category::SmallStraight => "SMALL_STRAIGHT",
            Category::LargeStraight => "LARGE_STRAIGHT",
            Category::Yahtzee => "YAHTZEE",
            Category::Chance => "CHANCE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parses a category name case-insensitively. Spaces and dashes are
    /// accepted in place of underscores, so "full house" and "full-house"
    /// both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        Category::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("unknown category '{}'", s.trim())))
    }
}
