// ABOUTME: The per-game scorecard: thirteen category slots plus bonuses.
// ABOUTME: All score mutation goes through assign; final_score needs a full card.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::roller::Dice;
use crate::scoring::{self, YAHTZEE_POINTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Upper-section total needed to earn the upper bonus.
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
/// Points awarded once the upper section reaches the threshold.
pub const UPPER_BONUS_POINTS: u32 = 35;
/// Points per extra Yahtzee rolled after the YAHTZEE slot holds 50.
pub const YAHTZEE_BONUS_POINTS: u32 = 100;

/// Result of a successful [`Scorecard::assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub category: Category,
    /// Points written to the slot (0 for a Yahtzee bonus).
    pub score: u32,
    /// True when the assignment credited a Yahtzee bonus instead of
    /// filling a slot.
    pub yahtzee_bonus: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    slots: [Option<u32>; Category::COUNT],
    bonus_points: u32,
    yahtzee_bonus_count: u32,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score held by `category`, or `None` if it has not been scored.
    pub fn slot(&self, category: Category) -> Option<u32> {
        self.slots[category.index()]
    }

    pub fn is_scored(&self, category: Category) -> bool {
        self.slot(category).is_some()
    }

    /// Record `dice` in `category`.
    ///
    /// A slot can be written once, even when it scores 0. The single
    /// exception is a repeat five of a kind assigned to YAHTZEE while that
    /// slot already holds 50: the slot is left alone and the Yahtzee bonus
    /// counter goes up.
    pub fn assign(&mut self, category: Category, dice: &Dice) -> Result<Assignment> {
        match self.slot(category) {
            None => {
                let score = scoring::score(dice, category, self);
                self.slots[category.index()] = Some(score);
                if self.bonus_points == 0 && self.upper_section_total() >= UPPER_BONUS_THRESHOLD {
                    self.bonus_points = UPPER_BONUS_POINTS;
                    info!(upper_total = self.upper_section_total(), "Upper bonus earned");
                }
                Ok(Assignment {
                    category,
                    score,
                    yahtzee_bonus: false,
                })
            }
            Some(_) if category == Category::Yahtzee && self.yahtzee_bonus_available(dice) => {
                self.yahtzee_bonus_count += 1;
                info!(count = self.yahtzee_bonus_count, "Yahtzee bonus");
                Ok(Assignment {
                    category,
                    score: 0,
                    yahtzee_bonus: true,
                })
            }
            Some(_) => Err(Error::AlreadyScored(category)),
        }
    }

    /// Sum of the scored upper-section slots.
    pub fn upper_section_total(&self) -> u32 {
        Category::UPPER.iter().filter_map(|&c| self.slot(c)).sum()
    }

    /// Sum of the scored lower-section slots.
    pub fn lower_total(&self) -> u32 {
        Category::ALL
            .iter()
            .filter(|c| !c.is_upper())
            .filter_map(|&c| self.slot(c))
            .sum()
    }

    /// Upper-section bonus earned so far: 35 or 0.
    pub fn bonus_points(&self) -> u32 {
        self.bonus_points
    }

    /// Extra Yahtzees credited after the YAHTZEE slot was filled with 50.
    pub fn yahtzee_bonus_count(&self) -> u32 {
        self.yahtzee_bonus_count
    }

    /// True once all thirteen slots are scored, whatever their values.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Categories that can still be scored.
    pub fn open_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&c| !self.is_scored(c))
            .collect()
    }

    /// True when assigning `dice` to YAHTZEE would credit a bonus.
    pub fn yahtzee_bonus_available(&self, dice: &Dice) -> bool {
        self.slot(Category::Yahtzee) == Some(YAHTZEE_POINTS) && scoring::is_yahtzee(dice)
    }

    /// What `dice` would score in each category that accepts them.
    ///
    /// Open categories are listed with their slot score. A filled YAHTZEE
    /// slot is listed with 0 when [`yahtzee_bonus_available`] holds, since
    /// the bonus adds to the counter rather than the slot.
    ///
    /// [`yahtzee_bonus_available`]: Scorecard::yahtzee_bonus_available
    pub fn preview(&self, dice: &Dice) -> Vec<(Category, u32)> {
        let bonus = self.yahtzee_bonus_available(dice);
        Category::ALL
            .into_iter()
            .filter_map(|c| match self.slot(c) {
                None => Some((c, scoring::score(dice, c, self))),
                Some(_) if c == Category::Yahtzee && bonus => Some((c, 0)),
                Some(_) => None,
            })
            .collect()
    }

    /// Running total of everything scored so far, bonuses included.
    pub fn total(&self) -> u32 {
        self.upper_section_total()
            + self.lower_total()
            + self.bonus_points
            + self.yahtzee_bonus_count * YAHTZEE_BONUS_POINTS
    }

    /// Final score of a completed card.
    pub fn final_score(&self) -> Result<u32> {
        if !self.is_complete() {
            return Err(Error::NotComplete);
        }
        Ok(self.total())
    }

    pub fn snapshot(&self) -> ScorecardSnapshot {
        ScorecardSnapshot {
            scores: Category::ALL.into_iter().map(|c| (c, self.slot(c))).collect(),
            upper_section_total: self.upper_section_total(),
            bonus_points: self.bonus_points,
            yahtzee_bonus_count: self.yahtzee_bonus_count,
            total: self.total(),
            is_complete: self.is_complete(),
        }
    }
}

impl fmt::Display for Scorecard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in Category::ALL {
            let score = match self.slot(category) {
                Some(s) => s.to_string(),
                None => "-".to_string(),
            };
            writeln!(f, "{:<16}{:>5}", category.name(), score)?;
            if category == Category::Sixes {
                writeln!(f, "{:<16}{:>5}", "UPPER_BONUS", self.bonus_points)?;
            }
        }
        writeln!(f, "{:<16}{:>5}", "YAHTZEE_BONUS", self.yahtzee_bonus_count * YAHTZEE_BONUS_POINTS)?;
        write!(f, "{:<16}{:>5}", "TOTAL", self.total())
    }
}

/// Serializable view of a scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardSnapshot {
    pub scores: BTreeMap<Category, Option<u32>>,
    pub upper_section_total: u32,
    pub bonus_points: u32,
    pub yahtzee_bonus_count: u32,
    pub total: u32,
    pub is_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(values: [u8; 5]) -> Dice {
        Dice::new(values).unwrap()
    }

    /// Fill every open slot with the same low roll.
    fn fill_remaining(card: &mut Scorecard) {
        for category in card.open_categories() {
            card.assign(category, &dice([1, 1, 2, 2, 4])).unwrap();
        }
    }

    #[test]
    fn test_new_card_is_empty() {
        let card = Scorecard::new();
        assert!(Category::ALL.iter().all(|&c| card.slot(c).is_none()));
        assert_eq!(card.bonus_points(), 0);
        assert_eq!(card.yahtzee_bonus_count(), 0);
        assert!(!card.is_complete());
        assert_eq!(card.open_categories().len(), 13);
    }

    #[test]
    fn test_assign_writes_slot() {
        let mut card = Scorecard::new();
        let assignment = card.assign(Category::Aces, &dice([1, 1, 1, 4, 5])).unwrap();
        assert_eq!(assignment.score, 3);
        assert!(!assignment.yahtzee_bonus);
        assert_eq!(card.slot(Category::Aces), Some(3));
    }

    #[test]
    fn test_assign_twice_fails_even_for_zero() {
        let mut card = Scorecard::new();
        let first = card.assign(Category::FullHouse, &dice([1, 2, 3, 4, 6])).unwrap();
        assert_eq!(first.score, 0);
        let err = card.assign(Category::FullHouse, &dice([2, 2, 2, 3, 3])).unwrap_err();
        assert_eq!(err, Error::AlreadyScored(Category::FullHouse));
        assert_eq!(card.slot(Category::FullHouse), Some(0));
    }

    #[test]
    fn test_upper_bonus_after_last_upper_assign() {
        let mut card = Scorecard::new();
        card.assign(Category::Aces, &dice([1, 1, 1, 4, 5])).unwrap();
        card.assign(Category::Twos, &dice([2, 2, 1, 4, 5])).unwrap();
        card.assign(Category::Threes, &dice([3, 3, 3, 4, 5])).unwrap();
        card.assign(Category::Fours, &dice([4, 4, 1, 2, 5])).unwrap();
        card.assign(Category::Fives, &dice([5, 5, 1, 2, 3])).unwrap();
        assert_eq!(card.bonus_points(), 0);
        card.assign(Category::Sixes, &dice([6, 6, 6, 6, 6])).unwrap();
        assert_eq!(card.upper_section_total(), 64);
        assert_eq!(card.bonus_points(), 35);
    }

    #[test]
    fn test_upper_bonus_not_earned_below_threshold() {
        let mut card = Scorecard::new();
        for category in Category::UPPER {
            card.assign(category, &dice([1, 2, 3, 4, 5])).unwrap();
        }
        assert_eq!(card.upper_section_total(), 15);
        assert_eq!(card.bonus_points(), 0);
    }

    #[test]
    fn test_yahtzee_bonus_keeps_slot() {
        let mut card = Scorecard::new();
        let five = dice([5, 5, 5, 5, 5]);
        assert_eq!(card.assign(Category::Yahtzee, &five).unwrap().score, 50);

        let bonus = card.assign(Category::Yahtzee, &five).unwrap();
        assert!(bonus.yahtzee_bonus);
        assert_eq!(bonus.score, 0);
        assert_eq!(card.slot(Category::Yahtzee), Some(50));
        assert_eq!(card.yahtzee_bonus_count(), 1);

        card.assign(Category::Yahtzee, &dice([2, 2, 2, 2, 2])).unwrap();
        assert_eq!(card.yahtzee_bonus_count(), 2);
    }

    #[test]
    fn test_yahtzee_repeat_without_five_of_a_kind_rejected() {
        let mut card = Scorecard::new();
        card.assign(Category::Yahtzee, &dice([5, 5, 5, 5, 5])).unwrap();
        let err = card.assign(Category::Yahtzee, &dice([5, 5, 5, 5, 4])).unwrap_err();
        assert_eq!(err, Error::AlreadyScored(Category::Yahtzee));
        assert_eq!(card.yahtzee_bonus_count(), 0);
    }

    #[test]
    fn test_no_yahtzee_bonus_after_zero() {
        let mut card = Scorecard::new();
        assert_eq!(card.assign(Category::Yahtzee, &dice([1, 2, 3, 4, 5])).unwrap().score, 0);
        let err = card.assign(Category::Yahtzee, &dice([6, 6, 6, 6, 6])).unwrap_err();
        assert_eq!(err, Error::AlreadyScored(Category::Yahtzee));
        assert_eq!(card.yahtzee_bonus_count(), 0);
        assert_eq!(card.slot(Category::Yahtzee), Some(0));
    }

    #[test]
    fn test_final_score_requires_complete_card() {
        let mut card = Scorecard::new();
        assert_eq!(card.final_score(), Err(Error::NotComplete));
        for category in Category::ALL.iter().take(12) {
            card.assign(*category, &dice([1, 1, 2, 2, 4])).unwrap();
        }
        assert_eq!(card.final_score(), Err(Error::NotComplete));
        fill_remaining(&mut card);
        assert!(card.is_complete());
        assert!(card.final_score().is_ok());
    }

    #[test]
    fn test_final_score_includes_bonuses() {
        let mut card = Scorecard::new();
        let five = dice([6, 6, 6, 6, 6]);
        card.assign(Category::Yahtzee, &five).unwrap();
        card.assign(Category::Yahtzee, &five).unwrap();
        card.assign(Category::Sixes, &five).unwrap();
        card.assign(Category::Fives, &dice([5, 5, 5, 5, 1])).unwrap();
        card.assign(Category::Fours, &dice([4, 4, 4, 1, 1])).unwrap();
        card.assign(Category::Chance, &five).unwrap();
        fill_remaining(&mut card);

        // Upper: 2 + 4 + 0 + 12 + 20 + 30 = 68, bonus 35.
        // Lower: yahtzee 50 + chance 30, everything else 0.
        assert_eq!(card.upper_section_total(), 68);
        assert_eq!(card.bonus_points(), 35);
        assert_eq!(card.lower_total(), 80);
        assert_eq!(card.final_score(), Ok(68 + 35 + 80 + 100));
    }

    #[test]
    fn test_preview_lists_open_categories() {
        let mut card = Scorecard::new();
        card.assign(Category::Chance, &dice([1, 1, 1, 1, 1])).unwrap();
        let preview = card.preview(&dice([2, 2, 2, 3, 3]));
        assert_eq!(preview.len(), 12);
        assert!(preview.contains(&(Category::FullHouse, 25)));
        assert!(preview.contains(&(Category::ThreeOfAKind, 12)));
        assert!(!preview.iter().any(|(c, _)| *c == Category::Chance));
    }

    #[test]
    fn test_preview_offers_yahtzee_bonus() {
        let mut card = Scorecard::new();
        let fives = dice([5, 5, 5, 5, 5]);
        assert!(!card.yahtzee_bonus_available(&fives));
        card.assign(Category::Yahtzee, &fives).unwrap();

        let sixes = dice([6, 6, 6, 6, 6]);
        assert!(card.yahtzee_bonus_available(&sixes));
        let preview = card.preview(&sixes);
        assert_eq!(preview.len(), 13);
        assert!(preview.contains(&(Category::Yahtzee, 0)));
        assert!(preview.contains(&(Category::Sixes, 30)));

        let preview = card.preview(&dice([6, 6, 6, 6, 5]));
        assert_eq!(preview.len(), 12);
        assert!(!preview.iter().any(|(c, _)| *c == Category::Yahtzee));
    }

    #[test]
    fn test_no_bonus_offered_after_zero_yahtzee() {
        let mut card = Scorecard::new();
        card.assign(Category::Yahtzee, &dice([1, 2, 3, 4, 5])).unwrap();
        let sixes = dice([6, 6, 6, 6, 6]);
        assert!(!card.yahtzee_bonus_available(&sixes));
        assert!(!card.preview(&sixes).iter().any(|(c, _)| *c == Category::Yahtzee));
    }

    #[test]
    fn test_scorecard_serde_keeps_bonuses() {
        let mut card = Scorecard::new();
        for (category, values) in [
            (Category::Sixes, [6, 6, 6, 6, 1]),
            (Category::Fives, [5, 5, 5, 5, 1]),
            (Category::Fours, [4, 4, 4, 4, 1]),
            (Category::Yahtzee, [3, 3, 3, 3, 3]),
            (Category::Yahtzee, [2, 2, 2, 2, 2]),
        ] {
            card.assign(category, &dice(values)).unwrap();
        }
        assert_eq!(card.bonus_points(), 35);

        let json = serde_json::to_string(&card).unwrap();
        let restored: Scorecard = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, card);
        assert_eq!(restored.yahtzee_bonus_count(), 1);
        assert_eq!(restored.total(), card.total());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut card = Scorecard::new();
        card.assign(Category::Aces, &dice([1, 1, 1, 4, 5])).unwrap();
        let snapshot = card.snapshot();
        assert_eq!(snapshot.scores[&Category::Aces], Some(3));
        assert_eq!(snapshot.scores[&Category::Chance], None);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["scores"]["ACES"], 3);
        assert!(json["scores"]["CHANCE"].is_null());
    }

    #[test]
    fn test_display_lists_every_category() {
        let card = Scorecard::new();
        let text = card.to_string();
        for category in Category::ALL {
            assert!(text.contains(category.name()));
        }
        assert!(text.contains("TOTAL"));
    }
}
