// ABOUTME: Turn state machine: one initial roll, up to two rerolls, then scoring.
// ABOUTME: Holds the dice for the turn but never touches the scorecard.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::roller::{Dice, KeepMask, Rng};
use serde::{Deserialize, Serialize};

/// Maximum rolls in one turn, the initial roll included.
pub const MAX_ROLLS: u8 = 3;

/// Where a turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TurnState {
    AwaitingFirstRoll,
    /// Dice are on the table after `roll_count` rolls.
    Rolled { dice: Dice, roll_count: u8 },
    /// The final dice were scored in `category`.
    Complete {
        dice: Dice,
        roll_count: u8,
        category: Category,
    },
}

/// A single turn of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    number: u32,
    state: TurnState,
}

impl Turn {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            state: TurnState::AwaitingFirstRoll,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn dice(&self) -> Option<Dice> {
        match self.state {
            TurnState::AwaitingFirstRoll => None,
            TurnState::Rolled { dice, .. } | TurnState::Complete { dice, .. } => Some(dice),
        }
    }

    pub fn roll_count(&self) -> u8 {
        match self.state {
            TurnState::AwaitingFirstRoll => 0,
            TurnState::Rolled { roll_count, .. } | TurnState::Complete { roll_count, .. } => roll_count,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, TurnState::Complete { .. })
    }

    /// Roll all five dice to start the turn.
    pub fn first_roll(&mut self, rng: &mut impl Rng) -> Result<Dice> {
        match self.state {
            TurnState::AwaitingFirstRoll => {
                let dice = Dice::roll(rng)?;
                self.state = TurnState::Rolled { dice, roll_count: 1 };
                Ok(dice)
            }
            TurnState::Rolled { .. } => Err(Error::TurnInProgress),
            TurnState::Complete { .. } => Err(Error::TurnComplete),
        }
    }

    /// Reroll the dice not marked in `keep`.
    pub fn reroll_keeping(&mut self, keep: KeepMask, rng: &mut impl Rng) -> Result<Dice> {
        match self.state {
            TurnState::AwaitingFirstRoll => Err(Error::NotRolled),
            TurnState::Complete { .. } => Err(Error::TurnComplete),
            TurnState::Rolled { roll_count, .. } if roll_count >= MAX_ROLLS => {
                Err(Error::MaxRollsReached(MAX_ROLLS))
            }
            TurnState::Rolled { dice, roll_count } => {
                let dice = dice.reroll_keeping(keep, rng)?;
                self.state = TurnState::Rolled {
                    dice,
                    roll_count: roll_count + 1,
                };
                Ok(dice)
            }
        }
    }

    /// Dice that may be scored right now.
    pub fn scorable_dice(&self) -> Result<Dice> {
        match self.state {
            TurnState::AwaitingFirstRoll => Err(Error::NotRolled),
            TurnState::Rolled { dice, .. } => Ok(dice),
            TurnState::Complete { .. } => Err(Error::TurnComplete),
        }
    }

    /// Close the turn after its dice were scored in `category`.
    pub fn complete(&mut self, category: Category) -> Result<()> {
        let dice = self.scorable_dice()?;
        self.state = TurnState::Complete {
            dice,
            roll_count: self.roll_count(),
            category,
        };
        Ok(())
    }

    /// Snapshot for the host, available once the dice have been rolled.
    pub fn snapshot(&self) -> Option<TurnSnapshot> {
        self.dice().map(|dice| TurnSnapshot {
            number: self.number,
            dice,
            roll_count: self.roll_count(),
            is_complete: self.is_complete(),
        })
    }
}

/// Serializable view of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub number: u32,
    pub dice: Dice,
    pub roll_count: u8,
    pub is_complete: bool,
}
