// ABOUTME: A single-player game: a sequence of turns feeding one scorecard.
// ABOUTME: Tracks move history and closes itself when the scorecard fills up.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::roller::{Dice, KeepMask, Rng};
use crate::scorecard::{Scorecard, ScorecardSnapshot};
use crate::turn::{Turn, TurnSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One entry in a game's move log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry {
    Roll {
        turn: u32,
        roll_count: u8,
        dice: Dice,
    },
    Score {
        turn: u32,
        category: Category,
        score: u32,
        yahtzee_bonus: bool,
    },
}

/// Outcome of scoring a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub turn: u32,
    pub category: Category,
    pub score: u32,
    pub yahtzee_bonus: bool,
    pub scorecard: ScorecardSnapshot,
    pub game_over: bool,
    /// Set only by the call that finished the game.
    pub final_score: Option<u32>,
}

/// Everything needed to resume a game, serializable for external stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    owner: String,
    turn_count: u32,
    game_over: bool,
    history: Vec<HistoryEntry>,
    scorecard: Scorecard,
    current: Option<Turn>,
    final_score: Option<u32>,
}

impl Game {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            turn_count: 0,
            game_over: false,
            history: Vec::new(),
            scorecard: Scorecard::new(),
            current: None,
            final_score: None,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    /// The most recent turn, complete or not.
    pub fn current_turn(&self) -> Option<&Turn> {
        self.current.as_ref()
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Start the next turn and make its first roll.
    pub fn open_turn(&mut self, rng: &mut impl Rng) -> Result<TurnSnapshot> {
        if self.game_over {
            return Err(Error::GameOver);
        }
        if self.current.as_ref().is_some_and(|t| !t.is_complete()) {
            return Err(Error::TurnInProgress);
        }

        let mut turn = Turn::new(self.turn_count + 1);
        let dice = turn.first_roll(rng)?;
        self.turn_count = turn.number();
        debug!(turn = turn.number(), %dice, "Opened turn");
        self.record_roll(&turn, dice);
        let snapshot = turn.snapshot().ok_or(Error::NotRolled)?;
        self.current = Some(turn);
        Ok(snapshot)
    }

    /// Reroll the open turn's dice, keeping those marked in `keep`.
    pub fn reroll(&mut self, keep: KeepMask, rng: &mut impl Rng) -> Result<TurnSnapshot> {
        if self.game_over {
            return Err(Error::GameOver);
        }
        let turn = self.current.as_mut().ok_or(Error::NoTurnInProgress)?;
        let dice = turn.reroll_keeping(keep, rng)?;
        debug!(turn = turn.number(), roll_count = turn.roll_count(), %dice, "Rerolled");
        let snapshot = turn.snapshot().ok_or(Error::NotRolled)?;
        self.history.push(HistoryEntry::Roll {
            turn: snapshot.number,
            roll_count: snapshot.roll_count,
            dice,
        });
        Ok(snapshot)
    }

    /// Score the open turn's dice in `category`.
    ///
    /// When this fills the scorecard the game ends and the returned report
    /// carries the final score. That is the only report that ever does.
    pub fn score_turn(&mut self, category: Category) -> Result<ScoreReport> {
        if self.game_over {
            return Err(Error::GameOver);
        }
        let turn = self.current.as_mut().ok_or(Error::NoTurnInProgress)?;
        let dice = turn.scorable_dice()?;
        let assignment = self.scorecard.assign(category, &dice)?;
        turn.complete(category)?;
        let number = turn.number();

        info!(turn = number, %category, score = assignment.score, "Scored");
        self.history.push(HistoryEntry::Score {
            turn: number,
            category,
            score: assignment.score,
            yahtzee_bonus: assignment.yahtzee_bonus,
        });

        let final_score = if self.scorecard.is_complete() {
            let total = self.scorecard.final_score()?;
            self.game_over = true;
            self.final_score = Some(total);
            info!(owner = %self.owner, turns = self.turn_count, final_score = total, "Game over");
            Some(total)
        } else {
            None
        };

        Ok(ScoreReport {
            turn: number,
            category,
            score: assignment.score,
            yahtzee_bonus: assignment.yahtzee_bonus,
            scorecard: self.scorecard.snapshot(),
            game_over: self.game_over,
            final_score,
        })
    }

    /// Abandon an unfinished game.
    pub fn cancel(self) -> Result<()> {
        if self.game_over {
            return Err(Error::GameAlreadyOver);
        }
        info!(owner = %self.owner, turns = self.turn_count, "Game cancelled");
        Ok(())
    }

    fn record_roll(&mut self, turn: &Turn, dice: Dice) {
        self.history.push(HistoryEntry::Roll {
            turn: turn.number(),
            roll_count: turn.roll_count(),
            dice,
        });
    }
}
