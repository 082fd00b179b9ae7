// ABOUTME: Host-facing entry points: create a game, open/reroll/score turns.
// ABOUTME: Loads and saves games through a GameStore and reports final scores.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::game::{Game, ScoreReport};
use crate::recorder::{PlayerStats, ScoreRecorder};
use crate::roller::{FastRng, KeepMask, Rng};
use crate::turn::TurnSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::info;

/// Identifier of a stored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistence for games.
///
/// Loads must never observe a half-written game; the engine only saves a
/// game after an operation on it has fully succeeded.
pub trait GameStore {
    /// Store a new game and allocate its id.
    fn insert(&mut self, game: Game) -> Result<GameId>;
    fn load(&self, id: GameId) -> Result<Game>;
    fn save(&mut self, id: GameId, game: Game) -> Result<()>;
    fn remove(&mut self, id: GameId) -> Result<Game>;
}

/// In-process game store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: HashMap<GameId, Game>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameStore for MemoryStore {
    fn insert(&mut self, game: Game) -> Result<GameId> {
        self.next_id += 1;
        let id = GameId(self.next_id);
        self.games.insert(id, game);
        Ok(id)
    }

    fn load(&self, id: GameId) -> Result<Game> {
        self.games.get(&id).cloned().ok_or(Error::UnknownGame(id))
    }

    fn save(&mut self, id: GameId, game: Game) -> Result<()> {
        match self.games.get_mut(&id) {
            Some(slot) => {
                *slot = game;
                Ok(())
            }
            None => Err(Error::UnknownGame(id)),
        }
    }

    fn remove(&mut self, id: GameId) -> Result<Game> {
        self.games.remove(&id).ok_or(Error::UnknownGame(id))
    }
}

/// The rules engine as seen by a request-handling host.
///
/// Every mutating call takes `&mut self`, so a host sharing one engine
/// across threads must wrap it in a lock.
pub struct Engine<S: GameStore, C: ScoreRecorder, R: Rng> {
    store: S,
    recorder: C,
    rng: R,
}

impl Engine<MemoryStore, PlayerStats, FastRng> {
    /// Engine backed by memory with an entropy-seeded RNG.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), PlayerStats::new(), FastRng::new())
    }

    /// Engine backed by memory with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self::new(MemoryStore::new(), PlayerStats::new(), FastRng::with_seed(seed))
    }
}

impl<S: GameStore, C: ScoreRecorder, R: Rng> Engine<S, C, R> {
    pub fn new(store: S, recorder: C, rng: R) -> Self {
        Self {
            store,
            recorder,
            rng,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn recorder(&self) -> &C {
        &self.recorder
    }

    pub fn create_game(&mut self, owner: &str) -> Result<GameId> {
        let id = self.store.insert(Game::new(owner))?;
        info!(%id, owner, "Created game");
        Ok(id)
    }

    /// Read-only copy of a game.
    pub fn game(&self, id: GameId) -> Result<Game> {
        self.store.load(id)
    }

    pub fn open_turn(&mut self, id: GameId) -> Result<TurnSnapshot> {
        let mut game = self.store.load(id)?;
        let snapshot = game.open_turn(&mut self.rng)?;
        self.store.save(id, game)?;
        Ok(snapshot)
    }

    pub fn reroll(&mut self, id: GameId, keep: KeepMask) -> Result<TurnSnapshot> {
        let mut game = self.store.load(id)?;
        let snapshot = game.reroll(keep, &mut self.rng)?;
        self.store.save(id, game)?;
        Ok(snapshot)
    }

    /// Score the open turn. When this finishes the game, the final score
    /// is handed to the recorder before returning.
    pub fn score_turn(&mut self, id: GameId, category: Category) -> Result<ScoreReport> {
        let mut game = self.store.load(id)?;
        let report = game.score_turn(category)?;
        let owner = game.owner().to_string();
        self.store.save(id, game)?;
        if let Some(final_score) = report.final_score {
            self.recorder.record(&owner, final_score);
        }
        Ok(report)
    }

    /// Discard an unfinished game.
    pub fn cancel_game(&mut self, id: GameId) -> Result<()> {
        let game = self.store.load(id)?;
        game.cancel()?;
        self.store.remove(id)?;
        Ok(())
    }
}
