//! In-memory registry of live matches.
//!
//! Every match sits behind its own mutex so moves on one match are applied
//! by a single writer at a time while other matches proceed independently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::core::{
    build_ship_index, Coord, Fleet, GameError, MatchState, MoveResult, PublicMatchView, Rules,
    RulesOverrides, ShipIndex, Side,
};

/// Returned when creating a match whose id is already registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("match with id {0:?} already exists")]
pub struct DuplicateMatchId(pub String);

/// One match plus the caches derived from it.
#[derive(Debug)]
pub struct MatchSession {
    state: MatchState,
    index_a: ShipIndex,
    index_b: ShipIndex,
    rng: SmallRng,
    replies: HashMap<(Side, String), (Coord, MoveResult)>,
}

impl MatchSession {
    pub fn new(state: MatchState, rng: SmallRng) -> Self {
        Self {
            state,
            index_a: ShipIndex::default(),
            index_b: ShipIndex::default(),
            rng,
            replies: HashMap::new(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn public_state(&self, player: Side) -> PublicMatchView {
        self.state.public_state(player)
    }

    /// Place a fleet and rebuild that side's ship index.
    pub fn place_fleet(&mut self, player: Side, fleet: Fleet) -> Result<(), GameError> {
        self.state.place_fleet(player, fleet, &mut self.rng)?;
        let index = build_ship_index(&self.state.board(player).ships);
        match player {
            Side::A => self.index_a = index,
            Side::B => self.index_b = index,
        }
        Ok(())
    }

    pub fn apply_move(&mut self, attacker: Side, coord: Coord) -> Result<MoveResult, GameError> {
        self.state
            .apply_move(attacker, coord, &self.index_a, &self.index_b)
    }

    /// Apply a move at most once per `(attacker, key)`. A repeat with the
    /// same coordinate replays the stored result; a repeat aimed elsewhere
    /// fails with `IDEMPOTENT_REPLAY`. Failed moves are not remembered.
    pub fn submit_move(
        &mut self,
        attacker: Side,
        coord: Coord,
        key: &str,
    ) -> Result<MoveResult, GameError> {
        let slot = (attacker, key.to_string());
        if let Some((stored_coord, result)) = self.replies.get(&slot) {
            if *stored_coord != coord {
                return Err(GameError::IdempotentReplay {
                    key: key.to_string(),
                });
            }
            return Ok(result.clone());
        }
        let result = self.apply_move(attacker, coord)?;
        self.replies.insert(slot, (coord, result.clone()));
        Ok(result)
    }
}

pub type MatchHandle = Arc<Mutex<MatchSession>>;

/// Lock a session, recovering it if a previous holder panicked.
pub fn lock(handle: &MatchHandle) -> MutexGuard<'_, MatchSession> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keyed collection of match sessions.
#[derive(Debug)]
pub struct MatchStore {
    matches: Mutex<HashMap<String, MatchHandle>>,
    seeder: Mutex<SmallRng>,
}

impl MatchStore {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_rng(&mut rand::rng()))
    }

    /// Store whose matches draw their first mover from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(seeder: SmallRng) -> Self {
        Self {
            matches: Mutex::new(HashMap::new()),
            seeder: Mutex::new(seeder),
        }
    }

    fn matches(&self) -> MutexGuard<'_, HashMap<String, MatchHandle>> {
        self.matches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(
        &self,
        id: &str,
        overrides: RulesOverrides,
    ) -> Result<MatchHandle, DuplicateMatchId> {
        let mut matches = self.matches();
        if matches.contains_key(id) {
            return Err(DuplicateMatchId(id.to_string()));
        }
        let seed: u64 = self
            .seeder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random();
        let state = MatchState::new(id, Rules::with_overrides(overrides));
        let handle = Arc::new(Mutex::new(MatchSession::new(
            state,
            SmallRng::seed_from_u64(seed),
        )));
        matches.insert(id.to_string(), Arc::clone(&handle));
        debug!("store: created match {}", id);
        Ok(handle)
    }

    pub fn get(&self, id: &str) -> Option<MatchHandle> {
        self.matches().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<MatchHandle> {
        let removed = self.matches().remove(id);
        if removed.is_some() {
            debug!("store: removed match {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.matches().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches().is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.matches().keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for MatchStore {
    fn default() -> Self {
        Self::new()
    }
}
