//! Store - reducer runtime with persistence

use crate::clock::Clock;
use crate::storage::{StateStorage, StorageResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// A state slice driven by a pure transition function
pub trait Reducer: Default + Clone + Serialize + DeserializeOwned {
    type Action: fmt::Debug;

    /// Key the slice is persisted under
    const STORAGE_KEY: &'static str;

    /// Compute the next state. Must not read anything except its arguments.
    fn reduce(&self, action: Self::Action, now: DateTime<Utc>) -> Self;
}

/// Owns one state slice, the clock it stamps with and the storage it saves to
pub struct Store<S: Reducer> {
    state: S,
    storage: Box<dyn StateStorage>,
    clock: Rc<dyn Clock>,
}

impl<S: Reducer> Store<S> {
    /// Open a store, rehydrating any state previously saved under its key.
    ///
    /// A blob that no longer parses is quarantined and the store starts from
    /// the default state.
    pub fn open(storage: impl StateStorage + 'static, clock: Rc<dyn Clock>) -> StorageResult<Self> {
        let state = match storage.load(S::STORAGE_KEY)? {
            None => S::default(),
            Some(blob) => match serde_json::from_str::<S>(&blob) {
                Ok(state) => state,
                Err(e) => {
                    warn!(
                        key = S::STORAGE_KEY,
                        error = %e,
                        "failed to parse persisted state, starting fresh"
                    );
                    storage.quarantine(S::STORAGE_KEY)?;
                    S::default()
                }
            },
        };

        info!(key = S::STORAGE_KEY, "store opened");

        Ok(Self {
            state,
            storage: Box::new(storage),
            clock,
        })
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Current time according to the store's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Apply an action and save the resulting state.
    ///
    /// The transition is applied even if saving fails; the error only reports
    /// that the new state did not reach storage.
    pub fn dispatch(&mut self, action: S::Action) -> StorageResult<()> {
        debug!(key = S::STORAGE_KEY, ?action, "dispatch");
        self.state = self.state.reduce(action, self.clock.now());
        self.save()
    }

    /// Write the current state to storage
    pub fn save(&self) -> StorageResult<()> {
        let blob = serde_json::to_string_pretty(&self.state)?;
        self.storage.save(S::STORAGE_KEY, &blob)
    }
}

impl<S: Reducer + fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("key", &S::STORAGE_KEY)
            .field("state", &self.state)
            .finish()
    }
}
