//! # Run-Once Guards
//!
//! File: cli/src/blueprint/guard.rs
//!
//! ## Overview
//!
//! Process-scoped bookkeeping for things that must happen at most once:
//! constructing a singleton blueprint kind, wiring build aliases in `setup`.
//!
//! ## Architecture
//!
//! A [`GuardRegistry`] maps `(owner, name)` keys to a state. Keys are never
//! removed, so every guard is single-use:
//! - [`GuardRegistry::run_once`] returns `true` for the first call per key.
//! - [`GuardRegistry::run_once_blocking`] hands a [`GuardRelease`] to the
//!   first caller only. Everyone else gets `None` right away, both while the
//!   guard is held and after it has been released.
//!
//! Blueprints receive the registry at construction. [`GuardRegistry::process`]
//! returns the shared process-wide instance; tests construct their own.
//!
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::trace;

type GuardKey = (String, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    Spent,
    Held,
    Released,
}

#[derive(Debug, Default)]
pub struct GuardRegistry {
    state: Mutex<HashMap<GuardKey, GuardState>>,
}

static PROCESS_GUARDS: OnceLock<Arc<GuardRegistry>> = OnceLock::new();

impl GuardRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The registry shared by the whole process.
    pub fn process() -> Arc<Self> {
        Arc::clone(PROCESS_GUARDS.get_or_init(GuardRegistry::new))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<GuardKey, GuardState>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns `true` the first time it is called for `(owner, name)`.
    pub fn run_once(&self, owner: &str, name: &str) -> bool {
        let key = (owner.to_string(), name.to_string());
        let mut state = self.lock();
        if state.contains_key(&key) {
            trace!("Guard {}::{} already used", owner, name);
            return false;
        }
        state.insert(key, GuardState::Spent);
        true
    }

    /// Returns a release handle to the first caller for `(owner, name)`.
    ///
    /// Rejection never waits: callers that lose get `None` immediately.
    pub fn run_once_blocking(self: &Arc<Self>, owner: &str, name: &str) -> Option<GuardRelease> {
        let key = (owner.to_string(), name.to_string());
        let mut state = self.lock();
        if state.contains_key(&key) {
            trace!("Blocking guard {}::{} rejected", owner, name);
            return None;
        }
        state.insert(key.clone(), GuardState::Held);
        Some(GuardRelease {
            registry: Arc::clone(self),
            key,
        })
    }

    /// `true` while a blocking guard's release handle is alive.
    pub fn is_held(&self, owner: &str, name: &str) -> bool {
        self.lock().get(&(owner.to_string(), name.to_string())) == Some(&GuardState::Held)
    }
}

/// Release handle returned by [`GuardRegistry::run_once_blocking`].
/// Dropping it releases the guard too.
#[derive(Debug)]
pub struct GuardRelease {
    registry: Arc<GuardRegistry>,
    key: GuardKey,
}

impl GuardRelease {
    pub fn release(self) {}
}

impl Drop for GuardRelease {
    fn drop(&mut self) {
        let mut state = self.registry.lock();
        state.insert(self.key.clone(), GuardState::Released);
    }
}
