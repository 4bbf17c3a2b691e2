use std::sync::Arc;

use chrono::NaiveDateTime;
use log::{error, warn};
use serde::Serialize;
use serde_json::Value;

use crate::store::StateStore;

/// A configuration domain: one value persisted as a single JSON document
/// under a fixed storage key.
pub trait DomainConfig: Serialize + Clone {
    /// Storage key the domain lives under.
    const KEY: &'static str;

    /// Merge possibly malformed persisted JSON over the built-in defaults,
    /// yielding a fully populated value. Must be pure and idempotent.
    fn reconcile(raw: &Value, builtin: &Self) -> Self;
}

/// Typed repository for one domain. Holds the current value in memory and
/// writes it back to the store after every change. Domains are independent:
/// a failure here never touches another domain's data.
pub struct Domain<T: DomainConfig> {
    store: Arc<dyn StateStore>,
    current: T,
}

impl<T: DomainConfig> Domain<T> {
    /// Read the persisted document, reconcile it against `builtin`, and keep
    /// the result as the current value. Missing or corrupt data degrades to
    /// the defaults instead of failing.
    pub fn load(store: Arc<dyn StateStore>, builtin: T) -> Self {
        let current = match store.get(T::KEY) {
            Some(text) => match serde_json::from_str::<Value>(&text) {
                Ok(raw) => T::reconcile(&raw, &builtin),
                Err(e) => {
                    warn!("Discarding corrupt state under '{}': {}", T::KEY, e);
                    builtin
                }
            },
            None => builtin,
        };
        Domain { store, current }
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    /// Replace the current value and persist it.
    pub fn replace(&mut self, value: T) {
        self.current = value;
        self.persist();
    }

    /// Apply a pure updater to the current value, then persist the result.
    /// A failed write is logged; the in-memory value still advances so the
    /// page keeps reflecting what the user did.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        self.current = f(&self.current);
        self.persist();
    }

    /// When this domain was last written to storage.
    pub fn last_saved(&self) -> Option<NaiveDateTime> {
        self.store.last_saved(T::KEY)
    }

    fn persist(&self) {
        let text = match serde_json::to_string(&self.current) {
            Ok(t) => t,
            Err(e) => {
                error!("Failed to serialize state under '{}': {}", T::KEY, e);
                return;
            }
        };
        if let Err(e) = self.store.set(T::KEY, &text) {
            error!("Failed to persist state under '{}': {}", T::KEY, e);
        }
    }
}
