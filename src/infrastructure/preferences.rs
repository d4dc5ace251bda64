//! Persisted preference flags

use crate::domain::Theme;
use crate::infrastructure::durable::{DurableStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// A value stored under a fixed key, falling back to `Default`
pub trait Preference: Serialize + DeserializeOwned + Default {
    const KEY: &'static str;
}

impl Preference for Theme {
    const KEY: &'static str = "theme";
}

/// Key/value flags with no history
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    store: S,
}

impl<S: DurableStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        PreferenceStore { store }
    }

    /// Stored value, or the default when absent, unreadable or out of range
    pub fn get<P: Preference>(&self) -> P {
        match self.store.read(P::KEY) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(key = P::KEY, error = %e, "invalid preference value, using default");
                P::default()
            }),
            Ok(None) => P::default(),
            Err(e) => {
                warn!(key = P::KEY, error = %e, "failed to read preference, using default");
                P::default()
            }
        }
    }

    pub fn set<P: Preference>(&self, value: &P) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.write(P::KEY, &bytes)
    }
}
