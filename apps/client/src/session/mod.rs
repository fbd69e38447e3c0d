//! Session state: the only accessor of the persisted credential.
//!
//! Exactly one `Session` exists per process. It is shared as `Arc<Session>`
//! between the gateway (which reads the token) and the auth hooks (which
//! establish or clear it). Nothing else touches the `accessToken` key.

pub mod storage;

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use self::storage::{LocalStorage, StorageError};

/// Fixed storage key holding the bearer credential.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

struct SessionState {
    is_authenticated: bool,
}

pub struct Session {
    state: Mutex<SessionState>,
    storage: Box<dyn LocalStorage>,
}

impl Session {
    /// Derives the initial flag from whether a credential is already persisted.
    pub fn init(storage: Box<dyn LocalStorage>) -> Self {
        let is_authenticated = match storage.get_item(ACCESS_TOKEN_KEY) {
            Ok(token) => token.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read persisted credential, starting logged out: {e}");
                false
            }
        };
        debug!("Session initialised (authenticated: {is_authenticated})");

        Self {
            state: Mutex::new(SessionState { is_authenticated }),
            storage,
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated
    }

    /// Flips the flag only; the persisted credential is left as is.
    #[cfg(test)]
    pub fn set_authenticated(&self, is_authenticated: bool) {
        self.state().is_authenticated = is_authenticated;
    }

    /// Persists a freshly issued credential and marks the session active.
    /// If the credential cannot be persisted the flag is left untouched.
    pub fn establish(&self, access_token: &str) -> Result<(), StorageError> {
        let mut state = self.state();
        self.storage.set_item(ACCESS_TOKEN_KEY, access_token)?;
        state.is_authenticated = true;
        debug!("Session established");
        Ok(())
    }

    /// Clears the flag and removes the persisted credential.
    /// Has no network side effect; callers navigate away themselves.
    pub fn logout(&self) {
        let mut state = self.state();
        state.is_authenticated = false;
        if let Err(e) = self.storage.remove_item(ACCESS_TOKEN_KEY) {
            warn!("Failed to remove persisted credential: {e}");
        }
        debug!("Session cleared");
    }

    /// The persisted bearer credential, if any. Read by the gateway only.
    pub fn token(&self) -> Option<String> {
        match self.storage.get_item(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read persisted credential: {e}");
                None
            }
        }
    }
}
