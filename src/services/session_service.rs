// ============================================================================
// SESSION SERVICE - Persistence of the authentication session
// ============================================================================
// The token pair and the minimal user record live in localStorage under
// three fixed keys, and all three are removed together on logout.
// ============================================================================

use crate::models::auth::StoredUser;
use crate::utils::constants::{STORAGE_KEY_ACCESS, STORAGE_KEY_REFRESH, STORAGE_KEY_USER};
use crate::utils::storage;

/// Everything the client persists about a session.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedSession {
    pub access: String,
    pub refresh: String,
    pub user: StoredUser,
}

/// Seam over the persistence backend so the session lifecycle can be
/// exercised without a browser.
pub trait SessionStore {
    fn persist(&self, session: &PersistedSession) -> Result<(), String>;
    fn restore(&self) -> Option<PersistedSession>;
    fn update_access_token(&self, access: &str) -> Result<(), String>;
    /// Must always succeed locally; logout never fails.
    fn clear(&self);
}

/// localStorage-backed store used by the running app.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSessionStore;

impl LocalSessionStore {
    pub fn new() -> Self {
        Self
    }
}

impl SessionStore for LocalSessionStore {
    fn persist(&self, session: &PersistedSession) -> Result<(), String> {
        storage::set_string(STORAGE_KEY_ACCESS, &session.access)?;
        storage::set_string(STORAGE_KEY_REFRESH, &session.refresh)?;
        storage::save_json(STORAGE_KEY_USER, &session.user)?;
        log::info!("💾 [SESSION] Session persisted to localStorage");
        Ok(())
    }

    fn restore(&self) -> Option<PersistedSession> {
        let access = storage::get_string(STORAGE_KEY_ACCESS)?;
        let refresh = storage::get_string(STORAGE_KEY_REFRESH)?;
        let user = storage::load_json::<StoredUser>(STORAGE_KEY_USER)?;
        Some(PersistedSession { access, refresh, user })
    }

    fn update_access_token(&self, access: &str) -> Result<(), String> {
        storage::set_string(STORAGE_KEY_ACCESS, access)
    }

    fn clear(&self) {
        storage::remove(STORAGE_KEY_ACCESS);
        storage::remove(STORAGE_KEY_REFRESH);
        storage::remove(STORAGE_KEY_USER);
        log::info!("🗑️ [SESSION] Local session cleared");
    }
}
