// ============================================================================
// AUTH STATE - In-memory authentication state
// ============================================================================
// The token pair is the only cross-component shared mutable resource. It is
// owned by AppState and mutated exclusively through the session viewmodel;
// every other component reads it via this handle.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::auth::StoredUser;

/// Startup begins at Unknown and is resolved asynchronously from persisted
/// storage; guarded routes render a splash until then instead of trusting
/// a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Unknown,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone)]
pub struct AuthState {
    status: Rc<RefCell<AuthStatus>>,
    access: Rc<RefCell<Option<String>>>,
    refresh: Rc<RefCell<Option<String>>>,
    user: Rc<RefCell<Option<StoredUser>>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            status: Rc::new(RefCell::new(AuthStatus::Unknown)),
            access: Rc::new(RefCell::new(None)),
            refresh: Rc::new(RefCell::new(None)),
            user: Rc::new(RefCell::new(None)),
        }
    }

    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    pub fn access_token(&self) -> Option<String> {
        self.access.borrow().clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.refresh.borrow().clone()
    }

    pub fn user(&self) -> Option<StoredUser> {
        self.user.borrow().clone()
    }

    pub fn set_authenticated(&self, access: String, refresh: String, user: StoredUser) {
        *self.access.borrow_mut() = Some(access);
        *self.refresh.borrow_mut() = Some(refresh);
        *self.user.borrow_mut() = Some(user);
        *self.status.borrow_mut() = AuthStatus::Authenticated;
    }

    pub fn set_access_token(&self, access: String) {
        *self.access.borrow_mut() = Some(access);
    }

    /// Mark the startup resolution as finished without a session.
    pub fn set_unauthenticated(&self) {
        *self.status.borrow_mut() = AuthStatus::Unauthenticated;
    }

    /// Clear everything. There is no partial-failure state for
    /// authentication; a broken session is fully torn down.
    pub fn clear(&self) {
        *self.access.borrow_mut() = None;
        *self.refresh.borrow_mut() = None;
        *self.user.borrow_mut() = None;
        *self.status.borrow_mut() = AuthStatus::Unauthenticated;
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unresolved() {
        let auth = AuthState::new();
        assert_eq!(auth.status(), AuthStatus::Unknown);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn clear_wipes_tokens_and_user() {
        let auth = AuthState::new();
        auth.set_authenticated(
            "acc".into(),
            "ref".into(),
            StoredUser { email: "a@b.c".into() },
        );
        assert!(auth.is_authenticated());

        auth.clear();
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
        assert_eq!(auth.access_token(), None);
        assert_eq!(auth.refresh_token(), None);
        assert_eq!(auth.user(), None);
    }
}
