// ============================================================================
// SESSION VIEWMODEL - Session lifecycle logic
// ============================================================================
// Owns login / logout / token refresh. The only place that mutates
// AuthState or the persisted session; views call in and re-render.
// ============================================================================

use std::future::Future;

use crate::models::auth::StoredUser;
use crate::services::api_client::{ApiClient, ApiError, AuthApi};
use crate::services::auth_service::with_refresh_retry;
use crate::services::session_service::{LocalSessionStore, PersistedSession, SessionStore};
use crate::state::auth_state::AuthState;

pub struct SessionViewModel<A: AuthApi, S: SessionStore> {
    api: A,
    store: S,
}

impl SessionViewModel<ApiClient, LocalSessionStore> {
    pub fn new() -> Self {
        Self { api: ApiClient::new(), store: LocalSessionStore::new() }
    }
}

impl Default for SessionViewModel<ApiClient, LocalSessionStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AuthApi, S: SessionStore> SessionViewModel<A, S> {
    pub fn with_parts(api: A, store: S) -> Self {
        Self { api, store }
    }

    /// Resolve the startup auth state from persisted storage. Presence of a
    /// stored token marks the user authenticated before any server
    /// round-trip confirms validity; the first unauthorized response
    /// downgrades the session through the refresh path.
    pub fn restore_into(&self, auth: &AuthState) {
        match self.store.restore() {
            Some(session) => {
                log::info!("💾 [SESSION] Stored session found for {}", session.user.email);
                auth.set_authenticated(session.access, session.refresh, session.user);
            }
            None => auth.set_unauthenticated(),
        }
    }

    /// Exchange credentials for a token pair. On failure the stored session
    /// state is left untouched and a user-facing message is returned.
    pub async fn login(&self, auth: &AuthState, email: &str, password: &str) -> Result<(), String> {
        log::info!("🔐 [AUTH] Signing in {}", email);
        match self.api.login(email, password).await {
            Ok(tokens) => {
                let user = StoredUser { email: email.to_string() };
                let session = PersistedSession {
                    access: tokens.access.clone(),
                    refresh: tokens.refresh.clone(),
                    user: user.clone(),
                };
                if let Err(e) = self.store.persist(&session) {
                    log::error!("❌ [AUTH] Could not persist session: {}", e);
                }
                auth.set_authenticated(tokens.access, tokens.refresh, user);
                Ok(())
            }
            Err(ApiError::Server { message, .. }) => Err(message),
            Err(_) => Err("Login failed".to_string()),
        }
    }

    /// Invalidate the refresh token server-side (best effort, failures are
    /// logged and never surfaced), then unconditionally clear local state.
    pub async fn logout(&self, auth: &AuthState) {
        if let (Some(access), Some(refresh)) = (auth.access_token(), auth.refresh_token()) {
            if let Err(e) = self.api.logout(&access, &refresh).await {
                log::warn!("⚠️ [AUTH] Server-side logout failed: {}", e);
            }
        }
        self.store.clear();
        auth.clear();
        log::info!("👋 [AUTH] Signed out");
    }

    /// Exchange the stored refresh token for a new access token. A failed
    /// refresh means the session is unrecoverable: full logout.
    pub async fn refresh_access_token(&self, auth: &AuthState) -> Result<(), ApiError> {
        let refresh = match auth.refresh_token() {
            Some(refresh) => refresh,
            None => {
                self.logout(auth).await;
                return Err(ApiError::Unauthorized);
            }
        };

        match self.api.refresh_token(&refresh).await {
            Ok(response) => {
                if let Err(e) = self.store.update_access_token(&response.access) {
                    log::error!("❌ [AUTH] Could not persist refreshed token: {}", e);
                }
                auth.set_access_token(response.access);
                log::info!("✅ [AUTH] Access token refreshed");
                Ok(())
            }
            Err(error) => {
                log::warn!("⚠️ [AUTH] Token refresh failed, session is unrecoverable");
                self.logout(auth).await;
                Err(error)
            }
        }
    }

    /// Run an authenticated operation under the one-shot refresh-and-retry
    /// policy. The operation receives the current access token on every
    /// attempt, so a retry after a refresh uses the renewed token.
    pub async fn authorized<T, F, Fut>(&self, auth: &AuthState, operation: F) -> Result<T, ApiError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let this = self;
        with_refresh_retry(
            move || operation(auth.access_token().unwrap_or_default()),
            move || async move { this.refresh_access_token(auth).await },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{RefreshResponse, TokenPair};
    use crate::state::auth_state::AuthStatus;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct MemoryStore {
        session: Rc<RefCell<Option<PersistedSession>>>,
        cleared: Rc<Cell<bool>>,
    }

    impl SessionStore for MemoryStore {
        fn persist(&self, session: &PersistedSession) -> Result<(), String> {
            *self.session.borrow_mut() = Some(session.clone());
            Ok(())
        }

        fn restore(&self) -> Option<PersistedSession> {
            self.session.borrow().clone()
        }

        fn update_access_token(&self, access: &str) -> Result<(), String> {
            if let Some(session) = self.session.borrow_mut().as_mut() {
                session.access = access.to_string();
            }
            Ok(())
        }

        fn clear(&self) {
            *self.session.borrow_mut() = None;
            self.cleared.set(true);
        }
    }

    #[derive(Default)]
    struct FakeAuthApi {
        login_result: RefCell<Option<Result<TokenPair, ApiError>>>,
        logout_result: RefCell<Option<Result<(), ApiError>>>,
        refresh_result: RefCell<Option<Result<RefreshResponse, ApiError>>>,
        logout_calls: Cell<u32>,
        refresh_calls: Cell<u32>,
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeAuthApi {
        async fn login(&self, _email: &str, _password: &str) -> Result<TokenPair, ApiError> {
            self.login_result.borrow().clone().unwrap_or(Err(ApiError::Network("no script".into())))
        }

        async fn logout(&self, _access: &str, _refresh: &str) -> Result<(), ApiError> {
            self.logout_calls.set(self.logout_calls.get() + 1);
            self.logout_result.borrow().clone().unwrap_or(Ok(()))
        }

        async fn refresh_token(&self, _refresh: &str) -> Result<RefreshResponse, ApiError> {
            self.refresh_calls.set(self.refresh_calls.get() + 1);
            self.refresh_result.borrow().clone().unwrap_or(Err(ApiError::Unauthorized))
        }
    }

    fn authenticated_state() -> AuthState {
        let auth = AuthState::new();
        auth.set_authenticated(
            "old-access".into(),
            "refresh-1".into(),
            StoredUser { email: "rider@example.com".into() },
        );
        auth
    }

    #[test]
    fn login_persists_tokens_and_marks_authenticated() {
        let api = FakeAuthApi::default();
        *api.login_result.borrow_mut() =
            Some(Ok(TokenPair { access: "acc-1".into(), refresh: "ref-1".into() }));
        let store = MemoryStore::default();
        let vm = SessionViewModel::with_parts(api, store.clone());
        let auth = AuthState::new();

        block_on(vm.login(&auth, "rider@example.com", "secret")).unwrap();

        assert_eq!(auth.status(), AuthStatus::Authenticated);
        assert_eq!(auth.access_token().as_deref(), Some("acc-1"));
        let persisted = store.session.borrow().clone().unwrap();
        assert_eq!(persisted.user.email, "rider@example.com");
    }

    #[test]
    fn failed_login_returns_the_server_message_without_touching_state() {
        let api = FakeAuthApi::default();
        *api.login_result.borrow_mut() =
            Some(Err(ApiError::Server { status: 400, message: "Invalid credentials".into() }));
        let store = MemoryStore::default();
        let vm = SessionViewModel::with_parts(api, store.clone());
        let auth = AuthState::new();

        let result = block_on(vm.login(&auth, "rider@example.com", "bad"));

        assert_eq!(result, Err("Invalid credentials".to_string()));
        assert_eq!(auth.status(), AuthStatus::Unknown);
        assert!(store.session.borrow().is_none());
    }

    #[test]
    fn logout_clears_local_state_even_when_the_server_call_fails() {
        let api = FakeAuthApi::default();
        *api.logout_result.borrow_mut() =
            Some(Err(ApiError::Network("connection refused".into())));
        let store = MemoryStore::default();
        store
            .persist(&PersistedSession {
                access: "a".into(),
                refresh: "r".into(),
                user: StoredUser { email: "rider@example.com".into() },
            })
            .unwrap();
        let vm = SessionViewModel::with_parts(api, store.clone());
        let auth = authenticated_state();

        block_on(vm.logout(&auth));

        assert!(store.cleared.get());
        assert!(store.session.borrow().is_none());
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
        assert_eq!(auth.access_token(), None);
    }

    #[test]
    fn refresh_failure_triggers_full_logout() {
        let api = FakeAuthApi::default();
        *api.refresh_result.borrow_mut() =
            Some(Err(ApiError::Server { status: 400, message: "Token is blacklisted".into() }));
        let store = MemoryStore::default();
        let vm = SessionViewModel::with_parts(api, store.clone());
        let auth = authenticated_state();

        let result = block_on(vm.refresh_access_token(&auth));

        assert!(result.is_err());
        assert!(store.cleared.get());
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
    }

    #[test]
    fn authorized_retries_once_with_the_renewed_token() {
        let api = FakeAuthApi::default();
        *api.refresh_result.borrow_mut() = Some(Ok(RefreshResponse { access: "new-access".into() }));
        let vm = SessionViewModel::with_parts(api, MemoryStore::default());
        let auth = authenticated_state();

        let tokens_seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let result = {
            let tokens_seen = tokens_seen.clone();
            block_on(vm.authorized(&auth, move |access| {
                let tokens_seen = tokens_seen.clone();
                async move {
                    tokens_seen.borrow_mut().push(access.clone());
                    if access == "old-access" {
                        Err(ApiError::Unauthorized)
                    } else {
                        Ok("bookings")
                    }
                }
            }))
        };

        assert_eq!(result, Ok("bookings"));
        assert_eq!(*tokens_seen.borrow(), vec!["old-access".to_string(), "new-access".to_string()]);
        assert_eq!(vm.api.refresh_calls.get(), 1);
    }

    #[test]
    fn authorized_clears_the_session_and_surfaces_the_original_error_when_refresh_fails() {
        let api = FakeAuthApi::default();
        *api.refresh_result.borrow_mut() = Some(Err(ApiError::Unauthorized));
        let store = MemoryStore::default();
        let vm = SessionViewModel::with_parts(api, store.clone());
        let auth = authenticated_state();

        let result: Result<(), ApiError> =
            block_on(vm.authorized(&auth, |_access| async { Err(ApiError::Unauthorized) }));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(vm.api.refresh_calls.get(), 1);
        // session cleared: guarded routes now render the login screen
        assert!(store.cleared.get());
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
    }

    #[test]
    fn restore_resolves_the_unknown_startup_state() {
        let store = MemoryStore::default();
        let vm = SessionViewModel::with_parts(FakeAuthApi::default(), store.clone());
        let auth = AuthState::new();

        vm.restore_into(&auth);
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);

        store
            .persist(&PersistedSession {
                access: "a".into(),
                refresh: "r".into(),
                user: StoredUser { email: "rider@example.com".into() },
            })
            .unwrap();
        let auth = AuthState::new();
        vm.restore_into(&auth);
        assert_eq!(auth.status(), AuthStatus::Authenticated);
        assert_eq!(auth.user().unwrap().email, "rider@example.com");
    }
}
