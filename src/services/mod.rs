pub mod api_client;
pub mod auth_service;
pub mod session_service;

pub use api_client::{
    is_seat_conflict, redirect_to_payment, ApiClient, ApiError, AuthApi, BookingApi, RegisterError,
};
pub use auth_service::{with_refresh_retry, UNAUTHORIZED_RETRY_LIMIT};
pub use session_service::{LocalSessionStore, PersistedSession, SessionStore};
