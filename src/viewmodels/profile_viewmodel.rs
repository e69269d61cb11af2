// ============================================================================
// PROFILE VIEWMODEL - Profile page and booking history
// ============================================================================

use crate::models::booking::BookingDetailResponse;
use crate::models::profile::ProfileResponse;
use crate::services::api_client::{ApiClient, ApiError};
use crate::services::session_service::LocalSessionStore;
use crate::state::auth_state::AuthState;
use crate::utils::constants::PROFILE_PAGE_SIZE;
use crate::viewmodels::session_viewmodel::SessionViewModel;

pub struct ProfileViewModel {
    client: ApiClient,
    session: SessionViewModel<ApiClient, LocalSessionStore>,
}

impl ProfileViewModel {
    pub fn new() -> Self {
        Self { client: ApiClient::new(), session: SessionViewModel::new() }
    }

    /// One page of the profile + booking history.
    pub async fn load_page(&self, auth: &AuthState, page: u32) -> Result<ProfileResponse, ApiError> {
        let client = self.client.clone();
        self.session
            .authorized(auth, move |access| {
                let client = client.clone();
                async move { client.profile(&access, page, PROFILE_PAGE_SIZE).await }
            })
            .await
    }

    /// Authoritative booking detail for the success/ticket screen.
    pub async fn booking_detail(
        &self,
        auth: &AuthState,
        order_id: i64,
    ) -> Result<BookingDetailResponse, ApiError> {
        let client = self.client.clone();
        self.session
            .authorized(auth, move |access| {
                let client = client.clone();
                async move { client.booking_detail(&access, order_id).await }
            })
            .await
    }

    /// Admin-only cancellation of a booking.
    pub async fn cancel_booking(&self, auth: &AuthState, booking_id: i64) -> Result<(), String> {
        let client = self.client.clone();
        self.session
            .authorized(auth, move |access| {
                let client = client.clone();
                async move { client.cancel_booking(&access, booking_id).await }
            })
            .await
            .map_err(|error| match error {
                ApiError::Server { message, .. } => message,
                other => other.to_string(),
            })
    }
}

impl Default for ProfileViewModel {
    fn default() -> Self {
        Self::new()
    }
}
