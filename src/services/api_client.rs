// ============================================================================
// API CLIENT - HTTP COMMUNICATION ONLY (Stateless)
// ============================================================================
// One function per REST endpoint; no business logic beyond the HTTP call
// and JSON mapping. Bearer tokens are passed in by the caller - nothing in
// this module reads session state ambiently.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::config::CONFIG;
use crate::models::auth::{
    LoginRequest, LogoutRequest, MessageResponse, PasswordResetConfirmRequest,
    PasswordResetRequest, RefreshRequest, RefreshResponse, RegisterRequest, TokenPair,
};
use crate::models::booking::{
    BookingDetailResponse, ConfirmRequest, ConfirmResponse, HoldRequest, HoldResponse,
    PaymentKeyResponse, SeatMapResponse,
};
use crate::models::location::LocationsResponse;
use crate::models::profile::ProfileResponse;
use crate::models::trip::{Trip, TripSearchQuery};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,
    #[error("Unexpected response from the server: {0}")]
    Parse(String),
}

/// Registration failures carry field-level validation errors keyed by
/// field name, exactly as the server reports them.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterError {
    Fields(HashMap<String, Vec<String>>),
    Api(ApiError),
}

/// Classify a seat-availability conflict. The API only exposes free-text
/// errors, so the match is pinned here (and in the tests below) to the
/// server's exact wording: every seat conflict message names the "Seat".
pub fn is_seat_conflict(error: &ApiError) -> bool {
    matches!(error, ApiError::Server { message, .. } if message.contains("Seat"))
}

/// Seam used by the booking orchestrator; the production implementation
/// wraps ApiClient with the authorized-retry decorator, tests script it.
#[async_trait(?Send)]
pub trait BookingApi {
    async fn seat_map(&self, trip_id: i64) -> Result<SeatMapResponse, ApiError>;
    async fn create_hold(&self, trip_id: i64, request: &HoldRequest)
        -> Result<HoldResponse, ApiError>;
    async fn confirm_booking(
        &self,
        trip_id: i64,
        hold_ref: &str,
        request: &ConfirmRequest,
    ) -> Result<ConfirmResponse, ApiError>;
    async fn payment_key(&self, order_id: i64) -> Result<PaymentKeyResponse, ApiError>;
}

/// Seam used by the session viewmodel for the token lifecycle.
#[async_trait(?Send)]
pub trait AuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError>;
    async fn logout(&self, access: &str, refresh: &str) -> Result<(), ApiError>;
    async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self { base_url: CONFIG.backend_url.clone() }
    }

    // ---------------------------------------------------------------- auth

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        let url = format!("{}/api/login/", self.base_url);
        let request = LoginRequest { email: email.to_string(), password: password.to_string() };

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn logout(&self, access: &str, refresh: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/logout/", self.base_url);
        let request = LogoutRequest { refresh: refresh.to_string() };

        let response = Request::post(&url)
            .header("Authorization", &format!("Bearer {}", access))
            .json(&request)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse, ApiError> {
        let url = format!("{}/api/token/refresh/", self.base_url);
        let request = RefreshRequest { refresh: refresh.to_string() };

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), RegisterError> {
        let url = format!("{}/api/register/", self.base_url);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| RegisterError::Api(ApiError::Network(e.to_string())))?
            .send()
            .await
            .map_err(|e| RegisterError::Api(ApiError::Network(e.to_string())))?;

        if response.ok() {
            return Ok(());
        }

        let status = response.status();
        // Field-level validation errors come back as {"field": ["message", ...]}
        if let Ok(body) = response.json::<serde_json::Value>().await {
            if let Some(object) = body.as_object() {
                let mut fields = HashMap::new();
                for (field, messages) in object {
                    if let Some(list) = messages.as_array() {
                        let messages: Vec<String> = list
                            .iter()
                            .filter_map(|m| m.as_str().map(str::to_string))
                            .collect();
                        if !messages.is_empty() {
                            fields.insert(field.clone(), messages);
                        }
                    }
                }
                if !fields.is_empty() {
                    return Err(RegisterError::Fields(fields));
                }
            }
        }
        Err(RegisterError::Api(ApiError::Server {
            status,
            message: format!("HTTP {}", status),
        }))
    }

    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let url = format!("{}/api/password_reset/", self.base_url);
        let request = PasswordResetRequest { email: email.to_string() };

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn reset_password(
        &self,
        token: &str,
        uid: &str,
        password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let url = format!("{}/api/password_reset/confirm/", self.base_url);
        let request = PasswordResetConfirmRequest {
            token: token.to_string(),
            uid: uid.to_string(),
            password: password.to_string(),
        };

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    // --------------------------------------------------------------- trips

    pub async fn locations(&self) -> Result<LocationsResponse, ApiError> {
        let url = format!("{}/api/locations/", self.base_url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn search_trips(&self, query: &TripSearchQuery) -> Result<Vec<Trip>, ApiError> {
        let url = format!("{}/api/trips/search/", self.base_url);

        let response = Request::get(&url)
            .query(query.to_query_pairs())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    // ------------------------------------------------------------- booking

    pub async fn seat_map(&self, access: &str, trip_id: i64) -> Result<SeatMapResponse, ApiError> {
        let url = format!("{}/api/trips/{}/book/", self.base_url, trip_id);

        let response = Request::get(&url)
            .header("Authorization", &format!("Bearer {}", access))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn create_hold(
        &self,
        access: &str,
        trip_id: i64,
        request: &HoldRequest,
    ) -> Result<HoldResponse, ApiError> {
        let url = format!("{}/api/trips/{}/book/", self.base_url, trip_id);

        let response = Request::post(&url)
            .header("Authorization", &format!("Bearer {}", access))
            .json(request)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn confirm_booking(
        &self,
        access: &str,
        trip_id: i64,
        hold_ref: &str,
        request: &ConfirmRequest,
    ) -> Result<ConfirmResponse, ApiError> {
        let url = format!("{}/api/trips/{}/confirm/{}/", self.base_url, trip_id, hold_ref);

        let response = Request::post(&url)
            .header("Authorization", &format!("Bearer {}", access))
            .json(request)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn payment_key(
        &self,
        access: &str,
        order_id: i64,
    ) -> Result<PaymentKeyResponse, ApiError> {
        let url = format!("{}/api/get_payment_key/{}/", self.base_url, order_id);

        let response = Request::get(&url)
            .header("Authorization", &format!("Bearer {}", access))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn booking_detail(
        &self,
        access: &str,
        order_id: i64,
    ) -> Result<BookingDetailResponse, ApiError> {
        let url = format!("{}/api/bookings/detail/{}/", self.base_url, order_id);

        let response = Request::get(&url)
            .header("Authorization", &format!("Bearer {}", access))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn cancel_booking(&self, access: &str, booking_id: i64) -> Result<(), ApiError> {
        let url = format!("{}/api/bookings/{}/cancel/", self.base_url, booking_id);

        let response = Request::post(&url)
            .header("Authorization", &format!("Bearer {}", access))
            .json(&serde_json::json!({}))
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }

    // ------------------------------------------------------------- profile

    pub async fn profile(
        &self,
        access: &str,
        page: u32,
        limit: u32,
    ) -> Result<ProfileResponse, ApiError> {
        let url = format!("{}/api/profile/", self.base_url);

        let response = Request::get(&url)
            .query([("page", page.to_string()), ("limit", limit.to_string())])
            .header("Authorization", &format!("Bearer {}", access))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            parse_json(response).await
        } else {
            Err(error_from(response).await)
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        ApiClient::login(self, email, password).await
    }

    async fn logout(&self, access: &str, refresh: &str) -> Result<(), ApiError> {
        ApiClient::logout(self, access, refresh).await
    }

    async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse, ApiError> {
        ApiClient::refresh_token(self, refresh).await
    }
}

/// Full-page navigation to the external payment host, carrying the
/// one-time payment token. Terminal, non-resumable from the client side.
pub fn redirect_to_payment(payment_key: &str) {
    let url = format!("{}?payment_token={}", CONFIG.payment_iframe_url, payment_key);
    log::info!("💳 [PAYMENT] Redirecting to external payment page");
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(&url) {
            log::error!("❌ [PAYMENT] Navigation to payment page failed: {:?}", e);
        }
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
}

/// Map a non-2xx response to an ApiError. Unauthorized responses are
/// classified for the one-shot refresh-and-retry decorator; for the rest the
/// server's `error`/`detail` message is surfaced verbatim when present.
async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    if status == 401 {
        return ApiError::Unauthorized;
    }

    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .or_else(|| body.get("detail"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        Err(_) => None,
    };

    ApiError::Server { status, message: message.unwrap_or_else(|| format!("HTTP {}", status)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(message: &str) -> ApiError {
        ApiError::Server { status: 400, message: message.to_string() }
    }

    #[test]
    fn seat_conflicts_match_the_server_wording() {
        assert!(is_seat_conflict(&server_error("Seat 12 is no longer available")));
        assert!(is_seat_conflict(&server_error("Seat already booked")));
    }

    #[test]
    fn classifier_is_case_sensitive_and_ignores_other_errors() {
        // lowercase "seat" is a different message family and must not
        // trigger the forced seat refetch
        assert!(!is_seat_conflict(&server_error("no seats left")));
        assert!(!is_seat_conflict(&server_error("Trip is full")));
        assert!(!is_seat_conflict(&ApiError::Network("Seat".to_string())));
        assert!(!is_seat_conflict(&ApiError::Unauthorized));
    }
}
