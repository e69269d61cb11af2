// ============================================================================
// BOOKING VIEWMODEL - The booking orchestrator
// ============================================================================
// Sequences one logical transaction against the server: temporary seat
// hold → confirmation → optional payment redirect. Each stage is mirrored
// in BookingStage; the three calls are strictly sequential and nothing in
// this flow retries automatically - every failure requires explicit user
// action.
// ============================================================================

use async_trait::async_trait;

use crate::models::booking::{
    ConfirmRequest, CustomerDetails, HoldRequest, HoldResponse, PaymentKeyResponse, PaymentType,
    SeatMapResponse, UserType,
};
use crate::models::seat::{SeatMap, SeatSelection};
use crate::services::api_client::{is_seat_conflict, ApiClient, ApiError, BookingApi};
use crate::services::session_service::LocalSessionStore;
use crate::state::auth_state::AuthState;
use crate::state::booking_state::BookingStage;
use crate::viewmodels::session_viewmodel::SessionViewModel;

/// Hard cap on seats per booking, enforced before any network call.
pub const MAX_SEATS_PER_BOOKING: usize = 8;

/// Validation failures surfaced before entering the Holding stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    NoSeatsChosen,
    TooManySeats,
    MissingCustomerDetails,
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::NoSeatsChosen => write!(f, "Please choose at least one seat."),
            SelectionError::TooManySeats => {
                write!(f, "Can't choose more than {} seats.", MAX_SEATS_PER_BOOKING)
            }
            SelectionError::MissingCustomerDetails => {
                write!(f, "Customer name and phone are required for admin bookings.")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Validate a selection for submission. Administrators book on behalf of a
/// customer, so their bookings additionally need the customer's details.
pub fn validate_selection(
    selection: &SeatSelection,
    user_type: Option<UserType>,
    customer: &CustomerDetails,
) -> Result<(), SelectionError> {
    if selection.is_empty() {
        return Err(SelectionError::NoSeatsChosen);
    }
    if selection.len() > MAX_SEATS_PER_BOOKING {
        return Err(SelectionError::TooManySeats);
    }
    if user_type == Some(UserType::Admin)
        && (customer.name.trim().is_empty() || customer.phone.trim().is_empty())
    {
        return Err(SelectionError::MissingCustomerDetails);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(SelectionError),
    /// The server rejected the attempt because of seat availability. The
    /// authoritative seat map has already been re-fetched (when reachable);
    /// stale local seat state is never trusted after a conflict.
    #[error("{message}")]
    SeatConflict { message: String, refreshed: Option<SeatMap> },
    #[error("Invalid payment key received")]
    InvalidPaymentKey,
    #[error("A booking is already in progress.")]
    HoldAlreadyPending,
    #[error("No booking in progress.")]
    NoActiveHold,
    #[error("{0}")]
    Api(ApiError),
}

/// What the view must do after a successful confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// Online payment: perform a full-page navigation to the external
    /// payment page with this one-time token. Terminal and non-resumable.
    PaymentRedirect { order_id: i64, payment_key: String },
    /// Cash/offline payment (or no order id): navigate to the success
    /// route, or to the server-provided redirect URL when present.
    Completed { order_id: Option<i64>, redirect_url: Option<String> },
}

pub struct BookingFlow<A: BookingApi> {
    api: A,
    stage: BookingStage,
}

impl<A: BookingApi> BookingFlow<A> {
    pub fn new(api: A) -> Self {
        Self { api, stage: BookingStage::Idle }
    }

    /// Resume from a stage mirrored in BookingState.
    pub fn with_stage(api: A, stage: BookingStage) -> Self {
        Self { api, stage }
    }

    pub fn stage(&self) -> BookingStage {
        self.stage.clone()
    }

    pub async fn load_seat_map(&self, trip_id: i64) -> Result<SeatMap, ApiError> {
        let response = self.api.seat_map(trip_id).await?;
        Ok(SeatMap::from_status_map(&response.seat_status))
    }

    /// Post the temporary hold. On success the flow is Held and the
    /// confirmation overlay can be shown; on failure it returns to Idle.
    pub async fn initiate_hold(
        &mut self,
        trip_id: i64,
        selection: &SeatSelection,
        payment_type: PaymentType,
        user_type: Option<UserType>,
        customer: &CustomerDetails,
    ) -> Result<String, BookingError> {
        // only one hold may be outstanding per trip and session
        if !self.stage.is_idle() {
            return Err(BookingError::HoldAlreadyPending);
        }
        validate_selection(selection, user_type, customer).map_err(BookingError::Validation)?;

        let (customer_name, customer_phone) = customer_fields(user_type, customer);
        let request = HoldRequest {
            seats_booked: selection.len(),
            selected_seats: selection.to_vec(),
            payment_type,
            customer_name,
            customer_phone,
        };

        self.stage = BookingStage::Holding;
        log::info!("🎫 [BOOKING] Requesting hold for seats {:?} on trip {}", request.selected_seats, trip_id);

        match self.api.create_hold(trip_id, &request).await {
            Ok(response) => {
                self.stage = BookingStage::Held { hold_ref: response.temp_booking_ref.clone() };
                Ok(response.temp_booking_ref)
            }
            Err(error) => {
                self.stage = BookingStage::Idle;
                Err(self.conflict_or_api(trip_id, error).await)
            }
        }
    }

    /// Confirm the held booking. Online payments additionally fetch the
    /// one-time payment key; the view performs the external navigation.
    pub async fn confirm(
        &mut self,
        trip_id: i64,
        payment_type: PaymentType,
        user_type: Option<UserType>,
        customer: &CustomerDetails,
    ) -> Result<ConfirmOutcome, BookingError> {
        let hold_ref = match &self.stage {
            BookingStage::Held { hold_ref } => hold_ref.clone(),
            _ => return Err(BookingError::NoActiveHold),
        };

        let (customer_name, customer_phone) = customer_fields(user_type, customer);
        let request = ConfirmRequest {
            temp_booking_ref: hold_ref.clone(),
            customer_name,
            customer_phone,
        };

        self.stage = BookingStage::Confirming;
        log::info!("🎫 [BOOKING] Confirming hold {} on trip {}", hold_ref, trip_id);

        let response = match self.api.confirm_booking(trip_id, &hold_ref, &request).await {
            Ok(response) => response,
            Err(error) => {
                self.stage = BookingStage::Idle;
                return Err(self.conflict_or_api(trip_id, error).await);
            }
        };

        if payment_type.is_online() {
            if let Some(order_id) = response.order_id {
                return match self.api.payment_key(order_id).await {
                    Ok(PaymentKeyResponse { payment_key: Some(payment_key) })
                        if !payment_key.is_empty() =>
                    {
                        self.stage = BookingStage::AwaitingPayment;
                        Ok(ConfirmOutcome::PaymentRedirect { order_id, payment_key })
                    }
                    Ok(_) => {
                        self.stage = BookingStage::Idle;
                        Err(BookingError::InvalidPaymentKey)
                    }
                    Err(error) => {
                        self.stage = BookingStage::Idle;
                        Err(self.conflict_or_api(trip_id, error).await)
                    }
                };
            }
        }

        self.stage = BookingStage::Completed { order_id: response.order_id };
        Ok(ConfirmOutcome::Completed {
            order_id: response.order_id,
            redirect_url: response.redirect_url,
        })
    }

    /// Discard the local hold. No release call exists on the server; the
    /// temporary hold is left to expire by server-side timeout.
    pub fn cancel(&mut self) {
        if let BookingStage::Held { hold_ref } = &self.stage {
            log::warn!(
                "⚠️ [BOOKING] Discarding hold {} locally; the server will expire it by timeout",
                hold_ref
            );
        }
        self.stage = BookingStage::Idle;
    }

    /// Seat conflicts force a re-fetch of the authoritative seat map before
    /// submission is re-enabled.
    async fn conflict_or_api(&self, trip_id: i64, error: ApiError) -> BookingError {
        if is_seat_conflict(&error) {
            log::warn!("⚠️ [BOOKING] Seat conflict reported, re-fetching seat map");
            let refreshed = self.load_seat_map(trip_id).await.ok();
            BookingError::SeatConflict { message: error.to_string(), refreshed }
        } else {
            BookingError::Api(error)
        }
    }
}

fn customer_fields(
    user_type: Option<UserType>,
    customer: &CustomerDetails,
) -> (Option<String>, Option<String>) {
    if user_type == Some(UserType::Admin) {
        (Some(customer.name.clone()), Some(customer.phone.clone()))
    } else {
        (None, None)
    }
}

// ---------------------------------------------------------------------------
// Production BookingApi: ApiClient under the one-shot refresh-retry policy
// ---------------------------------------------------------------------------

pub struct AuthorizedBookingApi {
    client: ApiClient,
    session: SessionViewModel<ApiClient, LocalSessionStore>,
    auth: AuthState,
}

impl AuthorizedBookingApi {
    pub fn new(auth: AuthState) -> Self {
        Self { client: ApiClient::new(), session: SessionViewModel::new(), auth }
    }
}

#[async_trait(?Send)]
impl BookingApi for AuthorizedBookingApi {
    async fn seat_map(&self, trip_id: i64) -> Result<SeatMapResponse, ApiError> {
        let client = self.client.clone();
        self.session
            .authorized(&self.auth, move |access| {
                let client = client.clone();
                async move { client.seat_map(&access, trip_id).await }
            })
            .await
    }

    async fn create_hold(
        &self,
        trip_id: i64,
        request: &HoldRequest,
    ) -> Result<HoldResponse, ApiError> {
        let client = self.client.clone();
        let request = request.clone();
        self.session
            .authorized(&self.auth, move |access| {
                let client = client.clone();
                let request = request.clone();
                async move { client.create_hold(&access, trip_id, &request).await }
            })
            .await
    }

    async fn confirm_booking(
        &self,
        trip_id: i64,
        hold_ref: &str,
        request: &ConfirmRequest,
    ) -> Result<crate::models::booking::ConfirmResponse, ApiError> {
        let client = self.client.clone();
        let hold_ref = hold_ref.to_string();
        let request = request.clone();
        self.session
            .authorized(&self.auth, move |access| {
                let client = client.clone();
                let hold_ref = hold_ref.clone();
                let request = request.clone();
                async move { client.confirm_booking(&access, trip_id, &hold_ref, &request).await }
            })
            .await
    }

    async fn payment_key(&self, order_id: i64) -> Result<PaymentKeyResponse, ApiError> {
        let client = self.client.clone();
        self.session
            .authorized(&self.auth, move |access| {
                let client = client.clone();
                async move { client.payment_key(&access, order_id).await }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::ConfirmResponse;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeBookingApi {
        seat_map_calls: Cell<u32>,
        hold_calls: Cell<u32>,
        confirm_calls: Cell<u32>,
        payment_key_calls: Cell<u32>,
        seat_status: RefCell<HashMap<String, String>>,
        hold_result: RefCell<Option<Result<HoldResponse, ApiError>>>,
        confirm_result: RefCell<Option<Result<ConfirmResponse, ApiError>>>,
        payment_key_result: RefCell<Option<Result<PaymentKeyResponse, ApiError>>>,
    }

    #[async_trait(?Send)]
    impl BookingApi for FakeBookingApi {
        async fn seat_map(&self, _trip_id: i64) -> Result<SeatMapResponse, ApiError> {
            self.seat_map_calls.set(self.seat_map_calls.get() + 1);
            Ok(SeatMapResponse { seat_status: self.seat_status.borrow().clone() })
        }

        async fn create_hold(
            &self,
            _trip_id: i64,
            _request: &HoldRequest,
        ) -> Result<HoldResponse, ApiError> {
            self.hold_calls.set(self.hold_calls.get() + 1);
            self.hold_result
                .borrow()
                .clone()
                .unwrap_or(Ok(HoldResponse { temp_booking_ref: "TMP-1".into() }))
        }

        async fn confirm_booking(
            &self,
            _trip_id: i64,
            _hold_ref: &str,
            _request: &ConfirmRequest,
        ) -> Result<ConfirmResponse, ApiError> {
            self.confirm_calls.set(self.confirm_calls.get() + 1);
            match self.confirm_result.borrow().as_ref() {
                Some(Ok(response)) => Ok(ConfirmResponse {
                    order_id: response.order_id,
                    booking: response.booking.clone(),
                    redirect_url: response.redirect_url.clone(),
                }),
                Some(Err(error)) => Err(error.clone()),
                None => Ok(ConfirmResponse::default()),
            }
        }

        async fn payment_key(&self, _order_id: i64) -> Result<PaymentKeyResponse, ApiError> {
            self.payment_key_calls.set(self.payment_key_calls.get() + 1);
            self.payment_key_result
                .borrow()
                .clone()
                .unwrap_or(Ok(PaymentKeyResponse { payment_key: Some("key-1".into()) }))
        }
    }

    fn selection_of(seats: &[u32]) -> SeatSelection {
        let status: HashMap<String, String> =
            (1..=60).map(|n| (n.to_string(), "available".to_string())).collect();
        let map = SeatMap::from_status_map(&status);
        let mut selection = SeatSelection::new();
        for seat in seats {
            assert!(selection.toggle(*seat, &map));
        }
        selection
    }

    fn no_customer() -> CustomerDetails {
        CustomerDetails::default()
    }

    #[test]
    fn empty_selection_is_rejected_before_any_network_call() {
        let api = FakeBookingApi::default();
        let mut flow = BookingFlow::new(api);

        let result = block_on(flow.initiate_hold(
            1,
            &SeatSelection::new(),
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ));

        assert_eq!(result, Err(BookingError::Validation(SelectionError::NoSeatsChosen)));
        assert_eq!(result.unwrap_err().to_string(), "Please choose at least one seat.");
        assert_eq!(flow.api.hold_calls.get(), 0);
        assert!(flow.stage().is_idle());
    }

    #[test]
    fn more_than_eight_seats_is_rejected_before_any_network_call() {
        let api = FakeBookingApi::default();
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);

        let result = block_on(flow.initiate_hold(
            1,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ));

        assert_eq!(result, Err(BookingError::Validation(SelectionError::TooManySeats)));
        assert_eq!(result.unwrap_err().to_string(), "Can't choose more than 8 seats.");
        assert_eq!(flow.api.hold_calls.get(), 0);
    }

    #[test]
    fn eight_seats_is_still_accepted() {
        let api = FakeBookingApi::default();
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let result = block_on(flow.initiate_hold(
            1,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ));

        assert!(result.is_ok());
        assert_eq!(flow.api.hold_calls.get(), 1);
    }

    #[test]
    fn admin_bookings_require_customer_details() {
        let api = FakeBookingApi::default();
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[3]);

        let result = block_on(flow.initiate_hold(
            1,
            &selection,
            PaymentType::Cash,
            Some(UserType::Admin),
            &CustomerDetails { name: "Mona".into(), phone: String::new() },
        ));

        assert_eq!(
            result,
            Err(BookingError::Validation(SelectionError::MissingCustomerDetails))
        );
        assert_eq!(flow.api.hold_calls.get(), 0);
    }

    #[test]
    fn a_second_hold_is_rejected_while_one_is_outstanding() {
        let api = FakeBookingApi::default();
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[3]);

        block_on(flow.initiate_hold(
            1,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ))
        .unwrap();
        assert!(flow.stage().is_held());

        let second = block_on(flow.initiate_hold(
            1,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ));
        assert_eq!(second, Err(BookingError::HoldAlreadyPending));
        assert_eq!(flow.api.hold_calls.get(), 1);
    }

    #[test]
    fn seat_conflict_on_hold_refetches_the_authoritative_seat_map() {
        let api = FakeBookingApi::default();
        *api.hold_result.borrow_mut() = Some(Err(ApiError::Server {
            status: 409,
            message: "Seat 3 is no longer available".into(),
        }));
        *api.seat_status.borrow_mut() =
            HashMap::from([("3".to_string(), "booked".to_string())]);
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[3]);

        let result = block_on(flow.initiate_hold(
            1,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ));

        match result {
            Err(BookingError::SeatConflict { message, refreshed }) => {
                assert_eq!(message, "Seat 3 is no longer available");
                let refreshed = refreshed.expect("seat map must be re-fetched");
                assert!(refreshed.is_unavailable(3));
            }
            other => panic!("expected a seat conflict, got {:?}", other),
        }
        assert_eq!(flow.api.seat_map_calls.get(), 1);
        assert!(flow.stage().is_idle());
    }

    #[test]
    fn other_hold_failures_surface_verbatim_without_a_refetch() {
        let api = FakeBookingApi::default();
        *api.hold_result.borrow_mut() =
            Some(Err(ApiError::Server { status: 500, message: "Internal error".into() }));
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[3]);

        let result = block_on(flow.initiate_hold(
            1,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ));

        assert_eq!(
            result,
            Err(BookingError::Api(ApiError::Server { status: 500, message: "Internal error".into() }))
        );
        assert_eq!(flow.api.seat_map_calls.get(), 0);
        assert!(flow.stage().is_idle());
    }

    #[test]
    fn cash_confirmation_completes_without_a_payment_key_fetch() {
        let api = FakeBookingApi::default();
        *api.confirm_result.borrow_mut() = Some(Ok(ConfirmResponse {
            order_id: Some(77),
            booking: None,
            redirect_url: None,
        }));
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[4, 5]);

        block_on(flow.initiate_hold(
            9,
            &selection,
            PaymentType::Cash,
            Some(UserType::Admin),
            &CustomerDetails { name: "Mona".into(), phone: "01234567890".into() },
        ))
        .unwrap();
        assert!(flow.stage().is_held());

        let outcome = block_on(flow.confirm(
            9,
            PaymentType::Cash,
            Some(UserType::Admin),
            &CustomerDetails { name: "Mona".into(), phone: "01234567890".into() },
        ))
        .unwrap();

        assert_eq!(
            outcome,
            ConfirmOutcome::Completed { order_id: Some(77), redirect_url: None }
        );
        assert_eq!(flow.api.payment_key_calls.get(), 0);
        assert_eq!(flow.stage(), BookingStage::Completed { order_id: Some(77) });
    }

    #[test]
    fn online_confirmation_fetches_the_payment_key() {
        let api = FakeBookingApi::default();
        *api.confirm_result.borrow_mut() = Some(Ok(ConfirmResponse {
            order_id: Some(91),
            booking: None,
            redirect_url: None,
        }));
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[4]);

        block_on(flow.initiate_hold(
            9,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ))
        .unwrap();

        let outcome = block_on(flow.confirm(
            9,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ))
        .unwrap();

        assert_eq!(
            outcome,
            ConfirmOutcome::PaymentRedirect { order_id: 91, payment_key: "key-1".into() }
        );
        assert_eq!(flow.api.payment_key_calls.get(), 1);
        assert_eq!(flow.stage(), BookingStage::AwaitingPayment);
    }

    #[test]
    fn a_missing_payment_key_is_an_error_and_blocks_the_redirect() {
        let api = FakeBookingApi::default();
        *api.confirm_result.borrow_mut() = Some(Ok(ConfirmResponse {
            order_id: Some(91),
            booking: None,
            redirect_url: None,
        }));
        *api.payment_key_result.borrow_mut() =
            Some(Ok(PaymentKeyResponse { payment_key: None }));
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[4]);

        block_on(flow.initiate_hold(
            9,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ))
        .unwrap();

        let result = block_on(flow.confirm(
            9,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ));

        assert_eq!(result, Err(BookingError::InvalidPaymentKey));
        assert_eq!(result.unwrap_err().to_string(), "Invalid payment key received");
        assert_eq!(flow.api.payment_key_calls.get(), 1);
        // no AwaitingPayment stage - the view must not navigate anywhere
        assert!(flow.stage().is_idle());
    }

    #[test]
    fn confirm_failure_returns_the_flow_to_idle() {
        let api = FakeBookingApi::default();
        *api.confirm_result.borrow_mut() =
            Some(Err(ApiError::Server { status: 400, message: "Hold expired".into() }));
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[4]);

        block_on(flow.initiate_hold(
            9,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ))
        .unwrap();

        let result = block_on(flow.confirm(
            9,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ));

        assert!(matches!(result, Err(BookingError::Api(_))));
        assert!(flow.stage().is_idle());
    }

    #[test]
    fn confirm_without_a_hold_is_rejected() {
        let api = FakeBookingApi::default();
        let mut flow = BookingFlow::new(api);

        let result = block_on(flow.confirm(
            9,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ));

        assert_eq!(result, Err(BookingError::NoActiveHold));
        assert_eq!(flow.api.confirm_calls.get(), 0);
    }

    #[test]
    fn cancel_discards_the_local_hold() {
        let api = FakeBookingApi::default();
        let mut flow = BookingFlow::new(api);
        let selection = selection_of(&[4]);

        block_on(flow.initiate_hold(
            9,
            &selection,
            PaymentType::Online,
            Some(UserType::Passenger),
            &no_customer(),
        ))
        .unwrap();
        assert!(flow.stage().is_held());

        flow.cancel();
        assert!(flow.stage().is_idle());
    }

    #[test]
    fn passenger_holds_do_not_carry_customer_fields() {
        let (name, phone) = customer_fields(
            Some(UserType::Passenger),
            &CustomerDetails { name: "X".into(), phone: "1".into() },
        );
        assert_eq!(name, None);
        assert_eq!(phone, None);

        let (name, phone) = customer_fields(
            Some(UserType::Admin),
            &CustomerDetails { name: "Mona".into(), phone: "01234567890".into() },
        );
        assert_eq!(name.as_deref(), Some("Mona"));
        assert_eq!(phone.as_deref(), Some("01234567890"));
    }
}
