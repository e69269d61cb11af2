// ============================================================================
// BOOKING STATE - Per-booking-attempt state of the active trip screen
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::booking::{CustomerDetails, PaymentType, UserType};
use crate::models::seat::{SeatMap, SeatSelection};
use crate::models::trip::Trip;

/// Client-side stage of one booking attempt. Mirrors the server-side
/// transaction; the server remains the source of truth for seat conflicts.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingStage {
    Idle,
    Holding,
    Held { hold_ref: String },
    Confirming,
    AwaitingPayment,
    Completed { order_id: Option<i64> },
}

impl BookingStage {
    pub fn is_idle(&self) -> bool {
        matches!(self, BookingStage::Idle)
    }

    pub fn is_held(&self) -> bool {
        matches!(self, BookingStage::Held { .. })
    }

    /// A request for this attempt is currently in flight; the triggering
    /// control must stay disabled.
    pub fn in_flight(&self) -> bool {
        matches!(self, BookingStage::Holding | BookingStage::Confirming)
    }

    /// The confirmation overlay is visible from the moment a hold exists
    /// until the attempt resolves or is cancelled.
    pub fn overlay_visible(&self) -> bool {
        matches!(self, BookingStage::Held { .. } | BookingStage::Confirming)
    }
}

#[derive(Clone)]
pub struct BookingState {
    pub trip: Rc<RefCell<Option<Trip>>>,
    pub loaded_trip_id: Rc<RefCell<Option<i64>>>,
    pub seat_map: Rc<RefCell<SeatMap>>,
    pub selection: Rc<RefCell<SeatSelection>>,
    pub stage: Rc<RefCell<BookingStage>>,
    pub payment_type: Rc<RefCell<PaymentType>>,
    pub user_type: Rc<RefCell<Option<UserType>>>,
    pub customer_name: Rc<RefCell<String>>,
    pub customer_phone: Rc<RefCell<String>>,
    pub error: Rc<RefCell<Option<String>>>,
    pub loading: Rc<RefCell<bool>>,
    pub submitting: Rc<RefCell<bool>>,
}

impl BookingState {
    pub fn new() -> Self {
        Self {
            trip: Rc::new(RefCell::new(None)),
            loaded_trip_id: Rc::new(RefCell::new(None)),
            seat_map: Rc::new(RefCell::new(SeatMap::default())),
            selection: Rc::new(RefCell::new(SeatSelection::new())),
            stage: Rc::new(RefCell::new(BookingStage::Idle)),
            payment_type: Rc::new(RefCell::new(PaymentType::Online)),
            user_type: Rc::new(RefCell::new(None)),
            customer_name: Rc::new(RefCell::new(String::new())),
            customer_phone: Rc::new(RefCell::new(String::new())),
            error: Rc::new(RefCell::new(None)),
            loading: Rc::new(RefCell::new(false)),
            submitting: Rc::new(RefCell::new(false)),
        }
    }

    /// Reset the screen for a newly selected trip.
    pub fn start_trip(&self, trip: Option<Trip>) {
        *self.trip.borrow_mut() = trip;
        *self.loaded_trip_id.borrow_mut() = None;
        *self.seat_map.borrow_mut() = SeatMap::default();
        self.selection.borrow_mut().clear();
        *self.stage.borrow_mut() = BookingStage::Idle;
        *self.payment_type.borrow_mut() = PaymentType::Online;
        *self.customer_name.borrow_mut() = String::new();
        *self.customer_phone.borrow_mut() = String::new();
        *self.error.borrow_mut() = None;
        *self.loading.borrow_mut() = false;
        *self.submitting.borrow_mut() = false;
    }

    pub fn stage(&self) -> BookingStage {
        self.stage.borrow().clone()
    }

    pub fn set_stage(&self, stage: BookingStage) {
        *self.stage.borrow_mut() = stage;
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    /// Administrators book on behalf of a customer and pay cash at the
    /// counter; passengers pay online.
    pub fn apply_user_type(&self, user_type: UserType) {
        *self.user_type.borrow_mut() = Some(user_type);
        *self.payment_type.borrow_mut() = match user_type {
            UserType::Admin => PaymentType::Cash,
            UserType::Passenger => PaymentType::Online,
        };
    }

    pub fn customer_details(&self) -> CustomerDetails {
        CustomerDetails {
            name: self.customer_name.borrow().clone(),
            phone: self.customer_phone.borrow().clone(),
        }
    }
}

impl Default for BookingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_forces_cash_payment() {
        let state = BookingState::new();
        state.apply_user_type(UserType::Admin);
        assert_eq!(*state.payment_type.borrow(), PaymentType::Cash);

        state.apply_user_type(UserType::Passenger);
        assert_eq!(*state.payment_type.borrow(), PaymentType::Online);
    }

    #[test]
    fn start_trip_resets_a_previous_attempt() {
        let state = BookingState::new();
        state.set_stage(BookingStage::Held { hold_ref: "abc".into() });
        state.set_error(Some("boom".into()));
        *state.customer_name.borrow_mut() = "Mona".into();

        state.start_trip(None);
        assert!(state.stage().is_idle());
        assert!(state.error.borrow().is_none());
        assert!(state.customer_name.borrow().is_empty());
    }

    #[test]
    fn overlay_tracks_the_held_and_confirming_stages() {
        assert!(!BookingStage::Idle.overlay_visible());
        assert!(BookingStage::Held { hold_ref: "r".into() }.overlay_visible());
        assert!(BookingStage::Confirming.overlay_visible());
        assert!(!BookingStage::AwaitingPayment.overlay_visible());
    }
}
