pub mod booking_viewmodel;
pub mod profile_viewmodel;
pub mod session_viewmodel;

pub use booking_viewmodel::{
    validate_selection, AuthorizedBookingApi, BookingError, BookingFlow, ConfirmOutcome,
    SelectionError, MAX_SEATS_PER_BOOKING,
};
pub use profile_viewmodel::ProfileViewModel;
pub use session_viewmodel::SessionViewModel;
