pub mod app_state;
pub mod auth_state;
pub mod booking_state;
pub mod route;

pub use app_state::AppState;
pub use auth_state::{AuthState, AuthStatus};
pub use booking_state::{BookingStage, BookingState};
pub use route::Route;
