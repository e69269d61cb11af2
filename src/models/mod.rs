pub mod auth;
pub mod booking;
pub mod location;
pub mod profile;
pub mod seat;
pub mod trip;

pub use auth::{StoredUser, TokenPair};
pub use booking::{
    BookingDetail, BookingStatus, ConfirmRequest, ConfirmResponse, CustomerDetails, HoldRequest,
    HoldResponse, PaymentKeyResponse, PaymentType, SeatMapResponse, UserType,
};
pub use location::{Area, City, LocationsResponse};
pub use profile::{ProfileResponse, ProfileUser};
pub use seat::{SeatMap, SeatSelection};
pub use trip::{BusType, Trip, TripSearchQuery};
