/// localStorage keys for the persisted session.
/// All three are removed together on logout.
pub const STORAGE_KEY_ACCESS: &str = "access";
pub const STORAGE_KEY_REFRESH: &str = "refresh";
pub const STORAGE_KEY_USER: &str = "user";

/// Page size used by the paginated profile/booking-history endpoint.
pub const PROFILE_PAGE_SIZE: u32 = 5;
