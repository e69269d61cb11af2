// ============================================================================
// ROUTE - Hash-based routing
// ============================================================================

/// Screens of the app, parsed from and rendered to the location hash.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Login,
    Register,
    ForgotPassword,
    ResetPassword { token: Option<String>, uid: Option<String> },
    TripSearch,
    TripBooking { trip_id: i64 },
    BookingSuccess { order_id: Option<i64>, success: bool },
    Profile,
    About,
    Contact,
    Privacy,
    NotFound,
}

impl Route {
    /// Parse a location hash like "#/trips/12/book" or
    /// "#/reset-password?token=abc&uid=7".
    pub fn parse(hash: &str) -> Route {
        let raw = hash.trim_start_matches('#');
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };
        let segments: Vec<&str> =
            path.split('/').filter(|segment| !segment.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["forgot-password"] => Route::ForgotPassword,
            ["reset-password"] => Route::ResetPassword {
                token: query_param(query, "token"),
                uid: query_param(query, "uid"),
            },
            ["trips", "search"] => Route::TripSearch,
            ["trips", trip_id, "book"] => match trip_id.parse::<i64>() {
                Ok(trip_id) => Route::TripBooking { trip_id },
                Err(_) => Route::NotFound,
            },
            ["booking-success"] => Route::BookingSuccess {
                order_id: query_param(query, "order_id").and_then(|v| v.parse().ok()),
                success: query_param(query, "success")
                    .map(|v| v.to_lowercase() == "true")
                    .unwrap_or(false),
            },
            ["profile"] => Route::Profile,
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            ["privacy"] => Route::Privacy,
            _ => Route::NotFound,
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Login => "#/login".to_string(),
            Route::Register => "#/register".to_string(),
            Route::ForgotPassword => "#/forgot-password".to_string(),
            Route::ResetPassword { token, uid } => {
                let mut hash = "#/reset-password".to_string();
                if let (Some(token), Some(uid)) = (token, uid) {
                    hash.push_str(&format!("?token={}&uid={}", token, uid));
                }
                hash
            }
            Route::TripSearch => "#/trips/search".to_string(),
            Route::TripBooking { trip_id } => format!("#/trips/{}/book", trip_id),
            Route::BookingSuccess { order_id, success } => match order_id {
                Some(order_id) => {
                    format!("#/booking-success?order_id={}&success={}", order_id, success)
                }
                None => format!("#/booking-success?success={}", success),
            },
            Route::Profile => "#/profile".to_string(),
            Route::About => "#/about".to_string(),
            Route::Contact => "#/contact".to_string(),
            Route::Privacy => "#/privacy".to_string(),
            Route::NotFound => "#/".to_string(),
        }
    }

    /// Screens that need a signed-in user; unauthenticated visitors get the
    /// login view instead.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::TripBooking { .. } | Route::BookingSuccess { .. } | Route::Profile
        )
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Current route from the window location.
pub fn current() -> Route {
    let hash = web_sys::window()
        .map(|w| w.location().hash().unwrap_or_default())
        .unwrap_or_default();
    Route::parse(&hash)
}

/// Navigate by setting the hash; the global hashchange listener re-renders.
pub fn navigate(route: &Route) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(&route.to_hash());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_core_screens() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("#/login"), Route::Login);
        assert_eq!(Route::parse("#/trips/search"), Route::TripSearch);
        assert_eq!(Route::parse("#/trips/42/book"), Route::TripBooking { trip_id: 42 });
        assert_eq!(Route::parse("#/trips/xyz/book"), Route::NotFound);
        assert_eq!(Route::parse("#/no-such-screen"), Route::NotFound);
    }

    #[test]
    fn parses_reset_password_parameters() {
        let route = Route::parse("#/reset-password?token=abc123&uid=Nw");
        assert_eq!(
            route,
            Route::ResetPassword { token: Some("abc123".into()), uid: Some("Nw".into()) }
        );
        // both parameters are required for the form to be usable
        let partial = Route::parse("#/reset-password?token=abc123");
        assert_eq!(partial, Route::ResetPassword { token: Some("abc123".into()), uid: None });
    }

    #[test]
    fn parses_booking_success_parameters() {
        let route = Route::parse("#/booking-success?order_id=91&success=True");
        assert_eq!(route, Route::BookingSuccess { order_id: Some(91), success: true });

        let missing = Route::parse("#/booking-success");
        assert_eq!(missing, Route::BookingSuccess { order_id: None, success: false });
    }

    #[test]
    fn hash_round_trips() {
        let routes = [
            Route::Home,
            Route::Login,
            Route::TripSearch,
            Route::TripBooking { trip_id: 7 },
            Route::BookingSuccess { order_id: Some(3), success: true },
            Route::Profile,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_hash()), route);
        }
    }

    #[test]
    fn booking_screens_are_guarded() {
        assert!(Route::TripBooking { trip_id: 1 }.requires_auth());
        assert!(Route::Profile.requires_auth());
        assert!(Route::BookingSuccess { order_id: None, success: false }.requires_auth());
        assert!(!Route::TripSearch.requires_auth());
        assert!(!Route::Login.requires_auth());
    }
}
