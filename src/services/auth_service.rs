// ============================================================================
// AUTH SERVICE - One-shot refresh-and-retry around authenticated calls
// ============================================================================

use std::future::Future;

use crate::services::api_client::ApiError;

/// How many silent token refreshes a single request may trigger. Exactly
/// one: a second unauthorized response after a refresh means the session
/// is unrecoverable.
pub const UNAUTHORIZED_RETRY_LIMIT: u32 = 1;

/// Run an authenticated operation; on an unauthorized response, refresh the
/// access token once and retry the operation with the renewed token (the
/// operation closure re-reads the token on every attempt).
///
/// When the refresh itself fails the session has already been torn down by
/// the refresh path, and the caller receives the original unauthorized
/// error, not the refresh failure.
pub async fn with_refresh_retry<T, Op, OpFut, Refresh, RefreshFut>(
    mut operation: Op,
    mut refresh: Refresh,
) -> Result<T, ApiError>
where
    Op: FnMut() -> OpFut,
    OpFut: Future<Output = Result<T, ApiError>>,
    Refresh: FnMut() -> RefreshFut,
    RefreshFut: Future<Output = Result<(), ApiError>>,
{
    let mut refreshes_used = 0;
    loop {
        match operation().await {
            Err(ApiError::Unauthorized) if refreshes_used < UNAUTHORIZED_RETRY_LIMIT => {
                refreshes_used += 1;
                log::info!("🔄 [AUTH] Unauthorized response, attempting silent token refresh");
                if refresh().await.is_err() {
                    return Err(ApiError::Unauthorized);
                }
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn unauthorized_triggers_exactly_one_refresh_then_retries() {
        let op_calls = Rc::new(Cell::new(0u32));
        let refresh_calls = Rc::new(Cell::new(0u32));

        let result: Result<&str, ApiError> = futures::executor::block_on(with_refresh_retry(
            || {
                let op_calls = op_calls.clone();
                async move {
                    op_calls.set(op_calls.get() + 1);
                    if op_calls.get() == 1 {
                        Err(ApiError::Unauthorized)
                    } else {
                        Ok("profile")
                    }
                }
            },
            || {
                let refresh_calls = refresh_calls.clone();
                async move {
                    refresh_calls.set(refresh_calls.get() + 1);
                    Ok(())
                }
            },
        ));

        assert_eq!(result, Ok("profile"));
        assert_eq!(op_calls.get(), 2);
        assert_eq!(refresh_calls.get(), 1);
    }

    #[test]
    fn persistent_unauthorized_is_not_retried_twice() {
        let op_calls = Rc::new(Cell::new(0u32));
        let refresh_calls = Rc::new(Cell::new(0u32));

        let result: Result<(), ApiError> = futures::executor::block_on(with_refresh_retry(
            || {
                let op_calls = op_calls.clone();
                async move {
                    op_calls.set(op_calls.get() + 1);
                    Err(ApiError::Unauthorized)
                }
            },
            || {
                let refresh_calls = refresh_calls.clone();
                async move {
                    refresh_calls.set(refresh_calls.get() + 1);
                    Ok(())
                }
            },
        ));

        assert_eq!(result, Err(ApiError::Unauthorized));
        // one refresh, one retry, then the error is surfaced
        assert_eq!(op_calls.get(), 2);
        assert_eq!(refresh_calls.get(), 1);
    }

    #[test]
    fn failed_refresh_propagates_the_original_unauthorized_error() {
        let refresh_calls = Rc::new(Cell::new(0u32));

        let result: Result<(), ApiError> = futures::executor::block_on(with_refresh_retry(
            || async { Err(ApiError::Unauthorized) },
            || {
                let refresh_calls = refresh_calls.clone();
                async move {
                    refresh_calls.set(refresh_calls.get() + 1);
                    Err(ApiError::Server { status: 400, message: "Token is blacklisted".into() })
                }
            },
        ));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(refresh_calls.get(), 1);
    }

    #[test]
    fn non_auth_errors_pass_through_without_refreshing() {
        let refresh_calls = Rc::new(Cell::new(0u32));

        let result: Result<(), ApiError> = futures::executor::block_on(with_refresh_retry(
            || async { Err(ApiError::Network("connection reset".into())) },
            || {
                let refresh_calls = refresh_calls.clone();
                async move {
                    refresh_calls.set(refresh_calls.get() + 1);
                    Ok(())
                }
            },
        ));

        assert_eq!(result, Err(ApiError::Network("connection reset".into())));
        assert_eq!(refresh_calls.get(), 0);
    }
}
