//! Retry with exponential back-off and jitter for resource fetches.
//!
//! Only transient failures are retried. A missing or malformed resource is
//! returned at once so the loader can degrade that source and move on.

use std::future::Future;
use std::time::Duration;

use crate::error::LoaderError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// Retriable: timeouts, connection failures, HTTP 429 and 5xx.
/// Everything else (404, other 4xx, bad JSON, file I/O) is final.
pub(crate) fn is_retriable(err: &LoaderError) -> bool {
    match err {
        LoaderError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        LoaderError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        LoaderError::NotFound { .. }
        | LoaderError::Io { .. }
        | LoaderError::Deserialize { .. }
        | LoaderError::InvalidRoot { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The wait before retry `n` is `backoff_base_ms * 2^(n-1)` ± 25 % jitter,
/// capped at 10 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, LoaderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LoaderError>>,
{
    const MAX_DELAY_MS: u64 = 10_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient fetch error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn status(status: u16) -> LoaderError {
        LoaderError::UnexpectedStatus {
            status,
            url: "http://localhost/x.json".to_owned(),
        }
    }

    #[test]
    fn server_errors_and_throttling_are_retriable() {
        assert!(is_retriable(&status(500)));
        assert!(is_retriable(&status(503)));
        assert!(is_retriable(&status(429)));
    }

    #[test]
    fn client_errors_are_not_retriable() {
        assert!(!is_retriable(&status(403)));
        assert!(!is_retriable(&LoaderError::NotFound {
            url: "http://localhost/x.json".to_owned()
        }));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        assert!(!is_retriable(&LoaderError::Deserialize {
            context: "test".to_owned(),
            source,
        }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, LoaderError>(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_errors_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err(status(502))
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99, "should succeed after retries");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(status(500))
            }
        })
        .await;
        assert!(matches!(
            result,
            Err(LoaderError::UnexpectedStatus { status: 500, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3, "1 attempt + 2 retries");
    }

    #[tokio::test]
    async fn does_not_retry_not_found() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(LoaderError::NotFound {
                    url: "http://localhost/missing.json".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "404 must not be retried");
        assert!(matches!(result, Err(LoaderError::NotFound { .. })));
    }
}
