//! Fetch stage: download the spreadsheet into memory.
//!
//! ## Why fully buffered?
//!
//! Both parsers need random access — calamine seeks inside the zip/CFB
//! container and the CSV reader wants the whole (small) text anyway — so
//! the body is buffered completely rather than streamed. Memory therefore
//! scales with the fetched file's size; the request-level mitigation is the
//! bounded fetch timeout here and the rows-per-page ceiling downstream.
//!
//! Exactly one attempt is made. Resilience to transient network failure is
//! deliberately left to the caller.

use crate::error::{FetchCause, SheetError};
use tracing::{debug, info};

/// Download `url` fully into memory.
///
/// The client's timeout (configured at startup from
/// [`crate::ServiceConfig::fetch_timeout_secs`]) bounds the whole
/// download; `timeout_secs` is threaded through only for the error message.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    timeout_secs: u64,
) -> Result<Vec<u8>, SheetError> {
    info!("Fetching spreadsheet from: {}", url);

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            SheetError::FetchFailed {
                url: url.to_string(),
                cause: FetchCause::Timeout,
                reason: format!("timed out after {timeout_secs}s"),
            }
        } else {
            SheetError::FetchFailed {
                url: url.to_string(),
                cause: FetchCause::Unreachable,
                reason: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let cause = if status.is_server_error() {
            FetchCause::UpstreamServer(status.as_u16())
        } else {
            FetchCause::UpstreamClient(status.as_u16())
        };
        return Err(SheetError::FetchFailed {
            url: url.to_string(),
            cause,
            reason: format!("HTTP {status}"),
        });
    }

    let bytes = response.bytes().await.map_err(|e| {
        let cause = if e.is_timeout() {
            FetchCause::Timeout
        } else {
            FetchCause::Unreachable
        };
        SheetError::FetchFailed {
            url: url.to_string(),
            cause,
            reason: e.to_string(),
        }
    })?;

    debug!("Fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}

/// Build the shared HTTP client used by every request.
///
/// Constructed once at startup; reqwest clients are cheap to clone and pool
/// connections internally.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client, SheetError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| SheetError::FetchFailed {
            url: String::new(),
            cause: FetchCause::Unreachable,
            reason: format!("could not construct HTTP client: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_url_is_unreachable_not_a_panic() {
        let client = build_client(5).unwrap();
        let err = fetch(&client, "not a url", 5).await.unwrap_err();
        match err {
            SheetError::FetchFailed { cause, .. } => {
                assert_eq!(cause, FetchCause::Unreachable);
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[test]
    fn client_builds_with_small_timeout() {
        assert!(build_client(1).is_ok());
    }
}
