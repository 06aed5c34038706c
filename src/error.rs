//! Error types for the sheet2json library.
//!
//! One enum covers the whole request pipeline. Every variant is a
//! user-input fault served as a 4xx, with two exceptions:
//!
//! * [`SheetError::FetchFailed`] carries a [`FetchCause`] so the handler can
//!   distinguish "the URL the user gave us is bad" (400) from "the remote
//!   host is broken or slow" (502/504).
//!
//! * [`SheetError::SerializationFailed`] is the sole internal-fault
//!   category and is the only variant served as a 500. It also carries a
//!   `details` string that is exposed in the response body, because a
//!   serialisation failure is a bug report, not a usage hint.
//!
//! The `#[error]` strings double as the `error` field of the JSON error
//! body, so they are part of the API contract and pinned by tests.

use axum::http::StatusCode;
use thiserror::Error;

/// All errors a request pipeline run can produce.
#[derive(Debug, Error)]
pub enum SheetError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// A required query parameter was absent or empty.
    #[error("{name} parameter is required")]
    MissingParameter { name: &'static str },

    /// A query parameter was present but unparsable or out of range.
    ///
    /// An explicit invalid value is always an error; it is never silently
    /// replaced by the parameter's default.
    #[error("{message}")]
    InvalidParameter {
        name: &'static str,
        message: String,
    },

    /// The URL's file extension is not one of the supported formats.
    #[error("Unsupported file format. Only .xlsx, .xls, and .csv are supported")]
    UnsupportedFormat { extension: Option<String> },

    // ── Fetch errors ──────────────────────────────────────────────────────
    /// Downloading the spreadsheet failed. Single attempt, no retry.
    #[error("Error fetching file: {reason}")]
    FetchFailed {
        url: String,
        cause: FetchCause,
        reason: String,
    },

    // ── Parse errors ──────────────────────────────────────────────────────
    /// The downloaded bytes could not be parsed as the claimed format.
    ///
    /// Served as a 400: the input is user-supplied and unprocessable, not a
    /// server fault.
    #[error("Error processing file: {detail}")]
    ParseFailed { detail: String },

    // ── Internal errors ───────────────────────────────────────────────────
    /// The assembled response could not be converted to JSON.
    #[error("Could not serialize response data")]
    SerializationFailed { detail: String },
}

/// Why a fetch failed, for HTTP status selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCause {
    /// The request exceeded the configured timeout.
    Timeout,
    /// DNS resolution or TCP/TLS connection failed, or the URL is malformed.
    Unreachable,
    /// The remote host answered with a 4xx status.
    UpstreamClient(u16),
    /// The remote host answered with a 5xx status.
    UpstreamServer(u16),
}

impl SheetError {
    /// HTTP status code for this error.
    ///
    /// Validation and parse errors are the caller's fault (400). A fetch
    /// failure is 400 when the supplied URL is unreachable or rejected by
    /// the remote host, 502 when the remote host itself errored, and 504
    /// when it ran out the clock. Serialization failure is the one internal
    /// fault (500).
    pub fn status(&self) -> StatusCode {
        match self {
            SheetError::MissingParameter { .. }
            | SheetError::InvalidParameter { .. }
            | SheetError::UnsupportedFormat { .. }
            | SheetError::ParseFailed { .. } => StatusCode::BAD_REQUEST,
            SheetError::FetchFailed { cause, .. } => match cause {
                FetchCause::Timeout => StatusCode::GATEWAY_TIMEOUT,
                FetchCause::UpstreamServer(_) => StatusCode::BAD_GATEWAY,
                FetchCause::Unreachable | FetchCause::UpstreamClient(_) => {
                    StatusCode::BAD_REQUEST
                }
            },
            SheetError::SerializationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Extra detail exposed in the error body, when there is any.
    ///
    /// Only serialization failures expose a `details` field; everything
    /// else says what it has to say in the `error` message itself.
    pub fn details(&self) -> Option<&str> {
        match self {
            SheetError::SerializationFailed { detail } => Some(detail),
            _ => None,
        }
    }
}
