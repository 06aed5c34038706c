//! Request validation: raw query strings → a validated [`PageRequest`].
//!
//! The query parameters arrive as strings so that this module, not the
//! framework, decides what a malformed value means. Letting the extractor
//! deserialize integers directly would turn `page=abc` into a framework
//! 400 with an unpinned body; parsing here keeps the documented error
//! messages under our control.
//!
//! Validation is pure — no I/O, no side effects — and defaults apply only
//! to absent parameters. A parameter that is present but invalid is always
//! an error, never silently replaced.

use crate::config::MAX_ROWS_PER_PAGE;
use crate::error::SheetError;
use serde::Deserialize;

/// Raw `/api/data` query parameters, exactly as extracted from the URL.
#[derive(Debug, Default, Deserialize)]
pub struct RawDataQuery {
    pub url: Option<String>,
    pub page: Option<String>,
    pub rows_per_page: Option<String>,
}

/// A validated request: the spreadsheet URL plus pagination coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    /// 1-indexed page number. Always ≥ 1.
    pub page: u64,
    /// Rows per page. Always in `1..=MAX_ROWS_PER_PAGE`.
    pub rows_per_page: u64,
}

impl PageRequest {
    /// Validate raw query parameters.
    ///
    /// * missing or empty `url` → [`SheetError::MissingParameter`]
    /// * `page` not a positive integer → [`SheetError::InvalidParameter`]
    /// * `rows_per_page` not a positive integer, or above
    ///   [`MAX_ROWS_PER_PAGE`] → [`SheetError::InvalidParameter`] (the
    ///   ceiling is enforced by rejection, not clamping)
    pub fn from_raw(raw: RawDataQuery, default_rows_per_page: u64) -> Result<Self, SheetError> {
        let url = match raw.url {
            Some(u) if !u.trim().is_empty() => u,
            _ => return Err(SheetError::MissingParameter { name: "URL" }),
        };

        let page = match raw.page {
            None => 1,
            Some(p) => parse_positive(&p).ok_or_else(|| SheetError::InvalidParameter {
                name: "page",
                message: "Page parameter must be a valid integer".to_string(),
            })?,
        };

        let rows_per_page = match raw.rows_per_page {
            None => default_rows_per_page,
            Some(r) => {
                let n = parse_positive(&r).ok_or_else(|| SheetError::InvalidParameter {
                    name: "rows_per_page",
                    message: "Rows per page parameter must be a valid integer".to_string(),
                })?;
                if n > MAX_ROWS_PER_PAGE {
                    return Err(SheetError::InvalidParameter {
                        name: "rows_per_page",
                        message: format!(
                            "Rows per page parameter must be between 1 and {MAX_ROWS_PER_PAGE}"
                        ),
                    });
                }
                n
            }
        };

        Ok(Self {
            url,
            page,
            rows_per_page,
        })
    }
}

/// Parse a strictly positive integer, tolerating surrounding whitespace.
fn parse_positive(s: &str) -> Option<u64> {
    match s.trim().parse::<u64>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
