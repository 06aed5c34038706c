//! Pipeline stages for spreadsheet-to-JSON conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. add content sniffing to detection) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! detect ──▶ fetch ──▶ parse ──▶ paginate
//! (URL ext)  (reqwest)  (csv/calamine)  (pure slicing)
//! ```
//!
//! 1. [`detect`]   — classify the URL's extension; unsupported formats are
//!    rejected before any bytes move
//! 2. [`fetch`]    — download the file fully into memory; the only stage
//!    with network I/O, bounded by the configured timeout
//! 3. [`parse`]    — header + typed rows out of CSV or the first Excel
//!    worksheet, normalized to the closed [`crate::table::Cell`] taxonomy
//! 4. [`paginate`] — pure page arithmetic over the parsed table

pub mod detect;
pub mod fetch;
pub mod paginate;
pub mod parse;
