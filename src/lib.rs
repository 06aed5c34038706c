//! # sheet2json
//!
//! Serve remote Excel/CSV spreadsheets as paginated JSON over HTTP.
//!
//! ## Why this crate?
//!
//! Front-ends frequently need to preview a spreadsheet that lives behind a
//! URL — an export bucket, a shared report, a public dataset — without
//! downloading and parsing it client-side. sheet2json does the fetch and
//! parse server-side and answers with plain JSON pages, so the client deals
//! with one small, uniform payload regardless of the source format.
//!
//! ## Pipeline Overview
//!
//! ```text
//! GET /api/data?url=…&page=…&rows_per_page=…
//!  │
//!  ├─ 1. Validate  query params → PageRequest (pure, pinned error bodies)
//!  ├─ 2. Detect    URL extension → csv | xls | xlsx (before any fetch)
//!  ├─ 3. Fetch     single reqwest GET, bounded timeout, fully buffered
//!  ├─ 4. Parse     csv crate / calamine → Table of typed Cells
//!  ├─ 5. Paginate  pure slice + ceil-division metadata
//!  └─ 6. Assemble  rows → JSON objects + pushDate stamp
//! ```
//!
//! The service is stateless: each request owns its table and drops it with
//! the response. There is no caching, no retry, and no shared mutable state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sheet2json::{serve, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServiceConfig::from_env().expect("invalid configuration");
//!     serve(config).await
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sheet2json` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when embedding only the library:
//! ```toml
//! sheet2json = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod request;
pub mod server;
pub mod table;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ServiceConfig, ServiceConfigBuilder, MAX_ROWS_PER_PAGE};
pub use error::{FetchCause, SheetError};
pub use pipeline::detect::FileFormat;
pub use pipeline::paginate::PaginationMeta;
pub use process::{assemble, process_request, DataResponse};
pub use request::{PageRequest, RawDataQuery};
pub use server::{router, serve, AppState};
pub use table::{Cell, Table};
