//! Per-request orchestration: validated query in, JSON-ready page out.
//!
//! One invocation of [`process_request`] owns everything it touches — the
//! fetched bytes, the parsed [`Table`], the assembled page — and drops it
//! all when the response is written. No state survives the request, which
//! is what makes concurrent requests trivially isolated from each other.

use crate::config::ServiceConfig;
use crate::error::SheetError;
use crate::pipeline::detect::FileFormat;
use crate::pipeline::paginate::{page_bounds, PaginationMeta};
use crate::pipeline::{fetch, parse};
use crate::request::{PageRequest, RawDataQuery};
use crate::table::Table;
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, info};

/// The success body of `/api/data`: one page of rows plus pagination
/// metadata.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse {
    pub data: Vec<Value>,
    pub pagination: PaginationMeta,
}

impl DataResponse {
    /// Serialize the response body.
    ///
    /// This is the single place an internal fault can surface: anything the
    /// assembler produced that JSON cannot represent is reported as
    /// [`SheetError::SerializationFailed`] rather than a mangled body.
    pub fn to_body(&self) -> Result<String, SheetError> {
        serde_json::to_string(self).map_err(|e| SheetError::SerializationFailed {
            detail: e.to_string(),
        })
    }
}

/// Run the full pipeline for one `/api/data` request.
pub async fn process_request(
    client: &reqwest::Client,
    config: &ServiceConfig,
    raw: RawDataQuery,
) -> Result<DataResponse, SheetError> {
    let total_start = Instant::now();

    // ── Step 1: Validate query parameters ────────────────────────────────
    let request = PageRequest::from_raw(raw, config.default_rows_per_page)?;
    info!(
        "Processing request: url={} page={} rows_per_page={}",
        request.url, request.page, request.rows_per_page
    );

    // ── Step 2: Detect format (before any bytes move) ────────────────────
    let format = FileFormat::detect(&request.url)?;
    debug!("Detected format: {}", format);

    // ── Step 3: Fetch the file ───────────────────────────────────────────
    let fetch_start = Instant::now();
    let bytes = fetch::fetch(client, &request.url, config.fetch_timeout_secs).await?;
    debug!(
        "Fetched {} bytes in {}ms",
        bytes.len(),
        fetch_start.elapsed().as_millis()
    );

    // ── Step 4: Parse into a table ───────────────────────────────────────
    // Parsing is CPU-bound and proportional to file size; keep it off the
    // async worker threads.
    let table = tokio::task::spawn_blocking(move || parse::parse(&bytes, format))
        .await
        .map_err(|e| SheetError::ParseFailed {
            detail: format!("parser task failed: {e}"),
        })??;

    // ── Step 5: Slice the page and assemble the body ─────────────────────
    let push_date = Utc::now().format("%Y-%m-%d").to_string();
    let response = assemble(&table, request.page, request.rows_per_page, &push_date);

    info!(
        "Request complete: {}/{} rows served, {}ms total",
        response.data.len(),
        table.total_rows(),
        total_start.elapsed().as_millis()
    );
    Ok(response)
}

/// Pure assembly: pick the page slice and render rows as JSON objects in
/// source-column order, each stamped with the same `pushDate`.
///
/// Duplicate column names collapse here: the key keeps its first-seen
/// position in the object and the last duplicate's cell wins.
///
/// `rows_per_page` must be ≥ 1 (the validator guarantees this for every
/// request the service builds; see [`PaginationMeta::new`]).
pub fn assemble(table: &Table, page: u64, rows_per_page: u64, push_date: &str) -> DataResponse {
    let pagination = PaginationMeta::new(page, table.total_rows(), rows_per_page);
    let (start, end) = page_bounds(table, page, rows_per_page);

    let data = table.rows[start..end]
        .iter()
        .map(|row| {
            let mut obj = Map::with_capacity(table.columns.len() + 1);
            for (name, cell) in table.columns.iter().zip(row.iter()) {
                obj.insert(name.clone(), cell.clone().into_json());
            }
            obj.insert("pushDate".to_string(), Value::String(push_date.to_string()));
            Value::Object(obj)
        })
        .collect();

    DataResponse { data, pagination }
}
