//! Record fetcher for the `deals` collection
//!
//! Issues a single list query with an explicit field projection so the
//! backend only returns what the export needs. No pagination: the server is
//! expected to return the complete result set in one response.

use crate::error::{Error, Result};
use crate::flatten::COLUMNS;
use crate::http::OpticalClient;
use serde_json::Value;
use tracing::info;

/// Fetch all deal records from the backend.
///
/// A non-success status aborts the run with the upstream body embedded in
/// the error. An envelope without a `data` array yields an empty set.
pub async fn fetch_deals(client: &OpticalClient) -> Result<Vec<Value>> {
    let query: Vec<(&str, String)> = COLUMNS
        .iter()
        .map(|column| ("fields[]", column.source_path()))
        .collect();

    let envelope = client
        .get_json("/items/deals", &query)
        .await
        .map_err(|e| Error::fetch(e.to_string()))?;

    let deals = envelope
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    info!("Fetched {} deals", deals.len());
    Ok(deals)
}
