//! In-memory CSV serialization
//!
//! Writes the flattened records into a `Vec<u8>` buffer: one header row of
//! the 21 column names, then one row per input record in input order. The
//! buffer lives only for the duration of a run and is handed to the
//! publisher exactly once.

use crate::error::{Error, Result};
use crate::flatten::{flatten_deal, COLUMNS};
use serde_json::Value;
use tracing::debug;

/// Serialize raw deal records into an in-memory CSV buffer
pub fn deals_to_csv(deals: &[Value]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(COLUMNS.iter().map(|column| column.name))?;
    for deal in deals {
        writer.write_record(flatten_deal(deal))?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| Error::output(format!("Failed to flush CSV buffer: {e}")))?;

    debug!("Serialized {} records to {} bytes", deals.len(), buffer.len());
    Ok(buffer)
}
