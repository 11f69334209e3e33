//! Folder resolution and create-or-replace file upload
//!
//! Three sequential upstream calls, no rollback: resolve (or create) the
//! target folder, look up an existing file with the target name, then PATCH
//! the existing file or POST a new one. A failure at any step aborts the run
//! with the upstream response body embedded in the error.

use crate::error::{Error, Result};
use crate::http::OpticalClient;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use tracing::{debug, info};

/// MIME type declared for uploaded exports
const CSV_MIME: &str = "text/csv";

/// Upload a CSV buffer into the named folder, replacing any existing file
/// with the same download filename.
pub async fn publish_csv(
    client: &OpticalClient,
    folder_name: &str,
    filename: &str,
    buffer: Vec<u8>,
) -> Result<()> {
    let folder_id = resolve_folder(client, folder_name).await?;
    let existing = find_existing_file(client, &folder_id, filename).await?;

    let form = upload_form(buffer, filename, &folder_id)?;
    match existing {
        Some(file_id) => {
            debug!("Replacing existing file {file_id}");
            client
                .patch_multipart(&format!("/files/{file_id}"), form)
                .await
                .map_err(|e| Error::file_upload(e.to_string()))?;
            info!("Replaced {filename} in folder '{folder_name}'");
        }
        None => {
            client
                .post_multipart("/files", form)
                .await
                .map_err(|e| Error::file_upload(e.to_string()))?;
            info!("Created {filename} in folder '{folder_name}'");
        }
    }

    Ok(())
}

/// Find the folder by exact name, creating it at the root if absent.
/// Returns the upstream folder id.
async fn resolve_folder(client: &OpticalClient, folder_name: &str) -> Result<String> {
    let envelope = client
        .get_json("/folders", &[("filter[name][_eq]", folder_name.to_string())])
        .await
        .map_err(|e| Error::folder_resolve(e.to_string()))?;

    if let Some(id) = first_match_id(&envelope) {
        debug!("Found folder '{folder_name}' with id {id}");
        return Ok(id);
    }

    let created = client
        .post_json("/folders", &json!({ "name": folder_name, "parent": null }))
        .await
        .map_err(|e| Error::folder_create(e.to_string()))?;

    let id = created
        .get("data")
        .and_then(|data| data.get("id"))
        .and_then(value_to_id)
        .ok_or_else(|| {
            Error::folder_create(format!("create response missing folder id: {created}"))
        })?;

    info!("Created folder '{folder_name}' with id {id}");
    Ok(id)
}

/// Look up a file by (folder id, download filename). Returns its id if found.
async fn find_existing_file(
    client: &OpticalClient,
    folder_id: &str,
    filename: &str,
) -> Result<Option<String>> {
    let envelope = client
        .get_json(
            "/files",
            &[
                ("filter[folder][_eq]", folder_id.to_string()),
                ("filter[filename_download][_eq]", filename.to_string()),
            ],
        )
        .await
        .map_err(|e| Error::file_lookup(e.to_string()))?;

    Ok(first_match_id(&envelope))
}

/// Build the multipart body: the file part plus the folder id as form text
fn upload_form(buffer: Vec<u8>, filename: &str, folder_id: &str) -> Result<Form> {
    let part = Part::bytes(buffer)
        .file_name(filename.to_string())
        .mime_str(CSV_MIME)?;
    Ok(Form::new()
        .text("folder", folder_id.to_string())
        .part("file", part))
}

/// Extract the first match's id from a `{data: [...]}` list envelope
fn first_match_id(envelope: &Value) -> Option<String> {
    envelope
        .get("data")
        .and_then(Value::as_array)
        .and_then(|matches| matches.first())
        .and_then(|entry| entry.get("id"))
        .and_then(value_to_id)
}

/// Upstream ids arrive as JSON strings or numbers; render both as strings
fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
