//! Error types for the exporter
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Upstream HTTP failures carry the response body verbatim so the caller
//! sees exactly what the backend reported; no failure is retried.

use thiserror::Error;

/// The main error type for optical-export
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required environment variable: {name}")]
    MissingEnvVar { name: String },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Pipeline Stage Errors
    // ============================================================================
    #[error("Error fetching deals: {message}")]
    Fetch { message: String },

    #[error("Error checking folders: {message}")]
    FolderResolve { message: String },

    #[error("Error creating folder: {message}")]
    FolderCreate { message: String },

    #[error("Error searching for existing file: {message}")]
    FileLookup { message: String },

    #[error("Error uploading file: {message}")]
    FileUpload { message: String },

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O and Generic Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing environment variable error
    pub fn missing_env(name: impl Into<String>) -> Self {
        Self::MissingEnvVar { name: name.into() }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a fetch stage error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a folder resolution error
    pub fn folder_resolve(message: impl Into<String>) -> Self {
        Self::FolderResolve {
            message: message.into(),
        }
    }

    /// Create a folder creation error
    pub fn folder_create(message: impl Into<String>) -> Self {
        Self::FolderCreate {
            message: message.into(),
        }
    }

    /// Create a file lookup error
    pub fn file_lookup(message: impl Into<String>) -> Self {
        Self::FileLookup {
            message: message.into(),
        }
    }

    /// Create a file upload error
    pub fn file_upload(message: impl Into<String>) -> Self {
        Self::FileUpload {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}

/// Result type alias for optical-export
pub type Result<T> = std::result::Result<T, Error>;
