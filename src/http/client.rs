//! Bearer-token HTTP client for the Optical API
//!
//! Wraps a single `reqwest::Client` with base-URL joining, bearer
//! authorization, and uniform status handling. Non-2xx responses become
//! [`Error::HttpStatus`] with the upstream body preserved verbatim.

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

/// HTTP client bound to one Optical backend and token
pub struct OpticalClient {
    client: Client,
    base_url: String,
    token: String,
}

impl OpticalClient {
    /// Create a client from an export configuration
    pub fn new(config: &ExportConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("optical-export/{}", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url_trimmed().to_string(),
            token: config.token.clone(),
        })
    }

    /// Make a GET request with query parameters and parse the JSON response
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut req = self.request(Method::GET, path);
        if !query.is_empty() {
            req = req.query(query);
        }
        self.send(req, Method::GET, path).await
    }

    /// Make a POST request with a JSON body and parse the JSON response
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let req = self.request(Method::POST, path).json(body);
        self.send(req, Method::POST, path).await
    }

    /// Make a POST request with a multipart body and parse the JSON response
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value> {
        let req = self.request(Method::POST, path).multipart(form);
        self.send(req, Method::POST, path).await
    }

    /// Make a PATCH request with a multipart body and parse the JSON response
    pub async fn patch_multipart(&self, path: &str, form: Form) -> Result<Value> {
        let req = self.request(Method::PATCH, path).multipart(form);
        self.send(req, Method::PATCH, path).await
    }

    /// Build an authorized request for a path relative to the base URL
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.build_url(path))
            .bearer_auth(&self.token)
    }

    /// Send a request and convert the response into JSON or an error
    async fn send(&self, req: RequestBuilder, method: Method, path: &str) -> Result<Value> {
        let response = req.send().await?;
        let value = Self::handle(response).await?;
        debug!("Request succeeded: {} {}", method, path);
        Ok(value)
    }

    /// Convert a response into parsed JSON, or an error carrying the body
    async fn handle(response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url)
    }
}

impl std::fmt::Debug for OpticalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpticalClient")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .finish_non_exhaustive()
    }
}
