//! HTTP client wrapper over a fixed base URL.
//!
//! # Design
//! `ApiClient` holds the base URL and one `Transport`. Each verb builds an
//! `HttpRequest` with `build_request`, logs it, hands it to the transport,
//! logs the response, and only then checks the status. The log trail is
//! therefore complete on error paths too.
//!
//! Nothing is retried. Any status outside 200..=299 becomes
//! `ApiError::Http` carrying the status and raw body.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::transport::{BlockingTransport, Transport};

/// Uniform GET/POST/PUT/DELETE access to one service root.
///
/// Construct one per test or test group and pass it explicitly. The
/// underlying transport, and with it the connection pool and cookies, is
/// reused across every call made through the same client.
#[derive(Debug, Clone)]
pub struct ApiClient<T = BlockingTransport> {
    base_url: String,
    transport: T,
}

impl ApiClient<BlockingTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = BlockingTransport::new(config)?;
        Ok(Self::with_transport(&config.base_url, transport))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe a request against `base_url + endpoint` without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &[(&str, &str)],
        body: Option<RequestBody>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{endpoint}", self.base_url),
            query: params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            body,
        }
    }

    /// GET `endpoint` with optional query parameters; returns the JSON body.
    pub fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.get_json(endpoint, params)
    }

    /// POST `endpoint` with at most one body; returns the JSON body.
    pub fn post(&self, endpoint: &str, body: Option<RequestBody>) -> Result<Value, ApiError> {
        self.post_json(endpoint, body)
    }

    /// PUT `endpoint` with a JSON body; returns the JSON body.
    pub fn put(&self, endpoint: &str, json: Value) -> Result<Value, ApiError> {
        self.put_json(endpoint, &json)
    }

    /// DELETE `endpoint`; returns the response status code.
    pub fn delete(&self, endpoint: &str) -> Result<u16, ApiError> {
        let response = self.execute(self.build_request(HttpMethod::Delete, endpoint, &[], None))?;
        Ok(response.status)
    }

    pub fn get_json<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let response = self.execute(self.build_request(HttpMethod::Get, endpoint, params, None))?;
        parse_json(&response)
    }

    pub fn post_json<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<RequestBody>,
    ) -> Result<R, ApiError> {
        let response = self.execute(self.build_request(HttpMethod::Post, endpoint, &[], body))?;
        parse_json(&response)
    }

    /// PUT any serializable payload as JSON and deserialize the reply.
    pub fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        json: &B,
    ) -> Result<R, ApiError> {
        let json = serde_json::to_value(json).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let response = self.execute(self.build_request(
            HttpMethod::Put,
            endpoint,
            &[],
            Some(RequestBody::Json(json)),
        ))?;
        parse_json(&response)
    }

    /// Send `request`, logging both directions, and fail on non-2xx.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        match &request.body {
            Some(body) => info!(%method, %url, params = ?request.query, payload = %body, "sending request"),
            None => info!(%method, %url, params = ?request.query, "sending request"),
        }

        let response = self.transport.send(request)?;
        info!(%method, %url, status = response.status, body = %response.body, "received response");

        check_status(response)
    }
}

/// Pass 2xx responses through; turn anything else into `ApiError::Http`.
pub fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    warn!(status = response.status, "non-success status");
    Err(ApiError::Http {
        status: response.status,
        body: response.body,
    })
}

/// Deserialize a response body. An empty body reads as JSON `null`.
pub fn parse_json<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    let result = if response.body.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(&response.body)
    };
    result.map_err(|e| ApiError::DeserializationError(e.to_string()))
}
