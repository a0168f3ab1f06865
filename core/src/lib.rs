//! Blocking client core for the pet-store HTTP API.
//!
//! # Overview
//! `ApiClient` wraps GET/POST/PUT/DELETE against one fixed base URL, logs
//! every request and response, and fails on any non-2xx status. `Pet` and
//! `ApiResponse` validate the payloads going out and coming back.
//!
//! # Design
//! - Requests are built as plain `HttpRequest` data and executed by a
//!   `Transport`; `BlockingTransport` is the reqwest-backed implementation.
//! - A request body is one `RequestBody` variant: JSON, form or multipart.
//! - No retries. Transport failures, HTTP statuses and schema violations
//!   are distinct `ApiError` variants returned to the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod pets;
pub mod telemetry;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, SchemaError};
pub use http::{FilePart, HttpMethod, HttpRequest, HttpResponse, MultipartField, RequestBody};
pub use transport::{BlockingTransport, Transport};
pub use types::{status, ApiResponse, Category, Pet, PetUpdate, Tag};
