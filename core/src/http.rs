//! HTTP request and response types described as plain data.
//!
//! # Design
//! `ApiClient` builds an `HttpRequest` and hands it to a `Transport`, which
//! returns an `HttpResponse`. Keeping both sides as data lets the wrapper's
//! URL joining, body selection and status handling be tested without a
//! network.
//!
//! A request carries at most one body, chosen through the `RequestBody`
//! variant; the transport picks the matching encoding.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file attached to a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Build a part from in-memory bytes, guessing the MIME type from
    /// `file_name`.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a file from disk into a part named after its final path segment.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartField {
    Text { name: String, value: String },
    File { name: String, file: FilePart },
}

impl fmt::Display for MultipartField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { name, value } => write!(f, "{name}={value}"),
            Self::File { name, file } => write!(
                f,
                "{name}: {} ({}, {} bytes)",
                file.file_name,
                file.content_type,
                file.bytes.len()
            ),
        }
    }
}

/// The single body a request may carry.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/json`.
    Json(Value),
    /// `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
    /// `multipart/form-data`.
    Multipart(Vec<MultipartField>),
}

impl RequestBody {
    /// Form body from borrowed pairs.
    pub fn form(pairs: &[(&str, &str)]) -> Self {
        Self::Form(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }
}

/// Log-friendly description. File contents are summarized, never dumped.
impl fmt::Display for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "json {value}"),
            Self::Form(pairs) => write!(f, "form {pairs:?}"),
            Self::Multipart(fields) => {
                f.write_str("multipart [")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `ApiClient::build_request` and executed by a `Transport`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn file_part_guesses_mime_from_name() {
        let part = FilePart::new("sample_image.jpg", vec![0xff, 0xd8]);
        assert_eq!(part.content_type, "image/jpeg");

        let part = FilePart::new("blob", vec![1, 2, 3]);
        assert_eq!(part.content_type, "application/octet-stream");
    }

    #[test]
    fn file_part_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let part = FilePart::from_path(&path).unwrap();
        assert_eq!(part.file_name, "photo.png");
        assert_eq!(part.content_type, "image/png");
        assert_eq!(part.bytes, b"not really a png");
    }

    #[test]
    fn file_part_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FilePart::from_path(dir.path().join("missing.jpg")).unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }

    #[test]
    fn multipart_description_summarizes_files() {
        let body = RequestBody::Multipart(vec![
            MultipartField::Text {
                name: "additionalMetadata".to_string(),
                value: "front view".to_string(),
            },
            MultipartField::File {
                name: "file".to_string(),
                file: FilePart::new("dog.jpg", vec![0; 1024]),
            },
        ]);
        assert_eq!(
            body.to_string(),
            "multipart [additionalMetadata=front view, file: dog.jpg (image/jpeg, 1024 bytes)]"
        );
    }

    #[test]
    fn json_and_form_descriptions() {
        assert_eq!(
            RequestBody::Json(json!({"name": "Buddy"})).to_string(),
            r#"json {"name":"Buddy"}"#
        );
        assert_eq!(
            RequestBody::form(&[("status", "sold")]).to_string(),
            r#"form [("status", "sold")]"#
        );
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(HttpResponse::new(299, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(300, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
