//! Execution of `HttpRequest` values over the network.
//!
//! `Transport` is the seam between request construction and I/O.
//! `BlockingTransport` owns one `reqwest::blocking::Client`, so the connection
//! pool and cookie store are shared by every request sent through it. It is
//! meant for use from a single thread.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, MultipartField, RequestBody};

/// Sends one request and returns the response, whatever its status.
///
/// Implementations must not interpret the status code; only failures to
/// obtain a response are errors.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct BlockingTransport {
    client: Client,
}

impl BlockingTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }

    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn attach_body(builder: RequestBuilder, body: RequestBody) -> Result<RequestBuilder, ApiError> {
        match body {
            RequestBody::Json(value) => Ok(builder.json(&value)),
            RequestBody::Form(pairs) => Ok(builder.form(&pairs)),
            RequestBody::Multipart(fields) => {
                let mut form = Form::new();
                for field in fields {
                    form = match field {
                        MultipartField::Text { name, value } => form.text(name, value),
                        MultipartField::File { name, file } => {
                            let part = Part::bytes(file.bytes)
                                .file_name(file.file_name)
                                .mime_str(&file.content_type)?;
                            form.part(name, part)
                        }
                    };
                }
                Ok(builder.multipart(form))
            }
        }
    }
}

impl Transport for BlockingTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body {
            builder = Self::attach_body(builder, body)?;
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::http::FilePart;

    /// Serve `replies.len()` requests on a fresh local port, one connection
    /// each, and forward every raw request (head + body) over the channel.
    fn serve(replies: Vec<String>) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for reply in replies {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut head = String::new();
                let mut content_length = 0;
                let mut chunked = false;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    let lower = line.to_ascii_lowercase();
                    if let Some(len) = lower.strip_prefix("content-length:") {
                        content_length = len.trim().parse().unwrap();
                    }
                    if lower.starts_with("transfer-encoding:") && lower.contains("chunked") {
                        chunked = true;
                    }
                    head.push_str(&line);
                    if line == "\r\n" {
                        break;
                    }
                }
                let body = if chunked {
                    read_chunked(&mut reader)
                } else {
                    let mut body = vec![0; content_length];
                    reader.read_exact(&mut body).unwrap();
                    body
                };
                head.push_str(&String::from_utf8_lossy(&body));
                tx.send(head).unwrap();

                let mut stream = stream;
                stream.write_all(reply.as_bytes()).unwrap();
            }
        });

        (base, rx)
    }

    fn read_chunked(reader: &mut impl BufRead) -> Vec<u8> {
        let mut body = Vec::new();
        loop {
            let mut size = String::new();
            reader.read_line(&mut size).unwrap();
            let size = usize::from_str_radix(size.trim(), 16).unwrap();
            let mut chunk = vec![0; size + 2];
            reader.read_exact(&mut chunk).unwrap();
            if size == 0 {
                return body;
            }
            body.extend_from_slice(&chunk[..size]);
        }
    }

    fn reply(extra_headers: &str, status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\n{extra_headers}Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn request(method: HttpMethod, url: String, body: Option<RequestBody>) -> HttpRequest {
        HttpRequest {
            method,
            url,
            query: Vec::new(),
            body,
        }
    }

    #[test]
    fn builds_from_default_config() {
        assert!(BlockingTransport::new(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn refused_connection_is_transport_error() {
        // Reserve a free port, then release it so nothing is listening.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = ClientConfig::default().with_timeout(Duration::from_secs(5));
        let transport = BlockingTransport::new(&config).unwrap();

        let err = transport
            .send(HttpRequest {
                method: HttpMethod::Get,
                url: format!("http://127.0.0.1:{port}/pet/1"),
                query: Vec::new(),
                body: None,
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn cookies_from_one_response_ride_on_later_requests() {
        let (base, rx) = serve(vec![
            reply("Set-Cookie: sid=abc; Path=/\r\n", "200 OK", "{}"),
            reply("", "200 OK", r#"{"code":200}"#),
            reply("", "200 OK", r#"{"code":200}"#),
            reply("", "404 Not Found", r#"{"message":"Pet not found"}"#),
        ]);
        let transport = BlockingTransport::new(&ClientConfig::default()).unwrap();

        let first = transport
            .send(request(HttpMethod::Get, format!("{base}/pet/1"), None))
            .unwrap();
        assert_eq!(first.status, 200);
        assert!(!rx.recv().unwrap().to_ascii_lowercase().contains("cookie:"));

        transport
            .send(request(
                HttpMethod::Post,
                format!("{base}/pet/1"),
                Some(RequestBody::form(&[("status", "sold")])),
            ))
            .unwrap();
        let form = rx.recv().unwrap();
        assert!(form.to_ascii_lowercase().contains("cookie: sid=abc"), "{form}");
        assert!(form.ends_with("status=sold"), "{form}");

        transport
            .send(request(
                HttpMethod::Post,
                format!("{base}/pet/1/uploadImage"),
                Some(RequestBody::Multipart(vec![MultipartField::File {
                    name: "file".to_string(),
                    file: FilePart::new("a.jpg", vec![1, 2, 3]),
                }])),
            ))
            .unwrap();
        let upload = rx.recv().unwrap();
        assert!(upload.to_ascii_lowercase().contains("cookie: sid=abc"), "{upload}");
        assert!(upload.contains(r#"name="file"; filename="a.jpg""#), "{upload}");
        assert!(upload.contains("image/jpeg"), "{upload}");

        let missing = transport
            .send(request(
                HttpMethod::Put,
                format!("{base}/pet"),
                Some(RequestBody::Json(json!({"a": 1}))),
            ))
            .unwrap();
        let put = rx.recv().unwrap();
        assert!(put.to_ascii_lowercase().contains("cookie: sid=abc"), "{put}");
        assert!(put.ends_with(r#"{"a":1}"#), "{put}");
        assert_eq!(missing.status, 404);
        assert!(missing.body.contains("Pet not found"));
    }
}
