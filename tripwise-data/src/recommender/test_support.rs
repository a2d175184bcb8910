//! Test utilities for recommenders.
//!
//! This module provides [`StubGateway`], a loopback HTTP server that answers
//! a single request with a canned response, so [`HttpRecommender`] can be
//! exercised end to end without a real gateway.
//!
//! [`HttpRecommender`]: super::HttpRecommender

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use serde_json::json;

/// A captured request line, headers and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedRequest {
    /// `METHOD PATH VERSION`.
    pub request_line: String,
    /// Header lines as received, lower-cased names.
    pub headers: Vec<(String, String)>,
    /// Raw request body.
    pub body: String,
}

impl CapturedRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        let wanted = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, value)| value.as_str())
    }
}

/// Loopback server answering one request with a canned response.
///
/// # Example
///
/// ```
/// use tripwise_data::recommender::test_support::{StubGateway, completion_body};
///
/// let gateway = StubGateway::respond(200, &[], &completion_body("[]"))?;
/// assert!(gateway.base_url().starts_with("http://127.0.0.1:"));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct StubGateway {
    base_url: String,
    handle: JoinHandle<io::Result<CapturedRequest>>,
}

impl StubGateway {
    /// Start a server that replies with `status`, extra `headers` and `body`.
    ///
    /// # Errors
    ///
    /// Returns an error if the loopback listener cannot be bound.
    pub fn respond(status: u16, headers: &[(&str, &str)], body: &str) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let base_url = format!("http://{}/v1", listener.local_addr()?);
        let response = render_response(status, headers, body);
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept()?;
            serve_once(stream, &response)
        });
        Ok(Self { base_url, handle })
    }

    /// Base URL to configure the recommender with.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wait for the request to be served and return what was received.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection failed or the server thread
    /// panicked.
    pub fn finish(self) -> io::Result<CapturedRequest> {
        self.handle
            .join()
            .map_err(|_| io::Error::other("stub gateway thread panicked"))?
    }
}

/// Wrap assistant `content` in a minimal chat-completion body.
#[must_use]
pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-stub",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}}
        ]
    })
    .to_string()
}

fn render_response(status: u16, headers: &[(&str, &str)], body: &str) -> String {
    let extra: String = headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}\r\n"))
        .collect();
    format!(
        "HTTP/1.1 {status} STUB\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\
         connection: close\r\n{extra}\r\n{body}",
        body.len()
    )
}

fn serve_once(stream: TcpStream, response: &str) -> io::Result<CapturedRequest> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut captured = CapturedRequest::default();
    reader.read_line(&mut captured.request_line)?;
    captured.request_line = captured.request_line.trim_end().to_owned();

    let mut content_length = 0_usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            let key = name.trim().to_ascii_lowercase();
            let val = value.trim().to_owned();
            if key == "content-length" {
                content_length = val.parse().unwrap_or(0);
            }
            captured.headers.push((key, val));
        }
    }

    let mut body = vec![0_u8; content_length];
    reader.read_exact(&mut body)?;
    captured.body = String::from_utf8_lossy(&body).into_owned();

    let mut writer = stream;
    writer.write_all(response.as_bytes())?;
    writer.flush()?;
    Ok(captured)
}
