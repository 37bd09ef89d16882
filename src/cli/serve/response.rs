//! HTTP responses.
//!
//! Handlers produce a [`Reply`]; only [`send`] touches `tiny_http`.

use crate::utils::mime;
use anyhow::Result;
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// A finished response, independent of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    pub fn html(status: u16, body: String) -> Self {
        Self::new(status, mime::HTML, body)
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, mime::PLAIN, body)
    }

    /// Serialize `value`; a serializer failure becomes a 500.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::new(status, mime::JSON, body),
            Err(e) => Self::text(500, format!("500 Internal Server Error: {e}")),
        }
    }

    pub fn unavailable() -> Self {
        Self::text(503, "503 Service Unavailable")
    }

    pub fn method_not_allowed() -> Self {
        Self::text(405, "405 Method Not Allowed")
    }
}

/// Write `reply` to the client. HEAD requests get headers only.
pub fn send(request: Request, reply: Reply) -> Result<()> {
    let content_type = make_header("Content-Type", reply.content_type)?;

    if is_head_request(&request) {
        let response = Response::empty(StatusCode(reply.status)).with_header(content_type);
        request.respond(response)?;
        return Ok(());
    }

    let response = Response::from_string(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(content_type);
    request.respond(response)?;
    Ok(())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn make_header(key: &'static str, value: &'static str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow::anyhow!("invalid header {key}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_reply() {
        let mut map = BTreeMap::new();
        map.insert("isLiked", true);
        let reply = Reply::json(200, &map);
        assert_eq!(reply.content_type, mime::JSON);
        assert_eq!(reply.body, r#"{"isLiked":true}"#);
    }

    #[test]
    fn test_fixed_replies() {
        assert_eq!(Reply::unavailable().status, 503);
        assert_eq!(Reply::method_not_allowed().status, 405);
        assert_eq!(Reply::text(404, "x").content_type, mime::PLAIN);
    }
}
