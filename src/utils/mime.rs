//! MIME type constants for frontend responses.

pub const HTML: &str = "text/html; charset=utf-8";
pub const PLAIN: &str = "text/plain; charset=utf-8";
pub const JSON: &str = "application/json";
pub const XML: &str = "application/xml";
pub const RSS: &str = "application/rss+xml";
