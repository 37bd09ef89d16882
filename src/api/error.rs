//! Backend API error types.

use thiserror::Error;

/// Failures talking to the backend REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to backend failed")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status} for `{path}`")]
    Status { status: u16, path: String },

    #[error("not found: `{0}`")]
    NotFound(String),

    #[error("forbidden: `{0}`")]
    Forbidden(String),

    #[error("not logged in")]
    Unauthorized,

    #[error("unexpected payload from `{path}`")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Map a non-success HTTP status to an error.
    pub fn from_status(status: u16, path: &str) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden(path.to_string()),
            404 => Self::NotFound(path.to_string()),
            _ => Self::Status {
                status,
                path: path.to_string(),
            },
        }
    }

    /// HTTP status the frontend should answer with when this error ends a page.
    pub fn page_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Forbidden(_) | Self::Unauthorized => 403,
            _ => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(ApiError::from_status(401, "/x"), ApiError::Unauthorized));
        assert!(matches!(ApiError::from_status(403, "/x"), ApiError::Forbidden(_)));
        assert!(matches!(ApiError::from_status(404, "/x"), ApiError::NotFound(_)));
        assert!(matches!(
            ApiError::from_status(500, "/x"),
            ApiError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn test_page_status() {
        assert_eq!(ApiError::NotFound("/p".into()).page_status(), 404);
        assert_eq!(ApiError::Forbidden("/p".into()).page_status(), 403);
        assert_eq!(ApiError::from_status(503, "/p").page_status(), 502);
    }

    #[test]
    fn test_display() {
        let err = ApiError::from_status(500, "/api/v1/posts");
        assert_eq!(err.to_string(), "backend returned 500 for `/api/v1/posts`");
    }
}
