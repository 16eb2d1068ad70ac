//! Error types for the location resource.

use thiserror::Error;

/// Errors that can occur when fetching a coordinate from the data source.
///
/// None of these are fatal: the refresh cycle logs them and keeps the
/// previously stored value for the affected field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The body was not a JSON object.
    #[error("Failed to parse response: {0}")]
    InvalidJson(String),

    /// The requested field is absent from the response.
    #[error("Field '{0}' missing from response")]
    MissingField(&'static str),

    /// The requested field is present but not a number.
    #[error("Field '{field}' is not a number: {value}")]
    NotANumber { field: &'static str, value: String },
}

/// Errors returned to the protocol layer on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The resource identifier is not served by this object.
    #[error("Resource {0} is not supported")]
    Unsupported(u16),
}

/// Errors that can occur while constructing a location resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::Status {
                status: 503,
                url: "http://127.0.0.1:5000/get-location".to_string(),
            }
            .to_string(),
            "HTTP 503 from http://127.0.0.1:5000/get-location"
        );
        assert_eq!(
            FetchError::MissingField("latitude").to_string(),
            "Field 'latitude' missing from response"
        );
    }

    #[test]
    fn test_read_error_message() {
        assert_eq!(
            ReadError::Unsupported(99).to_string(),
            "Resource 99 is not supported"
        );
    }
}
