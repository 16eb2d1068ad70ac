//! Location source trait and HTTP implementation.
//!
//! The [`LocationSource`] trait abstracts over where coordinates come from.
//! The [`HttpLocationSource`] implementation asks a local HTTP endpoint for
//! a JSON object such as `{"latitude": 48.8, "longitude": 2.3}` and reads
//! one field per request.
//!
//! A source is only ever driven by the refresh scheduler, so the network
//! round trip never happens on a read path.

use std::future::Future;

use serde_json::Value;

use super::error::FetchError;
use super::http::AsyncHttpClient;

/// Default endpoint serving the sensor position.
pub const DEFAULT_SOURCE_URL: &str = "http://127.0.0.1:5000/get-location";

/// Coordinate field that can be fetched from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationField {
    Latitude,
    Longitude,
}

impl LocationField {
    /// JSON key carrying this field in the source response.
    pub fn key(self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

impl std::fmt::Display for LocationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Trait for fetching a single coordinate from an external source.
///
/// Each call is one attempt: no retries and no caching.
pub trait LocationSource: Send + Sync {
    /// Fetch the current value of `field`.
    fn fetch(&self, field: LocationField) -> impl Future<Output = Result<f64, FetchError>> + Send;
}

/// Location source backed by an HTTP endpoint returning JSON.
pub struct HttpLocationSource<C: AsyncHttpClient> {
    /// HTTP client used for the request.
    http: C,

    /// Endpoint returning the position object.
    url: String,
}

impl<C: AsyncHttpClient> HttpLocationSource<C> {
    /// Create a source that queries `url` through `http`.
    pub fn new(http: C, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// The endpoint this source queries.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<C: AsyncHttpClient> LocationSource for HttpLocationSource<C> {
    async fn fetch(&self, field: LocationField) -> Result<f64, FetchError> {
        let result = match self.http.get(&self.url).await {
            Ok(body) => parse_field(&body, field),
            Err(e) => Err(e),
        };

        match &result {
            Ok(value) => {
                tracing::trace!(field = %field, value, "Location field fetched");
            }
            Err(e) => {
                tracing::debug!(field = %field, url = %self.url, error = %e, "Location fetch failed");
            }
        }

        result
    }
}

/// Extract one numeric field from a JSON object body.
pub(crate) fn parse_field(body: &[u8], field: LocationField) -> Result<f64, FetchError> {
    let root: Value =
        serde_json::from_slice(body).map_err(|e| FetchError::InvalidJson(e.to_string()))?;

    let object = root
        .as_object()
        .ok_or_else(|| FetchError::InvalidJson("response is not a JSON object".to_string()))?;

    let value = object
        .get(field.key())
        .ok_or(FetchError::MissingField(field.key()))?;

    value.as_f64().ok_or_else(|| FetchError::NotANumber {
        field: field.key(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::http::MockHttpClient;

    #[test]
    fn test_field_keys() {
        assert_eq!(LocationField::Latitude.key(), "latitude");
        assert_eq!(LocationField::Longitude.key(), "longitude");
        assert_eq!(LocationField::Longitude.to_string(), "longitude");
    }

    #[test]
    fn test_parse_field_reads_requested_key() {
        let body = br#"{"latitude": 48.8, "longitude": 2.3}"#;

        assert_eq!(parse_field(body, LocationField::Latitude), Ok(48.8));
        assert_eq!(parse_field(body, LocationField::Longitude), Ok(2.3));
    }

    #[test]
    fn test_parse_field_accepts_integers_and_extra_fields() {
        let body = br#"{"latitude": 48, "longitude": -2, "sensor": "gps-1", "alt": 35.0}"#;

        assert_eq!(parse_field(body, LocationField::Latitude), Ok(48.0));
        assert_eq!(parse_field(body, LocationField::Longitude), Ok(-2.0));
    }

    #[test]
    fn test_parse_field_missing() {
        let body = br#"{"latitude": 48.8}"#;

        assert_eq!(
            parse_field(body, LocationField::Longitude),
            Err(FetchError::MissingField("longitude"))
        );
    }

    #[test]
    fn test_parse_field_not_a_number() {
        let body = br#"{"latitude": "48.8"}"#;

        assert!(matches!(
            parse_field(body, LocationField::Latitude),
            Err(FetchError::NotANumber { field: "latitude", .. })
        ));

        let body = br#"{"latitude": null}"#;
        assert!(matches!(
            parse_field(body, LocationField::Latitude),
            Err(FetchError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_parse_field_malformed_body() {
        assert!(matches!(
            parse_field(b"GET NOT WORKED", LocationField::Latitude),
            Err(FetchError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_field(b"[48.8, 2.3]", LocationField::Latitude),
            Err(FetchError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn test_http_source_fetches_field() {
        let source = HttpLocationSource::new(
            MockHttpClient::with_body(r#"{"latitude": 53.63, "longitude": 9.99}"#),
            DEFAULT_SOURCE_URL,
        );

        assert_eq!(source.fetch(LocationField::Latitude).await, Ok(53.63));
        assert_eq!(source.fetch(LocationField::Longitude).await, Ok(9.99));
        // One request per fetch
        assert_eq!(source.http.call_count(), 2);
    }

    #[tokio::test]
    async fn test_http_source_propagates_status_error() {
        let error = FetchError::Status {
            status: 500,
            url: DEFAULT_SOURCE_URL.to_string(),
        };
        let source =
            HttpLocationSource::new(MockHttpClient::with_error(error.clone()), DEFAULT_SOURCE_URL);

        assert_eq!(source.fetch(LocationField::Latitude).await, Err(error));
    }

    #[test]
    fn test_http_source_url() {
        let source = HttpLocationSource::new(MockHttpClient::with_body("{}"), "http://sensor/pos");
        assert_eq!(source.url(), "http://sensor/pos");
    }
}
