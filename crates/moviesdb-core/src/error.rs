//! Error types for the MoviesDB core
//!
//! This module defines every error surfaced by the decoder, the request
//! engine and the startup configuration, plus the TMDB status catalog that
//! non-2xx response bodies decode into.

use serde::Deserialize;
use thiserror::Error;

use crate::types::MediaType;

/// Error raised while turning a JSON payload into a domain record
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Neither the payload nor the decode context named a concrete media type
    #[error("Media type not found in payload or decode context")]
    MediaTypeNotFound,

    /// A field required by the resolved media type is absent
    #[error("Missing field `{field}` for {media_type} record")]
    MissingField {
        field: &'static str,
        media_type: MediaType,
    },

    /// A field is present but its value is not acceptable
    #[error("Malformed field `{field}`: {reason}")]
    MalformedField { field: &'static str, reason: String },

    /// The payload is not valid JSON or has the wrong shape
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error raised by the transport layer before an HTTP status is available
#[derive(Error, Debug)]
pub enum TransportError {
    /// The underlying HTTP client failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Any other transport failure (used by custom transports)
    #[error("Transport failed: {0}")]
    Other(String),
}

/// Error type for request engine and catalog operations
#[derive(Error, Debug)]
pub enum RequestError {
    /// The request could not be turned into a valid URL
    #[error("Invalid URL: {0}")]
    BadUrl(String),

    /// The server answered with a status outside 200-299
    #[error("Bad response (HTTP {status}){}", .error.as_ref().map(|e| format!(": {e}")).unwrap_or_default())]
    BadResponse {
        status: u16,
        error: Option<NetworkError>,
    },

    /// A 2xx body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    /// The request never produced a response
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Error raised while building a client from host configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The bearer token is missing or empty
    #[error("Missing API token: set {0}")]
    MissingToken(&'static str),

    /// The HTTP transport could not be created
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result type alias for request engine and catalog operations
pub type Result<T> = std::result::Result<T, RequestError>;

/// Structured error body returned by TMDB for non-2xx responses
#[derive(Error, Debug, Clone, PartialEq, Eq, Deserialize)]
#[error("{message} (code {code})")]
pub struct NetworkError {
    #[serde(rename = "status_code")]
    pub code: i32,
    #[serde(rename = "status_message")]
    pub message: String,
}

/// Documented TMDB status codes (developer.themoviedb.org/docs/errors)
const KNOWN_ERRORS: &[(i32, &str)] = &[
    (2, "Invalid service: this service does not exist."),
    (3, "Authentication failed: You do not have permissions to access the service."),
    (4, "Invalid format: This service doesn't exist in that format."),
    (5, "Invalid parameters: Your request parameters are incorrect."),
    (6, "Invalid id: The pre-requisite id is invalid or not found."),
    (7, "Invalid API key: You must be granted a valid key."),
    (8, "Duplicate entry: The data you tried to submit already exists."),
    (9, "Service offline: This service is temporarily offline, try again later."),
    (10, "Suspended API key: Access to your account has been suspended, contact TMDB."),
    (11, "Internal error: Something went wrong, contact TMDB."),
    (12, "The item/record was updated successfully."),
    (13, "The item/record was deleted successfully."),
    (14, "Authentication failed."),
    (15, "Failed."),
    (16, "Device denied."),
    (17, "Session denied."),
    (18, "Validation failed."),
    (19, "Invalid accept header."),
    (20, "Invalid date range: Should be a range no longer than 14 days."),
    (21, "Entry not found: The item you are trying to edit cannot be found."),
    (22, "Invalid page: Pages start at 1 and max at 500. They are expected to be an integer."),
    (23, "Invalid date: Format needs to be YYYY-MM-DD."),
    (24, "Your request to the backend server timed out. Try again."),
    (25, "Your request count (#) is over the allowed limit of (40)."),
    (26, "You must provide a username and password."),
    (27, "Too many append to response objects: The maximum number of remote calls is 20."),
    (28, "Invalid timezone: Please consult the documentation for a valid timezone."),
    (29, "You must confirm this action: Please provide a confirm=true parameter."),
    (30, "Invalid username and/or password: You did not provide a valid login."),
    (31, "Account disabled: Your account is no longer active. Contact TMDB if this is an error."),
    (32, "Email not verified: Your email address has not been verified."),
    (33, "Invalid request token: The request token is either expired or invalid."),
    (34, "The resource you requested could not be found."),
    (35, "Invalid token."),
    (36, "This token hasn't been granted write permission by the user."),
    (37, "The requested session could not be found."),
    (38, "You don't have permission to edit this resource."),
    (39, "This resource is private."),
    (40, "Nothing to update."),
    (41, "This request token hasn't been approved by the user."),
    (42, "This request method is not supported for this resource."),
    (43, "Couldn't connect to the backend server."),
    (44, "The ID is invalid."),
    (45, "This user has been suspended."),
    (46, "The API is undergoing maintenance. Try again later."),
    (47, "The input is not valid."),
];

impl NetworkError {
    pub const INVALID_API_KEY: i32 = 7;
    pub const RESOURCE_NOT_FOUND: i32 = 34;
    pub const INVALID_TOKEN: i32 = 35;

    /// Create an error from a raw code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Look up a documented TMDB status code
    ///
    /// # Examples
    /// ```
    /// use moviesdb_core::NetworkError;
    ///
    /// let err = NetworkError::known(34).unwrap();
    /// assert_eq!(err.message, "The resource you requested could not be found.");
    /// assert!(NetworkError::known(999).is_none());
    /// ```
    pub fn known(code: i32) -> Option<Self> {
        KNOWN_ERRORS
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(code, message)| Self::new(*code, *message))
    }

    /// Whether this code is part of the documented catalog
    pub fn is_known(&self) -> bool {
        KNOWN_ERRORS.iter().any(|(known, _)| *known == self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display_media_type_not_found() {
        let error = DecodeError::MediaTypeNotFound;
        assert_eq!(
            error.to_string(),
            "Media type not found in payload or decode context"
        );
    }

    #[test]
    fn test_decode_error_display_missing_field() {
        let error = DecodeError::MissingField {
            field: "title",
            media_type: MediaType::Movie,
        };
        assert_eq!(error.to_string(), "Missing field `title` for movie record");
    }

    #[test]
    fn test_request_error_display_bad_response_with_body() {
        let error = RequestError::BadResponse {
            status: 401,
            error: NetworkError::known(NetworkError::INVALID_API_KEY),
        };
        assert_eq!(
            error.to_string(),
            "Bad response (HTTP 401): Invalid API key: You must be granted a valid key. (code 7)"
        );
    }

    #[test]
    fn test_request_error_display_bad_response_without_body() {
        let error = RequestError::BadResponse {
            status: 502,
            error: None,
        };
        assert_eq!(error.to_string(), "Bad response (HTTP 502)");
    }

    #[test]
    fn test_request_error_display_bad_url() {
        let error = RequestError::BadUrl("page must be >= 1".to_string());
        assert_eq!(error.to_string(), "Invalid URL: page must be >= 1");
    }

    #[test]
    fn test_config_error_display_missing_token() {
        let error = ConfigError::MissingToken("TMDB_TOKEN");
        assert_eq!(error.to_string(), "Missing API token: set TMDB_TOKEN");
    }

    #[test]
    fn test_network_error_catalog_covers_documented_range() {
        for code in 2..=47 {
            assert!(NetworkError::known(code).is_some(), "missing code {code}");
        }
        assert!(NetworkError::known(1).is_none());
        assert!(NetworkError::known(48).is_none());
    }

    #[test]
    fn test_network_error_deserialize_known_code() {
        let json = r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#;
        let error: NetworkError = serde_json::from_str(json).unwrap();
        assert_eq!(error, NetworkError::known(34).unwrap());
        assert!(error.is_known());
    }

    #[test]
    fn test_network_error_deserialize_unknown_code() {
        let json = r#"{"status_code":1234,"status_message":"Something new"}"#;
        let error: NetworkError = serde_json::from_str(json).unwrap();
        assert_eq!(error.code, 1234);
        assert_eq!(error.message, "Something new");
        assert!(!error.is_known());
    }
}
