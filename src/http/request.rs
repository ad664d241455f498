//! Request parameter extraction.
//!
//! # Responsibilities
//! - Parse the URL query string into a key/value mapping
//! - Percent-decode keys and values (`+` is a space)
//! - Expose the recognized `msg` and `fail` parameters
//!
//! # Design Decisions
//! - Lenient: pairs with an empty key are dropped, unknown keys are kept but unused
//! - A repeated key keeps its last value
//! - Extraction never rejects a request

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Uri;
use url::form_urlencoded;

/// Decoded query parameters of an inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    values: HashMap<String, String>,
}

impl RequestParams {
    /// Parse a raw query string. `None` yields an empty parameter set.
    pub fn parse(query: Option<&str>) -> Self {
        let mut values = HashMap::new();
        if let Some(query) = query {
            for (key, value) in form_urlencoded::parse(query.as_bytes()) {
                if key.is_empty() {
                    continue;
                }
                values.insert(key.into_owned(), value.into_owned());
            }
        }
        Self { values }
    }

    pub fn from_uri(uri: &Uri) -> Self {
        Self::parse(uri.query())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The `msg` parameter, empty when absent.
    pub fn msg(&self) -> &str {
        self.get("msg").unwrap_or_default()
    }

    /// True only for the literal value `true`.
    pub fn fail(&self) -> bool {
        self.get("fail") == Some("true")
    }
}

impl<S> FromRequestParts<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}
