//! Route module data model.
//!
//! A route module is the unit the registrar mounts: an optional path prefix
//! plus a list of declared routes, each serving a canned response. The shape
//! is what the classifier's router recognizer deserializes into.
//!
//! ```toml
//! prefix = "/api"
//!
//! [[routes]]
//! method = "GET"
//! path = "/health"
//! status = 200
//! body = "ok"
//! ```

use std::collections::BTreeMap;
use std::fmt;

use axum::http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodFilter;
use serde::Deserialize;

use crate::error::MountError;

/// HTTP methods a route module may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteMethod {
    #[default]
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "delete")]
    Delete,
    #[serde(alias = "patch")]
    Patch,
    #[serde(alias = "head")]
    Head,
    #[serde(alias = "options")]
    Options,
}

impl RouteMethod {
    /// Canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
            RouteMethod::Put => "PUT",
            RouteMethod::Delete => "DELETE",
            RouteMethod::Patch => "PATCH",
            RouteMethod::Head => "HEAD",
            RouteMethod::Options => "OPTIONS",
        }
    }

    pub(crate) fn filter(&self) -> MethodFilter {
        match self {
            RouteMethod::Get => MethodFilter::GET,
            RouteMethod::Post => MethodFilter::POST,
            RouteMethod::Put => MethodFilter::PUT,
            RouteMethod::Delete => MethodFilter::DELETE,
            RouteMethod::Patch => MethodFilter::PATCH,
            RouteMethod::Head => MethodFilter::HEAD,
            RouteMethod::Options => MethodFilter::OPTIONS,
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_status() -> u16 {
    200
}

/// One declared route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSpec {
    /// Path relative to the module prefix. Must begin with `/`.
    pub path: String,

    /// HTTP method (default GET).
    #[serde(default)]
    pub method: RouteMethod,

    /// Response status (default 200).
    #[serde(default = "default_status")]
    pub status: u16,

    /// Response body. A string is sent verbatim; any other value is
    /// serialized as JSON.
    #[serde(default)]
    pub body: Option<serde_json::Value>,

    /// Overrides the inferred `Content-Type`.
    #[serde(default)]
    pub content_type: Option<String>,

    /// Extra response headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl RouteSpec {
    /// Validate the declared response and freeze it for serving.
    pub(crate) fn canned(&self) -> Result<CannedResponse, MountError> {
        let status = StatusCode::from_u16(self.status)
            .map_err(|_| MountError::InvalidStatus { status: self.status })?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| MountError::InvalidHeader { name: name.clone() })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| MountError::InvalidHeader { name: name.clone() })?;
            headers.insert(header_name, header_value);
        }

        let (body, inferred) = match &self.body {
            None => (String::new(), None),
            Some(serde_json::Value::String(text)) => {
                (text.clone(), Some("text/plain; charset=utf-8"))
            }
            Some(value) => {
                let body = serde_json::to_string(value).map_err(|err| MountError::Rejected {
                    detail: err.to_string(),
                })?;
                (body, Some("application/json"))
            }
        };

        if let Some(content_type) = &self.content_type {
            let value = HeaderValue::from_str(content_type).map_err(|_| MountError::InvalidHeader {
                name: "content-type".to_string(),
            })?;
            headers.insert(CONTENT_TYPE, value);
        } else if let Some(inferred) = inferred {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(inferred));
            }
        }

        Ok(CannedResponse {
            status,
            headers,
            body,
        })
    }
}

/// A loaded route module: the unit the registrar mounts.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterModule {
    /// Mount prefix applied to every route path.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Declared routes, mounted in declaration order.
    pub routes: Vec<RouteSpec>,
}

/// A validated response, cloned out to every request.
#[derive(Debug, Clone)]
pub(crate) struct CannedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl IntoResponse for CannedResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(toml: &str) -> RouteSpec {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_method_defaults_and_aliases() {
        let route = spec(r#"path = "/x""#);
        assert_eq!(route.method, RouteMethod::Get);
        assert_eq!(route.status, 200);

        let route = spec(r#"path = "/x"
method = "post""#);
        assert_eq!(route.method, RouteMethod::Post);

        let route = spec(r#"path = "/x"
method = "DELETE""#);
        assert_eq!(route.method, RouteMethod::Delete);
    }

    #[test]
    fn test_string_body_is_plain_text() {
        let route = spec(r#"path = "/x"
body = "hello""#);
        let canned = route.canned().unwrap();
        assert_eq!(canned.body, "hello");
        assert_eq!(
            canned.headers.get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_structured_body_is_json() {
        let route = spec(r#"path = "/x"
[body]
ok = true"#);
        let canned = route.canned().unwrap();
        assert_eq!(canned.body, r#"{"ok":true}"#);
        assert_eq!(canned.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let route = spec(r#"path = "/x"
body = "<p>hi</p>"
content_type = "text/html""#);
        let canned = route.canned().unwrap();
        assert_eq!(canned.headers.get(CONTENT_TYPE).unwrap(), "text/html");
    }

    #[test]
    fn test_extra_headers_pass_through() {
        let route = spec(r#"path = "/x"
[headers]
x-robot = "yes""#);
        let canned = route.canned().unwrap();
        assert_eq!(canned.headers.get("x-robot").unwrap(), "yes");
    }

    #[test]
    fn test_invalid_status_rejected() {
        let route = spec(r#"path = "/x"
status = 99"#);
        assert!(matches!(
            route.canned(),
            Err(MountError::InvalidStatus { status: 99 })
        ));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let route = spec(r#"path = "/x"
[headers]
"bad name" = "v""#);
        assert!(matches!(
            route.canned(),
            Err(MountError::InvalidHeader { .. })
        ));
    }
}
