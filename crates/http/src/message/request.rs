use once_cell::sync::Lazy;
use regex::Regex;

use crate::ensure;
use crate::stream::StreamHandle;
use crate::uri::Uri;

use super::error::RequestError;
use super::header::HeaderMap;
use super::message::{HttpMessage, Message};

/// Origin-form request target (RFC 7230 §5.3.1): `/path[?query]`. The path
/// is absolute and cannot begin with `//`.
static ORIGIN_FORM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(?:[^/\s#][^\s#]*)?$").unwrap());

/// Authority-form request target (RFC 7230 §5.3.3): `host:port`.
static AUTHORITY_FORM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9.-]+:\d+$").unwrap());

/// An immutable HTTP request value: method, URI and request-target logic on
/// top of the shared message core.
///
/// # Example
///
/// ```
/// use value_http::message::{HttpMessage, Request};
///
/// let request = Request::new("get", "http://example.com:8080/a/b?x=1".parse().unwrap());
/// assert_eq!(request.method(), "GET");
/// assert_eq!(request.request_target(), "/a/b?x=1");
/// assert_eq!(request.header_line("Host"), "example.com:8080");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    message: Message,
    method: String,
    uri: Uri,
    request_target: Option<String>,
}

impl Request {
    /// Builds a request from a method (normalized to uppercase) and a URI.
    ///
    /// A `Host` header is synthesized from `uri.host[:port]` and placed
    /// first, since no header can exist yet on a fresh value. A bare URI
    /// string coerces at the call site through `Uri`'s `FromStr`.
    pub fn new(method: &str, uri: Uri) -> Self {
        Self::with_parts(method, uri, HeaderMap::new(), None)
    }

    /// Builds a request carrying initial headers and an optional body.
    ///
    /// A `Host` header is synthesized from the URI only when `headers` does
    /// not already carry one (case-insensitively); an explicit `Host` is
    /// kept verbatim, in its given position.
    pub fn with_parts(
        method: &str,
        uri: Uri,
        headers: HeaderMap,
        body: Option<StreamHandle>,
    ) -> Self {
        let synthesize = !headers.contains("Host");

        let mut request = Self {
            message: Message::new(),
            method: method.to_ascii_uppercase(),
            uri,
            request_target: None,
        };
        *request.message.headers_mut() = headers;
        request.message.set_body(body);

        if synthesize {
            request.synthesize_host();
        }
        request
    }

    fn synthesize_host(&mut self) {
        let mut host = self.uri.host().to_string();
        if let Some(port) = self.uri.port() {
            host.push(':');
            host.push_str(&port.to_string());
        }

        self.message.headers_mut().insert_first("Host", host);
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns a new value with the method replaced, normalized to
    /// uppercase.
    pub fn with_method(&self, method: &str) -> Self {
        let mut next = self.clone();
        next.method = method.to_ascii_uppercase();
        next
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns a new value with the URI replaced, or a plain copy when `uri`
    /// is identical to the current one.
    ///
    /// Unless `preserve_host` is set, the `Host` header is recomputed from
    /// the new URI: any prior `Host` is removed and the fresh one is placed
    /// first.
    pub fn with_uri(&self, uri: Uri, preserve_host: bool) -> Self {
        if uri == self.uri {
            return self.clone();
        }

        let mut next = self.clone();
        next.uri = uri;
        if !preserve_host {
            next.synthesize_host();
        }
        next
    }

    /// The explicit override if one was set, otherwise the target derived
    /// from the URI: its path (`/` when empty) plus `?query` when the query
    /// is non-empty.
    pub fn request_target(&self) -> String {
        if let Some(target) = &self.request_target {
            return target.clone();
        }

        let mut target = self.uri.path().to_string();
        if target.is_empty() {
            target.push('/');
        }
        if !self.uri.query().is_empty() {
            target.push('?');
            target.push_str(self.uri.query());
        }

        target
    }

    /// Returns a new value with the request-target override set.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidRequestTarget`] unless `target` is one
    /// of the four RFC 7230 forms: origin (`/path[?query]`), absolute (a
    /// full URI), authority (`host:port`) or asterisk (`*`).
    pub fn with_request_target(&self, target: &str) -> Result<Self, RequestError> {
        ensure!(is_valid_request_target(target), RequestError::invalid_target(target));

        let mut next = self.clone();
        next.request_target = Some(target.to_string());
        Ok(next)
    }
}

fn is_valid_request_target(target: &str) -> bool {
    if target == "*" || ORIGIN_FORM_PATTERN.is_match(target) || AUTHORITY_FORM_PATTERN.is_match(target) {
        return true;
    }

    // absolute-form: a full URI with scheme and host
    Uri::parse(target)
        .is_ok_and(|uri| !uri.scheme().is_empty() && !uri.host().is_empty())
}

impl HttpMessage for Request {
    fn message(&self) -> &Message {
        &self.message
    }

    fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }
}
