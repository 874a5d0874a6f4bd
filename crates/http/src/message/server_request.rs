use std::collections::HashMap;

use serde_json::Value;

use crate::error::HttpError;
use crate::uri::Uri;

use super::error::RequestError;
use super::message::{HttpMessage, Message};
use super::request::Request;
use super::uploaded_file::{FileDescriptor, FileNode, normalize_uploaded_files};

/// A server-side request value: the [`Request`] surface plus the
/// environment snapshots an inbound request carries.
///
/// The constructor is fed pre-extracted snapshots (server params, cookies,
/// uploaded-file descriptors) by an external collaborator; it never reads
/// ambient process state itself. After construction every field only changes
/// through `with_*` copies.
#[derive(Debug, Clone)]
pub struct ServerRequest {
    request: Request,
    server_params: HashMap<String, String>,
    cookie_params: HashMap<String, String>,
    uploaded_files: HashMap<String, FileNode>,
    parsed_body: Option<Value>,
    attributes: HashMap<String, Value>,
}

impl ServerRequest {
    /// Builds a server request from injected environment snapshots.
    ///
    /// The base request uses the snapshot's `REQUEST_METHOD` (`GET` when
    /// absent) and a URI assembled from `HTTP_HOST` and `REQUEST_URI`, so the
    /// host lands in the authority and the synthesized `Host` header is
    /// correct. The uploaded-file descriptor tree is normalized recursively.
    ///
    /// # Errors
    ///
    /// Returns an error when the assembled URI cannot be parsed.
    pub fn from_env(
        server_params: HashMap<String, String>,
        cookie_params: HashMap<String, String>,
        uploaded_files: HashMap<String, FileDescriptor>,
    ) -> Result<Self, HttpError> {
        let method = server_params.get("REQUEST_METHOD").map_or("GET", String::as_str);
        let host = server_params.get("HTTP_HOST").map_or("", String::as_str);
        let target = server_params.get("REQUEST_URI").map_or("/", String::as_str);

        let raw_uri =
            if host.is_empty() { target.to_string() } else { format!("//{host}{target}") };
        let uri: Uri = raw_uri.parse().map_err(HttpError::from)?;

        Ok(Self {
            request: Request::new(method, uri),
            server_params,
            cookie_params,
            uploaded_files: normalize_uploaded_files(uploaded_files),
            parsed_body: None,
            attributes: HashMap::new(),
        })
    }

    fn map_request(&self, request: Request) -> Self {
        let mut next = self.clone();
        next.request = request;
        next
    }

    pub fn server_params(&self) -> &HashMap<String, String> {
        &self.server_params
    }

    pub fn cookie_params(&self) -> &HashMap<String, String> {
        &self.cookie_params
    }

    /// Returns a new value with the cookie snapshot replaced.
    pub fn with_cookie_params(&self, cookies: HashMap<String, String>) -> Self {
        let mut next = self.clone();
        next.cookie_params = cookies;
        next
    }

    pub fn uploaded_files(&self) -> &HashMap<String, FileNode> {
        &self.uploaded_files
    }

    /// Returns a new value with the uploaded-file tree replaced.
    pub fn with_uploaded_files(&self, uploaded_files: HashMap<String, FileNode>) -> Self {
        let mut next = self.clone();
        next.uploaded_files = uploaded_files;
        next
    }

    /// Parses the URI's raw query string into ordered pairs by splitting on
    /// `&` then `=` (a pair without `=` has an empty value).
    ///
    /// A repeated key overwrites the earlier value in place, keeping the
    /// first-seen position. Multi-value aggregation is deliberately not done
    /// here.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let query = self.request.uri().query();
        if query.is_empty() {
            return Vec::new();
        }

        let mut params: Vec<(String, String)> = Vec::new();
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match params.iter_mut().find(|(stored, _)| stored == key) {
                Some((_, stored)) => *stored = value.to_string(),
                None => params.push((key.to_string(), value.to_string())),
            }
        }

        params
    }

    /// Returns a new value whose URI carries a query string rebuilt from the
    /// given pairs.
    pub fn with_query_params(&self, params: &[(String, String)]) -> Self {
        let query =
            params.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&");

        self.map_request(self.request.with_uri(self.request.uri().with_query(&query), true))
    }

    /// The structured body value carried through unchanged; this layer never
    /// couples it to a content type.
    pub fn parsed_body(&self) -> Option<&Value> {
        self.parsed_body.as_ref()
    }

    /// Returns a new value with the parsed body replaced (`None` clears it).
    pub fn with_parsed_body(&self, parsed_body: Option<Value>) -> Self {
        let mut next = self.clone();
        next.parsed_body = parsed_body;
        next
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// The attribute stored under `name`; `None` when unset, letting the
    /// caller supply a default.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns a new value with the attribute set.
    pub fn with_attribute(&self, name: impl Into<String>, value: Value) -> Self {
        let mut next = self.clone();
        next.attributes.insert(name.into(), value);
        next
    }

    /// Returns a new value without the attribute, or an unchanged copy when
    /// it was never set.
    pub fn without_attribute(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.attributes.remove(name);
        next
    }

    // the Request surface, forwarded

    pub fn method(&self) -> &str {
        self.request.method()
    }

    pub fn with_method(&self, method: &str) -> Self {
        self.map_request(self.request.with_method(method))
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn with_uri(&self, uri: Uri, preserve_host: bool) -> Self {
        self.map_request(self.request.with_uri(uri, preserve_host))
    }

    pub fn request_target(&self) -> String {
        self.request.request_target()
    }

    /// See [`Request::with_request_target`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidRequestTarget`] for a target matching
    /// none of the four RFC 7230 forms.
    pub fn with_request_target(&self, target: &str) -> Result<Self, RequestError> {
        Ok(self.map_request(self.request.with_request_target(target)?))
    }
}

impl HttpMessage for ServerRequest {
    fn message(&self) -> &Message {
        self.request.message()
    }

    fn message_mut(&mut self) -> &mut Message {
        self.request.message_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    fn request() -> ServerRequest {
        ServerRequest::from_env(
            env(&[
                ("REQUEST_METHOD", "post"),
                ("HTTP_HOST", "example.com:8080"),
                ("REQUEST_URI", "/a/b?x=1&y=2"),
            ]),
            env(&[("session", "abc123")]),
            HashMap::new(),
        )
        .unwrap()
    }

    #[test]
    fn builds_the_base_request_from_the_snapshot() {
        let request = request();

        assert_eq!(request.method(), "POST");
        assert_eq!(request.uri().host(), "example.com");
        assert_eq!(request.uri().port(), Some(8080));
        assert_eq!(request.request_target(), "/a/b?x=1&y=2");
        assert_eq!(request.header_line("Host"), "example.com:8080");
        assert_eq!(request.cookie_params()["session"], "abc123");
    }

    #[test]
    fn missing_snapshot_keys_fall_back() {
        let request =
            ServerRequest::from_env(HashMap::new(), HashMap::new(), HashMap::new()).unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.request_target(), "/");
        assert_eq!(request.uri().host(), "");
    }

    #[test]
    fn query_params_split_on_ampersand_then_equals() {
        let request = request();

        assert_eq!(
            request.query_params(),
            [("x".to_string(), "1".to_string()), ("y".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn repeated_query_keys_overwrite() {
        let request = request().with_query_params(&[]);
        let rebuilt = request.with_uri(request.uri().with_query("a=1&b=2&a=3&c"), true);

        assert_eq!(
            rebuilt.query_params(),
            [
                ("a".to_string(), "3".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn with_query_params_rebuilds_the_query_string() {
        let request = request()
            .with_query_params(&[("k".to_string(), "v".to_string()), ("n".to_string(), "2".to_string())]);

        assert_eq!(request.uri().query(), "k=v&n=2");
        assert_eq!(request.request_target(), "/a/b?k=v&n=2");
    }

    #[test]
    fn attributes_are_copy_on_write() {
        let request = request();
        let tagged = request.with_attribute("route", Value::from("orders.show"));

        assert_eq!(tagged.attribute("route"), Some(&Value::from("orders.show")));
        assert_eq!(request.attribute("route"), None);

        let untagged = tagged.without_attribute("route");
        assert_eq!(untagged.attribute("route"), None);
        assert_eq!(tagged.attribute("route"), Some(&Value::from("orders.show")));
    }

    #[test]
    fn parsed_body_is_carried_through_unchanged() {
        let request = request();
        assert_eq!(request.parsed_body(), None);

        let body = serde_json::json!({"name": "value"});
        let with_body = request.with_parsed_body(Some(body.clone()));
        assert_eq!(with_body.parsed_body(), Some(&body));

        assert_eq!(with_body.with_parsed_body(None).parsed_body(), None);
    }

    #[test]
    fn uploaded_files_normalize_on_construction() {
        let files = HashMap::from([(
            "avatar".to_string(),
            FileDescriptor::Entry {
                name: "a.png".to_string(),
                content_type: "image/png".to_string(),
                tmp_name: "/tmp/upload-1".to_string(),
                error: 0,
                size: 2048,
            },
        )]);
        let request =
            ServerRequest::from_env(HashMap::new(), HashMap::new(), files).unwrap();

        assert!(
            matches!(&request.uploaded_files()["avatar"], FileNode::File(file) if file.name() == "a.png")
        );
    }

    #[test]
    fn message_mutators_return_new_values() {
        let request = request();
        let tagged = request.with_header("X-Request-Id", "42");

        assert!(!request.has_header("X-Request-Id"));
        assert_eq!(tagged.header_line("x-request-id"), "42");
        assert_eq!(tagged.method(), "POST");
    }
}
