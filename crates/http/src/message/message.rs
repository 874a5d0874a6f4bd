use crate::stream::StreamHandle;

use super::header::{HeaderMap, HeaderValues};

/// The default protocol version a fresh message carries.
pub const DEFAULT_PROTOCOL_VERSION: &str = "1.1";

/// The shared message core: protocol version, headers and an optional body
/// stream.
///
/// Every concrete message type ([`Request`](super::Request),
/// [`Response`](super::Response), [`ServerRequest`](super::ServerRequest))
/// embeds one of these and forwards to it through the [`HttpMessage`] trait;
/// `Message` itself is the plain, generic message value.
#[derive(Debug, Clone)]
pub struct Message {
    version: String,
    headers: HeaderMap,
    body: Option<StreamHandle>,
}

impl Default for Message {
    fn default() -> Self {
        Self { version: DEFAULT_PROTOCOL_VERSION.to_string(), headers: HeaderMap::new(), body: None }
    }
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub(crate) fn set_body(&mut self, body: Option<StreamHandle>) {
        self.body = body;
    }
}

/// The immutable value contract shared by every message type.
///
/// Implementors only supply access to their embedded [`Message`] core; every
/// operation is provided. Each `with_*` mutator clones the receiver, mutates
/// the clone and returns it; the receiver is never altered.
pub trait HttpMessage: Clone {
    /// The embedded message core.
    fn message(&self) -> &Message;

    /// Mutable access to the embedded message core, used by the provided
    /// mutators on their freshly cloned value.
    fn message_mut(&mut self) -> &mut Message;

    fn protocol_version(&self) -> &str {
        &self.message().version
    }

    /// Returns a plain copy when `version` equals the current one, otherwise
    /// a new value with the version replaced.
    fn with_protocol_version(&self, version: &str) -> Self {
        if version == self.protocol_version() {
            return self.clone();
        }

        let mut next = self.clone();
        next.message_mut().version = version.to_string();
        next
    }

    fn headers(&self) -> &HeaderMap {
        &self.message().headers
    }

    /// Case-insensitive containment check against the stored names.
    fn has_header(&self, name: &str) -> bool {
        self.message().headers.contains(name)
    }

    /// The stored value sequence for the case-insensitive match; empty when
    /// absent.
    fn header(&self, name: &str) -> &[String] {
        self.message().headers.get(name).unwrap_or(&[])
    }

    /// The values joined with `","`; empty string when absent.
    fn header_line(&self, name: &str) -> String {
        self.header(name).join(",")
    }

    /// Returns a new value with any existing values under the
    /// case-insensitive name replaced. A bare string coerces to a one-element
    /// sequence; the name's case is stored as given.
    fn with_header(&self, name: &str, values: impl Into<HeaderValues>) -> Self {
        let mut next = self.clone();
        next.message_mut().headers.insert(name, values);
        next
    }

    /// Returns a new value with the values appended to the existing
    /// sequence, or inserted when the header does not yet exist.
    fn with_added_header(&self, name: &str, values: impl Into<HeaderValues>) -> Self {
        let mut next = self.clone();
        next.message_mut().headers.append(name, values);
        next
    }

    /// Returns a new value without the case-insensitively matching entry, or
    /// an unchanged copy when absent.
    fn without_header(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.message_mut().headers.remove(name);
        next
    }

    fn body(&self) -> Option<&StreamHandle> {
        self.message().body.as_ref()
    }

    /// Returns a new value carrying `body`. The previously attached stream is
    /// neither closed nor otherwise affected, and stays with the receiver.
    fn with_body(&self, body: StreamHandle) -> Self {
        let mut next = self.clone();
        next.message_mut().body = Some(body);
        next
    }
}

impl HttpMessage for Message {
    fn message(&self) -> &Message {
        self
    }

    fn message_mut(&mut self) -> &mut Message {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_protocol_version_1_1() {
        assert_eq!(Message::new().protocol_version(), "1.1");
    }

    #[test]
    fn with_protocol_version_copies() {
        let message = Message::new();
        let next = message.with_protocol_version("1.0");

        assert_eq!(message.protocol_version(), "1.1");
        assert_eq!(next.protocol_version(), "1.0");

        // same-version copy stays logically identical
        assert_eq!(message.with_protocol_version("1.1").protocol_version(), "1.1");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let message = Message::new().with_header("X-Foo", "1");

        assert!(message.has_header("x-foo"));
        assert_eq!(message.header_line("X-FOO"), "1");
        assert_eq!(message.header("x-Foo"), &["1".to_string()][..]);
    }

    #[test]
    fn absent_headers_yield_neutral_defaults() {
        let message = Message::new();

        assert!(!message.has_header("X-Foo"));
        assert_eq!(message.header("X-Foo"), &[] as &[String]);
        assert_eq!(message.header_line("X-Foo"), "");
    }

    #[test]
    fn with_added_header_appends() {
        let message = Message::new().with_header("A", "1").with_added_header("A", "2");

        assert_eq!(message.header("A"), &["1".to_string(), "2".to_string()][..]);
        assert_eq!(message.header_line("A"), "1,2");
    }

    #[test]
    fn with_added_header_inserts_when_absent() {
        let message = Message::new().with_added_header("A", "1");

        assert_eq!(message.header("A"), &["1".to_string()][..]);
    }

    #[test]
    fn without_header_leaves_the_receiver_untouched() {
        let message = Message::new().with_header("A", "1");
        let next = message.without_header("a");

        assert!(message.has_header("A"));
        assert!(!next.has_header("A"));

        // removing an absent header is an unchanged copy
        assert!(!message.without_header("B").has_header("B"));
    }
}
