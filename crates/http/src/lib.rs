//! Immutable value types for HTTP messages.
//!
//! This crate models HTTP messages as value objects: a URI component, a
//! byte-stream abstraction over an OS resource, and message types (generic
//! message, request, response, server-side request) built on top of them.
//! Every mutator returns a new, independent value; the receiver is never
//! altered. The crate only describes and carries message data: it does not
//! send or receive bytes over a wire, handle connections or route requests.
//!
//! # Example
//!
//! ```
//! use value_http::message::{HttpMessage, Request, Response};
//! use value_http::uri::Uri;
//!
//! let uri: Uri = "https://example.com:8080/orders?page=2".parse()?;
//!
//! let request = Request::new("get", uri).with_header("Accept", "application/json");
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.request_target(), "/orders?page=2");
//! assert_eq!(request.header_line("Host"), "example.com:8080");
//!
//! // mutators never touch the receiver
//! let next = request.with_method("POST");
//! assert_eq!(request.method(), "GET");
//! assert_eq!(next.method(), "POST");
//!
//! let response = Response::new(404);
//! assert_eq!(response.reason_phrase(), "Not Found");
//! # Ok::<(), value_http::uri::UriError>(())
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules, leaves first:
//!
//! - [`uri`]: RFC 3986 URI parsing and recomposition
//! - [`stream`]: the resource-backed [`stream::StreamHandle`] with its
//!   open → detached/closed lifecycle
//! - [`message`]: the header collection, the shared message core and the
//!   concrete request/response types
//! - [`codec`]: wire-facing serialization of message heads for a transport
//!   to write
//! - [`error`]: the top-level [`error::HttpError`]
//!
//! # Ownership model
//!
//! Each message value exclusively owns its header and attribute collections;
//! they are copied, never aliased, on every mutator. A
//! [`stream::StreamHandle`] is a shared reference to exactly one OS
//! resource: `with_body` hands that reference to the new value while the old
//! value keeps its own, and the design assumes at most one active owner uses
//! the resource at a time. The whole model is single-threaded and
//! synchronous; the only blocking calls are the stream's reads, writes and
//! seeks.

pub mod codec;
pub mod error;
pub mod message;
pub mod stream;
pub mod uri;

mod utils;
pub(crate) use utils::ensure;
