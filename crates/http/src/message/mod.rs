//! HTTP message value types.
//!
//! Everything here follows one contract: messages are value objects, and
//! every `with_*` mutator returns a new, independent value without altering
//! the receiver.
//!
//! The pieces, leaves first:
//!
//! - [`HeaderMap`]: ordered header collection with case-insensitive lookup
//!   and case-preserving storage
//! - [`Message`]: the shared core (protocol version, headers, optional body
//!   stream) plus the [`HttpMessage`] trait providing the value contract to
//!   every concrete type
//! - [`Request`]: method, URI and request-target logic
//! - [`Response`]: status code and reason phrase
//! - [`ServerRequest`]: the server-side request with its injected
//!   environment snapshots and [`UploadedFile`] tree
//!
//! Concrete types embed a [`Message`] and forward to it; there is no
//! inheritance anywhere, just composition behind one trait.

mod error;
pub use error::RequestError;

mod header;
pub use header::HeaderMap;
pub use header::HeaderValues;

#[allow(clippy::module_inception, reason = "module holds the type of the same name")]
mod message;
pub use message::DEFAULT_PROTOCOL_VERSION;
pub use message::HttpMessage;
pub use message::Message;

mod request;
pub use request::Request;

mod response;
pub use response::Response;

mod server_request;
pub use server_request::ServerRequest;

mod uploaded_file;
pub use uploaded_file::FileDescriptor;
pub use uploaded_file::FileNode;
pub use uploaded_file::UploadedFile;
pub use uploaded_file::normalize_uploaded_files;
