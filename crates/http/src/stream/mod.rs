//! Resource-backed byte stream handling.
//!
//! [`StreamHandle`] wraps exactly one OS file resource and tracks its
//! lifecycle precisely: `Open` (readable/writable/seekable derived once from
//! the open mode) can transition to `Detached` (the raw resource is handed
//! back to the caller) or `Closed` (the resource is released, then detached).
//! Once detached or closed, every read/write/seek/tell/contents call fails
//! with [`StreamError::Detached`].
//!
//! The handle is a cheap reference: cloning it (for example when a message
//! value is copied) shares the same underlying resource. The surrounding
//! application is expected to keep at most one active owner per resource;
//! this layer is strictly single-threaded and takes no locks.

mod error;
pub use error::StreamError;

mod mode;
pub use mode::OpenMode;

mod handle;
pub use handle::StreamHandle;
