//! Top-level error type aggregating the per-module error enums.
//!
//! Each module owns an error enum describing the failures of its own
//! operations ([`UriError`], [`StreamError`], [`RequestError`]). This module
//! provides [`HttpError`] as the single type callers can bubble everything
//! into with `?`.

use thiserror::Error;

use crate::message::RequestError;
use crate::stream::StreamError;
use crate::uri::UriError;

/// The top-level error for this crate.
///
/// Wraps the per-module errors so APIs that cross module boundaries (for
/// example building a `ServerRequest`, which can fail while parsing its URI)
/// have a single error type.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("uri error: {source}")]
    Uri {
        #[from]
        source: UriError,
    },

    #[error("stream error: {source}")]
    Stream {
        #[from]
        source: StreamError,
    },

    #[error("request error: {source}")]
    Request {
        #[from]
        source: RequestError,
    },
}
