use std::io;

use thiserror::Error;

/// Errors produced by [`StreamHandle`](super::StreamHandle) operations.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("invalid stream mode: {mode:?}")]
    InvalidMode { mode: String },

    #[error("cannot open stream {target}: {source}")]
    CannotOpen { target: String, source: io::Error },

    #[error("stream is not readable")]
    NotReadable,

    #[error("stream is not writable")]
    NotWritable,

    #[error("stream is not seekable")]
    NotSeekable,

    #[error("read length must be at least zero, got {len}")]
    InvalidLength { len: i64 },

    #[error("unable to seek stream: {source}")]
    SeekFailed { source: io::Error },

    #[error("stream io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("stream is detached")]
    Detached,
}

impl StreamError {
    pub fn invalid_mode<S: ToString>(mode: S) -> Self {
        Self::InvalidMode { mode: mode.to_string() }
    }

    pub fn cannot_open<S: ToString>(target: S, source: io::Error) -> Self {
        Self::CannotOpen { target: target.to_string(), source }
    }

    pub fn invalid_length(len: i64) -> Self {
        Self::InvalidLength { len }
    }

    pub fn seek_failed(source: io::Error) -> Self {
        Self::SeekFailed { source }
    }

    pub fn io(source: io::Error) -> Self {
        Self::Io { source }
    }
}
