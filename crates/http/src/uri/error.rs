use thiserror::Error;

/// Errors produced while parsing or rebuilding a [`Uri`](super::Uri).
#[derive(Debug, Error)]
pub enum UriError {
    #[error("unable to parse URI: {uri}")]
    MalformedUri { uri: String },

    #[error("{host:?} is not a valid host")]
    InvalidHost { host: String },
}

impl UriError {
    pub fn malformed<S: ToString>(uri: S) -> Self {
        Self::MalformedUri { uri: uri.to_string() }
    }

    pub fn invalid_host<S: ToString>(host: S) -> Self {
        Self::InvalidHost { host: host.to_string() }
    }
}
