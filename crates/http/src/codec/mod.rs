//! Wire-facing serialization of message heads.
//!
//! A transport writing one of these values to a connection needs the start
//! line and header block as raw bytes; the body is a stream the transport
//! pumps itself. This module stops at the blank line for exactly that
//! reason.

mod head_encoder;
pub use head_encoder::encode_request_head;
pub use head_encoder::encode_response_head;
