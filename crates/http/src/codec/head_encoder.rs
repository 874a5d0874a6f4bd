//! Message head encoders.
//!
//! Serializes a start line and the header block into raw bytes:
//!
//! ```text
//! METHOD SP request-target SP HTTP/version CRLF   (requests)
//! HTTP/version SP status SP reason CRLF           (responses)
//! Name: value1,value2 CRLF                        (headers, insertion order)
//! CRLF
//! ```

use bytes::{BufMut, BytesMut};

use crate::message::{HttpMessage, Request, Response};

/// Initial buffer size reserved for a serialized head.
const INIT_HEAD_SIZE: usize = 4 * 1024;

/// Encodes a request start line and header block, up to and including the
/// terminating blank line.
pub fn encode_request_head(request: &Request, dst: &mut BytesMut) {
    dst.reserve(INIT_HEAD_SIZE);

    dst.put_slice(request.method().as_bytes());
    dst.put_slice(b" ");
    dst.put_slice(request.request_target().as_bytes());
    dst.put_slice(b" HTTP/");
    dst.put_slice(request.protocol_version().as_bytes());
    dst.put_slice(b"\r\n");

    encode_headers(request, dst);
}

/// Encodes a response status line and header block, up to and including the
/// terminating blank line.
pub fn encode_response_head(response: &Response, dst: &mut BytesMut) {
    dst.reserve(INIT_HEAD_SIZE);

    dst.put_slice(b"HTTP/");
    dst.put_slice(response.protocol_version().as_bytes());
    dst.put_slice(b" ");
    dst.put_slice(response.status().to_string().as_bytes());
    dst.put_slice(b" ");
    dst.put_slice(response.reason_phrase().as_bytes());
    dst.put_slice(b"\r\n");

    encode_headers(response, dst);
}

fn encode_headers<M: HttpMessage>(message: &M, dst: &mut BytesMut) {
    for (name, values) in message.headers().iter() {
        dst.put_slice(name.as_bytes());
        dst.put_slice(b": ");
        dst.put_slice(values.join(",").as_bytes());
        dst.put_slice(b"\r\n");
    }
    dst.put_slice(b"\r\n");
}
