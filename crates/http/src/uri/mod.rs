//! URI value type per RFC 3986.
//!
//! [`Uri`] is an immutable value object: every `with_*` mutator returns a new
//! value and never alters the receiver. Parsing splits a raw string by the
//! generic URI grammar (`scheme ':' '//' authority path '?' query '#'
//! fragment`), and [`Uri`]'s `Display` implementation recomposes the exact
//! input for anything `parse` accepts.
//!
//! Only the host component is validated (IPv4 literal or DNS name); every
//! other component accepts any string. This permissiveness is intentional for
//! compatibility with the loose inputs real applications carry around.

mod error;
pub use error::UriError;

mod host;

#[allow(clippy::module_inception, reason = "module holds the type of the same name")]
mod uri;
pub use uri::Uri;
