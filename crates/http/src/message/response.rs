use super::message::{HttpMessage, Message};

/// An immutable HTTP response value: status code and reason phrase on top of
/// the shared message core.
///
/// When the reason phrase is unset (or explicitly empty) and the code is a
/// known standard code, the phrase defaults to the standard text; for an
/// unknown code it stays the empty string.
///
/// # Example
///
/// ```
/// use value_http::message::Response;
///
/// assert_eq!(Response::new(404).reason_phrase(), "Not Found");
/// assert_eq!(Response::new(999).reason_phrase(), "");
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    message: Message,
    status: u16,
    reason: String,
}

impl Response {
    /// Builds a response with the default reason phrase for `status`.
    pub fn new(status: u16) -> Self {
        Self::with_phrase(status, "")
    }

    /// Builds a response with an explicit reason phrase; an empty phrase
    /// falls back to the standard text for `status`.
    pub fn with_phrase(status: u16, reason: &str) -> Self {
        Self { message: Message::new(), status, reason: resolve_reason(status, reason) }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason
    }

    /// Returns a new value with the status replaced.
    ///
    /// An explicit non-empty `reason` is used verbatim; otherwise the
    /// default-phrase rule is re-applied for the new code.
    pub fn with_status(&self, status: u16, reason: Option<&str>) -> Self {
        let mut next = self.clone();
        next.status = status;
        next.reason = resolve_reason(status, reason.unwrap_or(""));
        next
    }

    /// The standard reason phrase for a status code, if the code is known.
    pub fn canonical_reason(status: u16) -> Option<&'static str> {
        let reason = match status {
            100 => "Continue",
            101 => "Switching Protocols",
            102 => "Processing",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            203 => "Non-Authoritative Information",
            204 => "No Content",
            205 => "Reset Content",
            206 => "Partial Content",
            207 => "Multi-status",
            208 => "Already Reported",
            300 => "Multiple Choices",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            305 => "Use Proxy",
            306 => "Switch Proxy",
            307 => "Temporary Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            402 => "Payment Required",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            406 => "Not Acceptable",
            407 => "Proxy Authentication Required",
            408 => "Request Time-out",
            409 => "Conflict",
            410 => "Gone",
            411 => "Length Required",
            412 => "Precondition Failed",
            413 => "Request Entity Too Large",
            414 => "Request-URI Too Large",
            415 => "Unsupported Media Type",
            416 => "Requested range not satisfiable",
            417 => "Expectation Failed",
            418 => "I'm a teapot",
            422 => "Unprocessable Entity",
            423 => "Locked",
            424 => "Failed Dependency",
            425 => "Unordered Collection",
            426 => "Upgrade Required",
            428 => "Precondition Required",
            429 => "Too Many Requests",
            431 => "Request Header Fields Too Large",
            451 => "Unavailable For Legal Reasons",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Time-out",
            505 => "HTTP Version not supported",
            506 => "Variant Also Negotiates",
            507 => "Insufficient Storage",
            508 => "Loop Detected",
            511 => "Network Authentication Required",
            _ => return None,
        };

        Some(reason)
    }
}

fn resolve_reason(status: u16, reason: &str) -> String {
    if reason.is_empty() {
        Response::canonical_reason(status).unwrap_or("").to_string()
    } else {
        reason.to_string()
    }
}

impl Default for Response {
    /// A `200 OK` response.
    fn default() -> Self {
        Self::new(200)
    }
}

impl HttpMessage for Response {
    fn message(&self) -> &Message {
        &self.message
    }

    fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }
}
