/// HTTP status codes this server can answer with.
///
/// - `Ok` (200): Resource found and returned
/// - `NotFound` (404): No filesystem entry at the requested path
/// - `MethodNotAllowed` (405): The request used POST
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::MethodNotAllowed.reason_phrase(), "Method Not Allowed");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

/// Media type and bytes carried by a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub media_type: String,
    pub body: Vec<u8>,
}

/// A complete HTTP response ready to be serialized.
///
/// Error responses are a bare status line: they carry no headers, no
/// blank separator line and no body. Successful responses carry exactly one
/// `Content-Type` header followed by the body. No `Content-Length` is ever
/// sent; the body ends when the connection closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Present only for 200 responses
    pub content: Option<Content>,
}

impl Response {
    /// Creates a 200 OK response with the given body and media type.
    pub fn ok(body: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Ok,
            content: Some(Content {
                media_type: media_type.into(),
                body: body.into(),
            }),
        }
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NotFound,
            content: None,
        }
    }

    /// Creates a 405 Method Not Allowed response.
    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::MethodNotAllowed,
            content: None,
        }
    }

    pub fn media_type(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.media_type.as_str())
    }

    pub fn body(&self) -> &[u8] {
        self.content.as_ref().map(|c| c.body.as_slice()).unwrap_or_default()
    }
}
