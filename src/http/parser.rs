use crate::http::request::{Method, Request};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("method not supported: POST")]
    MethodNotSupported,
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("request is not valid UTF-8")]
    InvalidEncoding,
}

/// Extracts the method and path from the request line of `buf`.
///
/// `buf` holds everything received for the request, normally up to and
/// including the blank line ending the headers. Only the first line is
/// looked at; it is split on single spaces as `METHOD PATH VERSION`.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let text = std::str::from_utf8(buf).map_err(|_| ParseError::InvalidEncoding)?;

    let request_line = request_line(text);
    let mut parts = request_line.split(' ');

    let method_str = parts.next().unwrap_or_default();
    let path = parts
        .next()
        .ok_or_else(|| ParseError::MalformedRequestLine(request_line.to_string()))?;

    let method = Method::parse(method_str);
    if method == Method::POST {
        return Err(ParseError::MethodNotSupported);
    }

    Ok(Request::new(method, path))
}

/// First line of `text`, without its line terminator.
pub fn request_line(text: &str) -> &str {
    let line = text.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}

/// Offset of the `\r\n\r\n` header terminator, if present.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}
