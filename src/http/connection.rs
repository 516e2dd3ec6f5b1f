use bytes::{Bytes, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::files::{ResolveError, Resolver};
use crate::http::parser::{find_headers_end, parse_http_request, request_line, ParseError};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    resolver: Resolver,
    max_request_bytes: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Bytes),
    Writing(ResponseWriter),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, resolver: Resolver, max_request_bytes: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(1024),
            resolver,
            max_request_bytes,
            state: ConnectionState::Reading,
        }
    }

    /// Serves exactly one request, then stops. The stream is closed when the
    /// connection is dropped.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match self.read_request().await? {
                        Some(raw) => {
                            self.state = ConnectionState::Processing(raw);
                        }
                        None => {
                            tracing::info!("An empty request was received");
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(raw) => {
                    let response = handle_request(&raw[..], &self.resolver).await?;
                    tracing::info!(status = response.status.as_u16(), "Responding");

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the header terminator shows up or the peer stops sending.
    ///
    /// Returns `None` when nothing at all was received.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Bytes>> {
        loop {
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 || find_headers_end(&self.buffer).is_some() {
                break;
            }

            // Refuse to buffer headers forever
            if self.buffer.len() > self.max_request_bytes {
                anyhow::bail!(
                    "request headers exceed {} bytes",
                    self.max_request_bytes
                );
            }
        }

        if self.buffer.is_empty() {
            return Ok(None);
        }

        Ok(Some(self.buffer.split().freeze()))
    }
}

/// Turns the raw bytes of one request into its response.
///
/// POST yields 405 and a missing path yields 404. Every other failure,
/// including a file whose media type cannot be guessed, is returned as an
/// error and no response is produced.
pub async fn handle_request(raw: &[u8], resolver: &Resolver) -> anyhow::Result<Response> {
    if let Ok(text) = std::str::from_utf8(raw) {
        tracing::debug!(request_line = request_line(text), "Request received");
    }

    let request = match parse_http_request(raw) {
        Ok(request) => request,
        Err(ParseError::MethodNotSupported) => return Ok(Response::method_not_allowed()),
        Err(e) => return Err(e.into()),
    };

    match resolver.resolve(&request.path).await {
        Ok(resource) => {
            let (body, media_type) = resource.into_content();
            Ok(Response::ok(body, media_type))
        }
        Err(ResolveError::NotFound(path)) => {
            tracing::debug!(%path, "No such resource");
            Ok(Response::not_found())
        }
        Err(e) => Err(e.into()),
    }
}
