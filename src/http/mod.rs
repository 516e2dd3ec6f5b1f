//! HTTP protocol implementation.
//!
//! This module implements the small slice of HTTP/1.1 the server speaks:
//! one GET per connection, answered and then closed.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine and the request handler
//! - **`parser`**: Extracts method and path from the request line
//! - **`request`**: HTTP request representation
//! - **`response`**: The three response shapes (200, 404, 405)
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate bytes until CRLF CRLF or EOF
//!        └──────┬──────┘
//!               │ Request received (empty → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse, resolve, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use docroot::files::Resolver;
//! use docroot::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:10000").await?;
//!     let resolver = Resolver::new("webroot");
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, resolver.clone(), 64 * 1024);
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
