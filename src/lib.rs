//! docroot - minimal static file server
//!
//! Serves files and directory listings from a document root over HTTP/1.1,
//! one GET per connection.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
