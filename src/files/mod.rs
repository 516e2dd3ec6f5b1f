//! Static file resolution
//!
//! This module maps request paths onto the document root and loads the
//! file bytes or directory listing found there.

pub mod resolver;

pub use resolver::{Resolver, Resource, ResolveError};
