//! sitemeter core: runtime-free sitemap rules, entry model, and error types.
//!
//! This crate decides which site URLs belong in a sitemap and with what crawl
//! metadata. It performs no I/O: identifier sets are handed in by the caller,
//! which keeps every rule here a pure function that can be reused by the
//! server, the sitemap generator, and tests alike.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `SiteError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod sitemap;

/// Shared result type.
pub use error::{Result, SiteError};
