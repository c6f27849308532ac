//! Top-level facade crate for sitemeter.
//!
//! Re-exports the sitemap rules and the server library so users can depend on a single crate.

pub mod core {
    pub use sitemeter_core::*;
}

pub mod server {
    pub use sitemeter_server::*;
}
