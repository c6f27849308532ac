//! HTTP middleware.

pub mod response_time;
