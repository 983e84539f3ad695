//! Public entry points over HTTP.

pub mod http;

pub use http::{router, AppState};
