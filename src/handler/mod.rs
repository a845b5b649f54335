//! Request handler module
//!
//! Responsible for request routing dispatch: HTML pages on one side,
//! the JSON endpoints on the other, all backed by the same user store.

pub mod pages;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
