//! Request handler module
//!
//! Responsible for request routing dispatch and the café listing business
//! logic.

pub mod cafe;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
