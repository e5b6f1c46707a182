//! Error collection and error-shaped responses.

pub mod handlers;
pub mod multi_error;
pub mod responses;

pub use multi_error::MultiError;
