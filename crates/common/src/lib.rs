//! Output protocol types and errors shared by the `cryptohelper` binaries.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
