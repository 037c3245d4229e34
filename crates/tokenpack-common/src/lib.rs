//! Common utilities and patterns shared across tokenpack crates
//!
//! Holds the error conventions every crate follows and the one-time
//! process environment setup used by the binary.

pub mod error;
pub mod init;

pub use error::CommonError;
pub use init::initialize_environment;
