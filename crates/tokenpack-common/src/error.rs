//! Common error handling utilities and patterns
//!
//! Every tokenpack crate owns its own `thiserror` enum; this module gives
//! them a shared constructor vocabulary and the `From` impls that go with it.

/// Constructors every crate error enum provides for cross-cutting failures
///
/// Crate enums keep their own specific variants; these three are the ones
/// shared code needs to build without knowing the concrete type.
pub trait CommonError: std::error::Error + Send + Sync + 'static {
    /// Reading or writing the filesystem failed
    fn io_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;

    /// Input text could not be understood
    fn parse_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;

    /// Anything without a dedicated variant
    fn other_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;
}

/// Generates `From<std::io::Error>` and `From<anyhow::Error>` through the
/// type's `CommonError` constructors.
///
/// # Example
/// ```no_run
/// # use tokenpack_common::{CommonError, impl_common_conversions};
/// # use thiserror::Error;
/// #
/// # #[derive(Debug, Error)]
/// # enum MyError {
/// #     #[error("IO error: {0}")]
/// #     Io(String),
/// #     #[error("Other error: {0}")]
/// #     Other(String),
/// # }
/// #
/// # impl CommonError for MyError {
/// #     fn io_error(msg: impl Into<String>) -> Self { Self::Io(msg.into()) }
/// #     fn parse_error(msg: impl Into<String>) -> Self { Self::Other(msg.into()) }
/// #     fn other_error(msg: impl Into<String>) -> Self { Self::Other(msg.into()) }
/// # }
/// #
/// impl_common_conversions!(MyError);
/// ```
#[macro_export]
macro_rules! impl_common_conversions {
    ($error_type:ident) => {
        impl From<std::io::Error> for $error_type {
            fn from(e: std::io::Error) -> Self {
                <$error_type as $crate::CommonError>::io_error(e.to_string())
            }
        }

        impl From<anyhow::Error> for $error_type {
            fn from(e: anyhow::Error) -> Self {
                <$error_type as $crate::CommonError>::other_error(e.to_string())
            }
        }
    };
}
