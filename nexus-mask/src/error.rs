// nexus-mask/src/error.rs

//! Error types for flag mask operations.

use thiserror::Error;

/// Encode input that is neither a set of named flags nor an integer.
///
/// Returned by [`FlagMask::encode`](crate::FlagMask::encode) when a raw
/// value's [`ToInt`](crate::ToInt) coercion fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid encode input {input}: expected flag names or an integer")]
pub struct InvalidEncodeInput {
    /// `Debug` rendering of the rejected value.
    pub input: String,
}

/// Unrecognized native type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown native type: {name}")]
pub struct ParseNativeTypeError {
    /// The name that failed to parse.
    pub name: String,
}
