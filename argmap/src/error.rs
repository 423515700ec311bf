//! Error taxonomy for argument mapping.
//!
//! Every failure is terminal for the current [`parse_argv`](crate::parse_argv)
//! or [`parse_names`](crate::parse_names) call: the first error anywhere in
//! the recursive descent aborts the whole call. Fields written before the
//! error stay written.

use thiserror::Error;

/// Boxed dynamic error used as the underlying cause of a coercion failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while tokenizing arguments or mapping them onto a record.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArgvError {
    /// Zero tokens were passed to [`parse_argv`](crate::parse_argv).
    #[error("empty argument list")]
    EmptyArgs,

    /// The token list has an odd length and cannot pair up.
    #[error("invalid parameter count")]
    InvalidParameterCount,

    /// The destination is not a mutable record reference.
    ///
    /// Unreachable through the typed API, where `&mut dyn Record` enforces
    /// this statically; retained for hand-written [`Record`](crate::Record)
    /// implementations.
    #[error("dest must be a mutable record reference")]
    InvalidDest,

    /// The destination is not a structured record.
    ///
    /// Unreachable through the typed API, as with [`Self::InvalidDest`].
    #[error("dest must be a structured record")]
    InvalidDestType,

    /// A tagged field exists but cannot be written.
    #[error("field {0} is not settable")]
    ReadOnly(String),

    /// A required tagged field has no corresponding argument.
    #[error("value for arg '{0}' is missing")]
    MissingValue(String),

    /// Coercion of the supplied raw value failed.
    #[error("error parsing arg {field}: {source}")]
    InvalidValue {
        /// Tag name of the field whose value failed to coerce.
        field: String,
        /// Underlying parse error (syntax, range, or type mismatch).
        #[source]
        source: BoxError,
    },

    /// The field's type has no built-in or registered coercion.
    #[error("non-supported type on arg {0}")]
    NotSupported(String),
}

impl ArgvError {
    /// Construct an [`ArgvError::InvalidValue`] for `field` wrapping `source`.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            source: source.into(),
        }
    }
}

/// A registered coercion produced a value whose concrete type does not match
/// the destination field.
#[derive(Debug, Error)]
#[error("coerced value does not match field type {type_id}")]
pub struct TypeMismatch {
    /// Fully-qualified type id of the destination field.
    pub type_id: String,
}
