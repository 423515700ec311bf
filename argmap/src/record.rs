//! Record descriptors: the structural view the mapper walks.
//!
//! The original design discovered fields through runtime reflection. Here a
//! record type instead implements [`Record`], normally via
//! `#[derive(Record)]`, which hands the mapper each field in declaration
//! order as a [`Field`]: the raw tag annotation, a writability flag, and a
//! [`Slot`] — a mutable, typed view of the field's storage.
//!
//! Field types plug in through [`ArgField`]. This crate implements it for
//! the built-in primitive kinds, the derive implements it for record types,
//! and applications implement it for custom leaf types coerced through the
//! registry:
//!
//! ```
//! use argmap::{ArgField, Slot};
//!
//! #[derive(Default)]
//! struct Verbosity(u8);
//!
//! impl ArgField for Verbosity {
//!     fn slot(&mut self) -> Slot<'_> {
//!         Slot::custom("demo::Verbosity", self)
//!     }
//! }
//! ```

use std::any::Any;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::ArgvError;

/// A structured aggregate with named, tagged fields — the destination for
/// parsed arguments.
///
/// Implemented by `#[derive(Record)]`. The record types supplied to the
/// mapper must form a finite tree; the traversal performs no cycle
/// detection.
pub trait Record {
    /// Fully-qualified type name (`module_path::TypeName`), matched against
    /// the reserved-type set and the coercion registry.
    fn type_id(&self) -> &'static str;

    /// Invoke `visit` once per field, in declaration order.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `visit`, aborting the walk.
    fn visit_fields<'a>(
        &'a mut self,
        visit: &mut dyn FnMut(Field<'a>) -> Result<(), ArgvError>,
    ) -> Result<(), ArgvError>;

    /// Replace the whole record with a type-erased value, returning `false`
    /// when the value is not of this record's concrete type.
    ///
    /// Used when this record's type is reserved and its value comes from a
    /// registered coercion instead of recursive descent.
    fn assign_boxed(&mut self, value: Box<dyn Any>) -> bool;
}

/// One field of a record, as presented to the mapper.
pub struct Field<'a> {
    /// Raw tag annotation (`name` or `name,optional`); empty when the field
    /// carries no tag.
    pub tag: &'a str,
    /// Whether the mapper may write through [`Field::slot`].
    pub writable: bool,
    /// Typed view of the field's storage.
    pub slot: Slot<'a>,
}

/// Mutable, typed view of a field's storage.
///
/// A closed sum over the supported field kinds, plus a type-erased
/// [`Slot::Custom`] case for registry-coerced types and a [`Slot::Record`]
/// case for nested records. 16-bit integers are deliberately unsupported.
pub enum Slot<'a> {
    /// Boolean field.
    Bool(&'a mut bool),
    /// Unsigned 8-bit integer field.
    U8(&'a mut u8),
    /// Unsigned 32-bit integer field.
    U32(&'a mut u32),
    /// Unsigned 64-bit integer field.
    U64(&'a mut u64),
    /// Unsigned machine-width integer field.
    Usize(&'a mut usize),
    /// Signed 8-bit integer field.
    I8(&'a mut i8),
    /// Signed 32-bit integer field.
    I32(&'a mut i32),
    /// Signed 64-bit integer field.
    I64(&'a mut i64),
    /// Signed machine-width integer field.
    Isize(&'a mut isize),
    /// 32-bit floating point field.
    F32(&'a mut f32),
    /// 64-bit floating point field.
    F64(&'a mut f64),
    /// String field; assigned verbatim.
    Str(&'a mut String),
    /// String-list field; one comma-separated argument value.
    StrList(&'a mut Vec<String>),
    /// RFC 3339 calendar timestamp, offset preserved.
    Timestamp(&'a mut DateTime<FixedOffset>),
    /// RFC 3339 calendar timestamp, normalized to UTC.
    TimestampUtc(&'a mut DateTime<Utc>),
    /// Custom leaf type, coerced through the registry under `type_id`.
    Custom {
        /// Registry key identifying the coercion for this type.
        type_id: &'static str,
        /// Type-erased destination for the coerced value.
        store: &'a mut dyn AssignAny,
    },
    /// Embedded record, recursed into unless its type is reserved.
    Record(&'a mut dyn Record),
}

impl<'a> Slot<'a> {
    /// Build a [`Slot::Custom`] over `value`, registered under `type_id`.
    #[must_use]
    pub fn custom<T: Any>(type_id: &'static str, value: &'a mut T) -> Self {
        Self::Custom {
            type_id,
            store: value,
        }
    }
}

/// Type-erased assignment target behind [`Slot::Custom`].
pub trait AssignAny {
    /// Overwrite `self` with `value`, returning `false` on a type mismatch.
    fn assign(&mut self, value: Box<dyn Any>) -> bool;
}

impl<T: Any> AssignAny for T {
    fn assign(&mut self, value: Box<dyn Any>) -> bool {
        value.downcast::<T>().map(|boxed| *self = *boxed).is_ok()
    }
}

/// A type usable as a record field.
///
/// Yields the [`Slot`] the mapper dispatches on.
pub trait ArgField {
    /// Expose this value's storage to the mapper.
    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! leaf_arg_field {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl ArgField for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

leaf_arg_field! {
    Bool => bool,
    U8 => u8,
    U32 => u32,
    U64 => u64,
    Usize => usize,
    I8 => i8,
    I32 => i32,
    I64 => i64,
    Isize => isize,
    F32 => f32,
    F64 => f64,
    Str => String,
    StrList => Vec<String>,
    Timestamp => DateTime<FixedOffset>,
    TimestampUtc => DateTime<Utc>,
}
