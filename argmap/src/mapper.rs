//! The field mapper: recursive descent over a record's fields.
//!
//! [`Mapper`] owns the two pieces of configuration the walk consults — the
//! coercion registry for custom leaf types and the reserved-type set that
//! stops recursion — and exposes the two operations over records:
//! [`Mapper::parse_argv`] to populate one from a token list and
//! [`Mapper::parse_names`] to enumerate its declared flag names.
//!
//! The descent is fail-fast: the first error anywhere in the record tree
//! aborts the call, and fields written before the error stay written.

use std::collections::HashMap;

use tracing::debug;

use crate::coerce;
use crate::error::{ArgvError, BoxError, TypeMismatch};
use crate::record::{Field, Record, Slot};
use crate::tag::Tag;
use crate::tokens::extract_args;

/// Coercion function registered for a custom field type: raw argument string
/// in, type-erased value (or cause) out.
pub type CoerceFn =
    Box<dyn Fn(&str) -> Result<Box<dyn std::any::Any>, BoxError> + Send + Sync>;

/// Record types treated as terminal values from the start: calendar
/// timestamps are structurally composite but never recursed into.
const SEED_RESERVED: [&str; 2] = [
    "chrono::DateTime<chrono::FixedOffset>",
    "chrono::DateTime<chrono::Utc>",
];

/// Maps flat `--name value` argument lists onto tagged records.
///
/// A `Mapper` is plain configuration: construct it once, register any custom
/// coercions and reserved types, then share it freely — parsing takes
/// `&self`, so a `Mapper` can serve concurrent callers on independent
/// records.
///
/// ```
/// use argmap::{Mapper, Record};
///
/// #[derive(Default, Record)]
/// struct Connection {
///     #[argmap(tag = "host")]
///     host: String,
///     #[argmap(tag = "port")]
///     port: u32,
///     #[argmap(tag = "retries,optional")]
///     retries: u8,
/// }
///
/// let mapper = Mapper::new();
/// let mut conn = Connection::default();
/// mapper.parse_argv(&mut conn, &["--host", "db.local", "--port", "5432"])?;
/// assert_eq!(conn.host, "db.local");
/// assert_eq!(conn.port, 5432);
/// assert_eq!(conn.retries, 0);
/// # Ok::<(), argmap::ArgvError>(())
/// ```
pub struct Mapper {
    coercions: HashMap<String, CoerceFn>,
    reserved: Vec<String>,
}

impl Default for Mapper {
    fn default() -> Self {
        Self {
            coercions: HashMap::new(),
            reserved: SEED_RESERVED.iter().map(|id| (*id).to_owned()).collect(),
        }
    }
}

impl Mapper {
    /// A mapper with the built-in coercions and the seeded reserved-type
    /// set, and no custom registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a coercion for the custom type `type_id`.
    ///
    /// The last registration for a given id wins; there is no removal.
    pub fn add_parser<F>(&mut self, type_id: impl Into<String>, parse: F)
    where
        F: Fn(&str) -> Result<Box<dyn std::any::Any>, BoxError> + Send + Sync + 'static,
    {
        let key = type_id.into();
        let replaced = self.coercions.insert(key.clone(), Box::new(parse)).is_some();
        if replaced {
            debug!(type_id = %key, "replacing registered coercion");
        }
    }

    /// Mark `type_id` as terminal: fields of this record type are coerced
    /// whole through the registry instead of being recursed into.
    ///
    /// Duplicate additions are harmless.
    pub fn add_reserved_type(&mut self, type_id: impl Into<String>) {
        self.reserved.push(type_id.into());
    }

    fn is_reserved(&self, type_id: &str) -> bool {
        self.reserved.iter().any(|id| id == type_id)
    }

    /// Tokenize `argv` and populate `dest`'s tagged fields from it,
    /// recursing into nested records.
    ///
    /// Every nested record sees the same flat mapping: tag names share one
    /// namespace, and when two fields declare the same name the
    /// later-visited field wins. On failure, fields written before the
    /// error keep their values.
    ///
    /// # Errors
    ///
    /// [`ArgvError::EmptyArgs`] for an empty token list,
    /// [`ArgvError::InvalidParameterCount`] for an odd one, and the
    /// per-field errors described on [`ArgvError`] for the first field that
    /// cannot be satisfied.
    pub fn parse_argv<S: AsRef<str>>(
        &self,
        dest: &mut dyn Record,
        argv: &[S],
    ) -> Result<(), ArgvError> {
        if argv.is_empty() {
            return Err(ArgvError::EmptyArgs);
        }
        let args = extract_args(argv)?;
        self.populate(dest, &args)
    }

    /// Collect every tag name declared on `dest`, depth-first in field
    /// declaration order, recursing into non-reserved nested records.
    ///
    /// Optional and read-only fields are included; untagged fields are not.
    /// Duplicate names across nested records appear once per declaration.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised while walking the record tree.
    pub fn parse_names(&self, dest: &mut dyn Record) -> Result<Vec<String>, ArgvError> {
        let mut names = Vec::new();
        self.collect_names(dest, &mut names)?;
        Ok(names)
    }

    fn populate(&self, dest: &mut dyn Record, args: &HashMap<String, String>) -> Result<(), ArgvError> {
        // An empty mapping is only an error at the top-level token check.
        if args.is_empty() {
            return Ok(());
        }
        dest.visit_fields(&mut |field| self.map_field(field, args))
    }

    fn map_field(&self, field: Field<'_>, args: &HashMap<String, String>) -> Result<(), ArgvError> {
        let Field { tag, writable, slot } = field;
        match slot {
            Slot::Record(record) if !self.is_reserved(record.type_id()) => {
                self.populate(record, args)
            }
            leaf => self.map_leaf(tag, writable, leaf, args),
        }
    }

    fn map_leaf(
        &self,
        raw_tag: &str,
        writable: bool,
        slot: Slot<'_>,
        args: &HashMap<String, String>,
    ) -> Result<(), ArgvError> {
        let tag = Tag::parse(raw_tag);
        if tag.name.is_empty() {
            return Ok(());
        }
        // Checked before the lookup, so a read-only field fails even when
        // its argument is absent. Custom slots are exempt.
        if !writable && !matches!(slot, Slot::Custom { .. }) {
            return Err(ArgvError::ReadOnly(tag.name.to_owned()));
        }
        let Some(raw) = args.get(tag.name) else {
            if tag.optional {
                return Ok(());
            }
            return Err(ArgvError::MissingValue(tag.name.to_owned()));
        };
        self.assign(tag.name, slot, raw)
    }

    fn assign(&self, name: &str, slot: Slot<'_>, raw: &str) -> Result<(), ArgvError> {
        match slot {
            Slot::Bool(field) => {
                *field = coerce::parse_bool(raw).map_err(|e| ArgvError::invalid_value(name, e))?;
            }
            Slot::U8(field) => *field = parse_base10(name, raw)?,
            Slot::U32(field) => *field = parse_base10(name, raw)?,
            Slot::U64(field) => *field = parse_base10(name, raw)?,
            Slot::Usize(field) => *field = parse_base10(name, raw)?,
            Slot::I8(field) => *field = parse_base10(name, raw)?,
            Slot::I32(field) => *field = parse_base10(name, raw)?,
            Slot::I64(field) => *field = parse_base10(name, raw)?,
            Slot::Isize(field) => *field = parse_base10(name, raw)?,
            Slot::F32(field) => {
                *field = coerce::parse_f32(raw)
                    .map_err(|source| ArgvError::invalid_value(name, source))?;
            }
            Slot::F64(field) => {
                *field = coerce::parse_f64(raw)
                    .map_err(|source| ArgvError::invalid_value(name, source))?;
            }
            Slot::Str(field) => raw.clone_into(field),
            Slot::StrList(field) => *field = coerce::parse_string_list(raw),
            Slot::Timestamp(field) => {
                *field =
                    coerce::parse_timestamp(raw).map_err(|e| ArgvError::invalid_value(name, e))?;
            }
            Slot::TimestampUtc(field) => {
                *field = coerce::parse_timestamp(raw)
                    .map_err(|e| ArgvError::invalid_value(name, e))?
                    .to_utc();
            }
            Slot::Custom { type_id, store } => {
                let value = self.coerce_registered(name, type_id, raw)?;
                if !store.assign(value) {
                    return Err(mismatch(name, type_id));
                }
            }
            Slot::Record(record) => {
                let type_id = record.type_id();
                let value = self.coerce_registered(name, type_id, raw)?;
                if !record.assign_boxed(value) {
                    return Err(mismatch(name, type_id));
                }
            }
        }
        Ok(())
    }

    fn coerce_registered(
        &self,
        name: &str,
        type_id: &str,
        raw: &str,
    ) -> Result<Box<dyn std::any::Any>, ArgvError> {
        let Some(parse) = self.coercions.get(type_id) else {
            return Err(ArgvError::NotSupported(name.to_owned()));
        };
        parse(raw).map_err(|source| ArgvError::InvalidValue {
            field: name.to_owned(),
            source,
        })
    }

    fn collect_names(&self, dest: &mut dyn Record, out: &mut Vec<String>) -> Result<(), ArgvError> {
        dest.visit_fields(&mut |field| match field.slot {
            Slot::Record(record) if !self.is_reserved(record.type_id()) => {
                self.collect_names(record, out)
            }
            _ => {
                let tag = Tag::parse(field.tag);
                if !tag.name.is_empty() {
                    out.push(tag.name.to_owned());
                }
                Ok(())
            }
        })
    }
}

/// Base-10 parse at the declared width; `str::parse` reports both syntax and
/// range causes.
fn parse_base10<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ArgvError>
where
    T::Err: Into<BoxError>,
{
    raw.parse()
        .map_err(|e: T::Err| ArgvError::invalid_value(name, e))
}

fn mismatch(name: &str, type_id: &str) -> ArgvError {
    ArgvError::invalid_value(
        name,
        TypeMismatch {
            type_id: type_id.to_owned(),
        },
    )
}

/// Populate `dest` from `argv` using a default [`Mapper`].
///
/// See [`Mapper::parse_argv`]. Use a [`Mapper`] directly when custom
/// coercions or reserved types are involved.
///
/// # Errors
///
/// As for [`Mapper::parse_argv`].
pub fn parse_argv<S: AsRef<str>>(dest: &mut dyn Record, argv: &[S]) -> Result<(), ArgvError> {
    Mapper::new().parse_argv(dest, argv)
}

/// Enumerate `dest`'s declared tag names using a default [`Mapper`].
///
/// See [`Mapper::parse_names`].
///
/// # Errors
///
/// As for [`Mapper::parse_names`].
pub fn parse_names(dest: &mut dyn Record) -> Result<Vec<String>, ArgvError> {
    Mapper::new().parse_names(dest)
}
