//! Procedural macros for `argmap`.
//!
//! [`derive@Record`] generates the field-descriptor code the `argmap`
//! mapper walks: one visit per field in declaration order, a
//! fully-qualified type id, and a downcasting whole-value assignment used
//! for reserved types. This replaces the runtime reflection the design
//! originated with.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;

/// Derive macro for `argmap::Record`.
///
/// Applies to structs with named fields. Field behavior is controlled with
/// `#[argmap(...)]`:
///
/// - `#[argmap(tag = "name")]` / `#[argmap(tag = "name,optional")]` — the
///   raw tag annotation, parsed at runtime by the mapper.
/// - `#[argmap]` — tag name derived from the field identifier in
///   kebab-case (`max_retries` becomes `max-retries`).
/// - `optional` — absence of a matching argument is tolerated; appended to
///   a derived name, ignored when an explicit tag already carries a
///   modifier segment.
/// - `readonly` — the field participates in enumeration but the mapper
///   refuses to write it.
/// - `skip` — the field is not visited at all; its type need not implement
///   `argmap::ArgField`.
///
/// Fields with no attribute are still visited with an empty tag: embedded
/// records recurse regardless of tagging, while untagged leaves are
/// skipped by the mapper.
#[proc_macro_derive(Record, attributes(argmap))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let parsed = parse_macro_input!(input as DeriveInput);
    expand::derive(&parsed)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
