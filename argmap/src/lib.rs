//! Tag-driven mapping of flat `--name value` argument lists onto annotated
//! structs.
//!
//! Annotate a struct's fields with `#[argmap(...)]` tags, derive
//! [`Record`], and [`parse_argv`] populates the struct from a token list,
//! coercing each raw string to the field's type and recursing into embedded
//! records. [`parse_names`] enumerates the declared tag names for
//! "available options" help text.
//!
//! ```
//! use argmap::{parse_argv, parse_names, Record};
//!
//! #[derive(Default, Record)]
//! struct Server {
//!     #[argmap(tag = "host")]
//!     host: String,
//!     #[argmap(tag = "port")]
//!     port: u32,
//!     #[argmap(tag = "verbose,optional")]
//!     verbose: bool,
//!     #[argmap(tag = "tags,optional")]
//!     tags: Vec<String>,
//! }
//!
//! let mut server = Server::default();
//! parse_argv(&mut server, &["--host", "0.0.0.0", "--port", "8080", "-tags", "a, b"])?;
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.tags, ["a", "b"]);
//! assert!(!server.verbose);
//!
//! let names = parse_names(&mut Server::default())?;
//! assert_eq!(names, ["host", "port", "verbose", "tags"]);
//! # Ok::<(), argmap::ArgvError>(())
//! ```
//!
//! Custom field types implement [`ArgField`] and register a coercion on a
//! [`Mapper`]; record types that must be treated as indivisible leaves are
//! marked reserved with [`Mapper::add_reserved_type`].

pub use argmap_macros::Record;

/// Re-exported for manual [`ArgField`] implementations over timestamp types.
pub use chrono;

mod coerce;
mod error;
mod mapper;
mod record;
mod tag;
mod tokens;

pub use coerce::{FloatRangeError, ParseBoolError};
pub use error::{ArgvError, BoxError, TypeMismatch};
pub use mapper::{CoerceFn, Mapper, parse_argv, parse_names};
pub use record::{ArgField, AssignAny, Field, Record, Slot};
pub use tag::Tag;
pub use tokens::extract_args;
