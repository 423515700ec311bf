//! Argument tokenization.
//!
//! Converts a flat token sequence into a flag-name to raw-value mapping.
//! Tokens pair up as `(flag, value)`; flag tokens may carry a cosmetic `--`
//! or `-` prefix, which is stripped before lookup. Both prefix styles and
//! bare names collide in the resulting mapping.

use std::collections::HashMap;

use crate::error::ArgvError;

/// Pair up `argv` into a flag-name to raw-value mapping.
///
/// Later occurrences of the same flag name overwrite earlier ones.
///
/// # Errors
///
/// Returns [`ArgvError::InvalidParameterCount`] when the token count is odd.
pub fn extract_args<S: AsRef<str>>(argv: &[S]) -> Result<HashMap<String, String>, ArgvError> {
    let pairs = argv.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return Err(ArgvError::InvalidParameterCount);
    }
    let mut args = HashMap::with_capacity(pairs.len());
    for pair in pairs {
        let [flag, value] = pair else { continue };
        args.insert(
            strip_prefix(flag.as_ref()).to_owned(),
            value.as_ref().to_owned(),
        );
    }
    Ok(args)
}

/// Remove a leading `--`, else a leading `-`, else nothing.
fn strip_prefix(flag: &str) -> &str {
    flag.strip_prefix("--")
        .or_else(|| flag.strip_prefix('-'))
        .unwrap_or(flag)
}
