//! Field tag extraction.
//!
//! A tag is the raw annotation string attached to a record field, either
//! `name` or `name,optional`. Fields whose tag name is empty do not
//! participate in mapping or enumeration.

/// Parsed view of a field's raw tag annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// External flag identifier; empty when the field does not participate.
    pub name: &'a str,
    /// Whether absence of a matching argument is tolerated.
    pub optional: bool,
}

impl<'a> Tag<'a> {
    /// Parse a raw annotation string.
    ///
    /// The first comma-separated segment is the name; the field is optional
    /// iff the second segment equals the literal `optional`. Any other
    /// second segment means required; segments past the second are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use argmap::Tag;
    /// assert_eq!(Tag::parse("days,optional"), Tag { name: "days", optional: true });
    /// assert_eq!(Tag::parse("days"), Tag { name: "days", optional: false });
    /// assert_eq!(Tag::parse(""), Tag { name: "", optional: false });
    /// ```
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let mut segments = raw.split(',');
        let name = segments.next().unwrap_or("");
        let optional = segments.next() == Some("optional");
        Self { name, optional }
    }
}
