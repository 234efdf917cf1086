//! Property blob parsing
//!
//! Vendor connection properties are configured as a flat `key=value;key=value`
//! string. Every `;` becomes a line break and the result is read with the
//! line-oriented properties-file format: `#` and `!` start comment lines,
//! keys end at the first unescaped `=`, `:` or whitespace, and backslash
//! escapes (including `\uXXXX`) are decoded. A literal `;` can therefore never
//! appear in a key or value.

mod format;

#[cfg(test)]
mod tests;

use poolprops_core::{ConfigFormatError, PropertyMap};

/// Parse a property blob, merging into `existing` when given
///
/// `None` text leaves the map untouched. Later occurrences of a key replace
/// earlier ones, both within `text` and relative to `existing`.
///
/// # Example
///
/// ```
/// use poolprops_connection::properties::parse_properties;
///
/// let props = parse_properties(Some("user=app;ssl=true"), None).unwrap();
/// assert_eq!(props.get("ssl").map(String::as_str), Some("true"));
/// ```
pub fn parse_properties(
    text: Option<&str>,
    existing: Option<PropertyMap>,
) -> Result<PropertyMap, ConfigFormatError> {
    let mut properties = existing.unwrap_or_default();
    if let Some(text) = text {
        merge_properties(text, &mut properties)?;
    }
    Ok(properties)
}

/// Parse a property blob straight into `target`
///
/// On error `target` may already hold the entries that preceded the
/// malformed one.
pub fn merge_properties(text: &str, target: &mut PropertyMap) -> Result<(), ConfigFormatError> {
    let normalized = text.replace(';', "\n");
    let before = target.len();
    format::load(&normalized, target)?;
    tracing::debug!(added = target.len() - before, "merged property blob");
    Ok(())
}
