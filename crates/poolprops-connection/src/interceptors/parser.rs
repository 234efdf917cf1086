//! Chain text to interceptor definitions

use poolprops_core::{ConfigFormatError, InterceptorDefinition};

const ENTRY_SEPARATOR: char = ';';
const PROPERTY_SEPARATOR: char = ',';

/// Parse an interceptor chain into definitions, in declaration order
///
/// `None` and the empty string both yield an empty chain. An entry whose
/// parentheses are missing or out of order is taken verbatim as a class name
/// with no properties. Trailing separators are ignored; an empty entry
/// anywhere else is rejected.
///
/// # Errors
///
/// Returns [`ConfigFormatError`] when an entry has an empty name, a property
/// lacks `=` or has an empty name, or text follows the closing `)`.
pub fn parse_interceptor_chain(
    spec: Option<&str>,
) -> Result<Vec<InterceptorDefinition>, ConfigFormatError> {
    let Some(spec) = spec else {
        return Ok(Vec::new());
    };

    let definitions = split_entries(spec, ENTRY_SEPARATOR)
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = definitions.len(), "parsed interceptor chain");
    Ok(definitions)
}

fn parse_entry(index: usize, entry: &str) -> Result<InterceptorDefinition, ConfigFormatError> {
    if entry.is_empty() {
        return Err(ConfigFormatError::EmptyInterceptorName { index });
    }

    let open = match (entry.find('('), entry.find(')')) {
        (Some(open), Some(close)) if close > open => open,
        _ => {
            tracing::trace!(index, entry, "no property list, using entry as class name");
            return Ok(InterceptorDefinition::new(entry));
        }
    };

    if !entry.ends_with(')') {
        return Err(ConfigFormatError::TrailingText {
            index,
            token: entry.to_string(),
        });
    }

    let class_name = &entry[..open];
    if class_name.is_empty() {
        return Err(ConfigFormatError::EmptyInterceptorName { index });
    }

    let mut definition = InterceptorDefinition::new(class_name);
    let property_text = &entry[open + 1..entry.len() - 1];
    for token in split_entries(property_text, PROPERTY_SEPARATOR) {
        let Some((name, value)) = token.split_once('=') else {
            return Err(ConfigFormatError::MalformedProperty {
                index,
                token: token.to_string(),
            });
        };
        if name.is_empty() {
            return Err(ConfigFormatError::EmptyPropertyName {
                index,
                token: token.to_string(),
            });
        }
        definition.add_property(name, value);
    }

    Ok(definition)
}

/// Split on `separator`, dropping trailing empty pieces
fn split_entries(text: &str, separator: char) -> Vec<&str> {
    let text = text.trim_end_matches(separator);
    if text.is_empty() {
        return Vec::new();
    }
    text.split(separator).collect()
}
