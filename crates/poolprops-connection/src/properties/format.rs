//! Line-oriented properties-file reader

use std::str::Chars;

use poolprops_core::{ConfigFormatError, PropertyMap};

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Read every `key=value` line of `text` into `target`
pub(super) fn load(text: &str, target: &mut PropertyMap) -> Result<(), ConfigFormatError> {
    let text = text.replace("\r\n", "\n");
    let mut lines = text.split(['\n', '\r']).enumerate();

    while let Some((number, natural)) = lines.next() {
        let line = natural.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = line.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let line_number = number + 1;
        let (key, value) = split_key_value(&logical);
        target.insert(unescape(key, line_number)?, unescape(value, line_number)?);
    }

    Ok(())
}

/// An odd number of trailing backslashes joins the next line
fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut has_separator = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    // Separator characters are all single-byte
    let mut rest = line.get(key_end + 1..).unwrap_or("").trim_start_matches(is_blank);
    if !has_separator {
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped.trim_start_matches(is_blank);
        }
    }
    (key, rest)
}

fn unescape(text: &str, line: usize) -> Result<String, ConfigFormatError> {
    if !text.contains('\\') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => out.push(unicode_escape(&mut chars, line)?),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn malformed(line: usize, reason: &str) -> ConfigFormatError {
    ConfigFormatError::MalformedPropertyText {
        line,
        reason: reason.to_string(),
    }
}

fn read_code_unit(chars: &mut Chars<'_>, line: usize) -> Result<u32, ConfigFormatError> {
    let mut value = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| malformed(line, "malformed \\uxxxx encoding"))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// Decode the hex digits after `\u`, pairing UTF-16 surrogates
fn unicode_escape(chars: &mut Chars<'_>, line: usize) -> Result<char, ConfigFormatError> {
    let unit = read_code_unit(chars, line)?;
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(unit).ok_or_else(|| malformed(line, "unpaired surrogate"));
    }

    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(malformed(line, "unpaired surrogate"));
    }
    let low = read_code_unit(chars, line)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Err(malformed(line, "unpaired surrogate"));
    }
    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code).ok_or_else(|| malformed(line, "unpaired surrogate"))
}
