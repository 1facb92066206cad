//! Java-style `.properties` reading and writing
//!
//! Follows the `java.util.Properties` line format: `#`/`!` comments, `=`, `:`
//! or whitespace as the key/value separator, backslash line continuations and
//! the usual escapes including `\uXXXX`. Files are read as UTF-8.

use crate::{ParseError, PropertyMap};

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse `.properties` content into a flat map.
///
/// A key repeated later in the content replaces the earlier value.
///
/// # Errors
///
/// Returns a [`ParseError`] for a malformed `\uXXXX` escape.
pub fn parse(content: &str) -> Result<PropertyMap, ParseError> {
    let mut map = PropertyMap::new();
    let mut logical = String::new();
    let mut start_line = 0;
    let mut continuing = false;

    for (idx, raw) in split_lines(content).enumerate() {
        let line = raw.trim_start_matches(WHITESPACE);
        if !continuing {
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            logical.clear();
            start_line = idx + 1;
        }

        let (body, continues) = split_continuation(line);
        logical.push_str(body);
        continuing = continues;

        if !continuing {
            let (key, value) = parse_entry(&logical, start_line)?;
            map.insert(key, value);
        }
    }

    // A continuation on the last line simply ends the entry.
    if continuing {
        let (key, value) = parse_entry(&logical, start_line)?;
        map.insert(key, value);
    }

    Ok(map)
}

/// Render a map as `.properties` content, one `key=value` line per entry in
/// key order, preceded by an optional `#` comment header.
///
/// The output parses back to the same map.
pub fn to_string(map: &PropertyMap, header: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(header) = header {
        for line in header.lines() {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
    }
    for (key, value) in map {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, value, false);
        out.push('\n');
    }
    out
}

/// Split on `\n`, `\r\n` or a lone `\r`.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let line = match rest.find(['\n', '\r']) {
            Some(idx) => {
                let line = &rest[..idx];
                let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + terminator..];
                line
            }
            None => std::mem::take(&mut rest),
        };
        Some(line)
    })
}

/// Strip a trailing continuation backslash. Only an odd run of trailing
/// backslashes continues the line; an even run is escaped backslashes.
fn split_continuation(line: &str) -> (&str, bool) {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    if trailing % 2 == 1 {
        (&line[..line.len() - 1], true)
    } else {
        (line, false)
    }
}

fn parse_entry(line: &str, line_no: usize) -> Result<(String, String), ParseError> {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                value_start = i + 1;
                break;
            }
            c if WHITESPACE.contains(&c) => {
                key_end = i;
                let rest = line[i..].trim_start_matches(WHITESPACE);
                value_start = line.len() - rest.len();
                if rest.starts_with(['=', ':']) {
                    value_start += 1;
                }
                break;
            }
            _ => {}
        }
    }

    let key = unescape(&line[..key_end], line_no)?;
    let value = unescape(line[value_start..].trim_start_matches(WHITESPACE), line_no)?;
    Ok((key, value))
}

fn unescape(raw: &str, line: usize) -> Result<String, ParseError> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(read_unicode(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Decode the four hex digits after `\u`, joining UTF-16 surrogate pairs
/// written as two consecutive escapes.
fn read_unicode(chars: &mut std::str::Chars<'_>, line: usize) -> Result<char, ParseError> {
    let unit = read_code_unit(chars, line)?;

    if (0xD800..0xDC00).contains(&unit) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            let low = read_code_unit(&mut lookahead, line)?;
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(combined)
                    .ok_or_else(|| ParseError::new(line, "invalid surrogate pair"));
            }
        }
        return Err(ParseError::new(
            line,
            format!("unpaired surrogate \\u{unit:04X}"),
        ));
    }

    char::from_u32(unit)
        .ok_or_else(|| ParseError::new(line, format!("invalid code point \\u{unit:04X}")))
}

fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32, ParseError> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.chars().count() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseError::new(
            line,
            format!("malformed \\uxxxx encoding: \\u{digits}"),
        ));
    }
    u32::from_str_radix(&digits, 16)
        .map_err(|e| ParseError::new(line, format!("malformed \\uxxxx encoding: {e}")))
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
}
