//! `.env` file parsing
//!
//! Entries keep their environment-variable names; turning `QUARKUS_HTTP_PORT`
//! into a property key is the caller's job.

use crate::{ParseError, PropertyMap};

/// Parse `.env` content.
///
/// Supports `#` comment lines, an optional `export ` prefix, single- or
/// double-quoted values, and trailing ` #` comments. Inside double quotes
/// `\n`, `\"` and `\\` are unescaped.
///
/// # Errors
///
/// Returns a [`ParseError`] for a non-comment line without `=`, an empty
/// name, an unterminated quoted value, or text after a closing quote.
pub fn parse(content: &str) -> Result<PropertyMap, ParseError> {
    let mut map = PropertyMap::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((name, value)) = line.split_once('=') else {
            return Err(ParseError::new(line_no, format!("expected NAME=value, found `{line}`")));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::new(line_no, "empty variable name"));
        }

        map.insert(name.to_string(), parse_value(value.trim(), line_no)?);
    }

    Ok(map)
}

fn parse_value(value: &str, line: usize) -> Result<String, ParseError> {
    let mut chars = value.chars();
    let quote = match chars.next() {
        Some(quote @ ('"' | '\'')) => quote,
        _ => {
            let unquoted = match value.find(" #") {
                Some(idx) => &value[..idx],
                None => value,
            };
            return Ok(unquoted.trim_end().to_string());
        }
    };

    let mut out = String::new();
    let mut closed = false;
    while let Some(c) = chars.next() {
        match c {
            c if c == quote => {
                closed = true;
                break;
            }
            '\\' if quote == '"' => match chars.next() {
                Some('n') => out.push('\n'),
                Some(escaped @ ('"' | '\\')) => out.push(escaped),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => break,
            },
            c => out.push(c),
        }
    }
    if !closed {
        return Err(ParseError::new(line, "unterminated quoted value"));
    }

    let trailing = chars.as_str().trim_start();
    if !trailing.is_empty() && !trailing.starts_with('#') {
        return Err(ParseError::new(
            line,
            format!("unexpected `{trailing}` after quoted value"),
        ));
    }
    Ok(out)
}
