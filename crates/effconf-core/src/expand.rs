//! `${key}` expansion over a resolved property map
//!
//! Supported forms:
//!
//! - `${key}`: the expanded value of `key`
//! - `${key:default}`: as above, or `default` when `key` is not set
//! - `$${`: a literal `${`
//!
//! Keys and defaults may themselves contain expressions. A default is only
//! expanded when it is used.

use std::collections::BTreeMap;

use effconf_fs::PropertyMap;

use crate::{Error, Result};

/// Expand every value in `values` against the map itself.
pub fn expand_all(values: &PropertyMap) -> Result<PropertyMap> {
    let mut expander = Expander::new(values);
    let mut expanded = PropertyMap::new();
    for key in values.keys() {
        if let Some(value) = expander.expand_key(key)? {
            expanded.insert(key.clone(), value);
        }
    }
    Ok(expanded)
}

/// Expand a single value, resolving references against `values`.
///
/// `property` names the value in error messages.
pub fn expand_value(values: &PropertyMap, property: &str, raw: &str) -> Result<String> {
    let mut expander = Expander::new(values);
    expander.stack.push(property.to_string());
    expander.expand_str(property, raw)
}

struct Expander<'a> {
    values: &'a PropertyMap,
    done: BTreeMap<String, String>,
    /// Keys currently being expanded, outermost first
    stack: Vec<String>,
}

impl<'a> Expander<'a> {
    fn new(values: &'a PropertyMap) -> Self {
        Self {
            values,
            done: BTreeMap::new(),
            stack: Vec::new(),
        }
    }

    fn expand_key(&mut self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.done.get(key) {
            return Ok(Some(value.clone()));
        }
        if let Some(pos) = self.stack.iter().position(|k| k == key) {
            let mut chain = self.stack[pos..].to_vec();
            chain.push(key.to_string());
            return Err(Error::ExpansionCycle {
                chain: chain.join(" -> "),
            });
        }

        let values = self.values;
        let Some(raw) = values.get(key) else {
            return Ok(None);
        };

        self.stack.push(key.to_string());
        let result = self.expand_str(key, raw);
        self.stack.pop();

        let value = result?;
        self.done.insert(key.to_string(), value.clone());
        Ok(Some(value))
    }

    fn expand_str(&mut self, property: &str, input: &str) -> Result<String> {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if let Some(after) = tail.strip_prefix("$${") {
                out.push_str("${");
                rest = after;
            } else if let Some(after) = tail.strip_prefix("${") {
                let end = closing_brace(after).ok_or_else(|| Error::UnterminatedExpression {
                    property: property.to_string(),
                    value: input.to_string(),
                })?;
                let value = self.expand_expression(property, &after[..end])?;
                out.push_str(&value);
                rest = &after[end + 1..];
            } else {
                out.push('$');
                rest = &tail[1..];
            }
        }

        out.push_str(rest);
        Ok(out)
    }

    fn expand_expression(&mut self, property: &str, body: &str) -> Result<String> {
        let (key_part, default) = match top_level_colon(body) {
            Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
            None => (body, None),
        };

        let key = self.expand_str(property, key_part)?;
        if let Some(value) = self.expand_key(&key)? {
            return Ok(value);
        }

        match default {
            Some(default) => self.expand_str(property, default),
            None => Err(Error::UnresolvedReference {
                key,
                property: property.to_string(),
            }),
        }
    }
}

/// Byte offset of the `}` closing an expression whose `${` has already been
/// consumed.
fn closing_brace(s: &str) -> Option<usize> {
    scan_top_level(s, b'}')
}

fn top_level_colon(s: &str) -> Option<usize> {
    scan_top_level(s, b':')
}

fn scan_top_level(s: &str, target: u8) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                depth += 1;
                i += 2;
                continue;
            }
            b'}' if depth > 0 => depth -= 1,
            b if b == target && depth == 0 => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}
