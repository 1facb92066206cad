//! Single property lookup

use effconf_core::ConfigResolver;

use crate::error::{CliError, Result};

/// Print the effective value of `key`, or fail when it is not set.
pub fn run_get(resolver: &ConfigResolver, key: &str, expand: bool) -> Result<()> {
    let config = resolver.resolve()?;

    let value = if expand {
        config.get_expanded(key)?
    } else {
        config.get(key).map(str::to_string)
    };

    match value {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(CliError::user(format!(
            "Property '{key}' is not set for profile '{}'",
            config.profile()
        ))),
    }
}
