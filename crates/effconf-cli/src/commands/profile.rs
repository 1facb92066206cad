//! Active profile display

use effconf_core::ConfigResolver;

use crate::error::Result;

/// Print the active profile; with `json`, also where it came from.
pub fn run_profile(resolver: &ConfigResolver, json: bool) -> Result<()> {
    let resolved = resolver.resolve_profile()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        println!("{}", resolved.profile);
    }
    Ok(())
}
