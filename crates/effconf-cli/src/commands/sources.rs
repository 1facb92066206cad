//! Property source listing

use colored::Colorize;
use effconf_core::{ConfigResolver, SourceInfo};

use crate::error::Result;

/// List the sources that take part in the merge, highest ordinal first.
pub fn run_sources(resolver: &ConfigResolver, json: bool) -> Result<()> {
    let mut sources: Vec<SourceInfo> = resolver.sources()?.iter().map(|s| s.info()).collect();
    // Stable, so equal ordinals keep declaration order.
    sources.sort_by_key(|s| std::cmp::Reverse(s.ordinal));

    if json {
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(());
    }

    if sources.is_empty() {
        println!("{}", "(no property sources)".dimmed());
        return Ok(());
    }

    println!("{}", "Property Sources".bold());
    println!();
    println!("  {:>7}  {:>7}  {}", "ORDINAL".dimmed(), "ENTRIES".dimmed(), "NAME".dimmed());
    for source in &sources {
        println!(
            "  {:>7}  {:>7}  {}",
            source.ordinal.to_string().cyan(),
            source.entries,
            source.name
        );
    }
    Ok(())
}
