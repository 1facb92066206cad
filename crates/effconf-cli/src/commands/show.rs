//! Effective configuration display

use std::path::PathBuf;

use colored::Colorize;
use effconf_core::{ConfigResolver, EffectiveConfig, PropertyMap};
use effconf_fs::ConfigStore;
use serde_json::json;

use crate::error::Result;

/// Options of the `show` command
#[derive(Debug, Default, Clone)]
pub struct ShowOptions {
    pub json: bool,
    pub origins: bool,
    pub prefix: Option<String>,
    pub expand: bool,
    pub save: Option<PathBuf>,
}

/// Print, or save, the effective configuration.
pub fn run_show(resolver: &ConfigResolver, options: &ShowOptions) -> Result<()> {
    let config = resolver.resolve()?;
    let values = selected_values(&config, options)?;

    if let Some(path) = &options.save {
        let header = format!("Effective configuration for profile {}", config.profile());
        ConfigStore::new().save_properties(path, &values, Some(&header))?;
        println!(
            "{} Saved {} properties to {}",
            "OK".green().bold(),
            values.len(),
            path.display()
        );
        return Ok(());
    }

    if options.json {
        let mut output = json!({
            "profile": config.profile(),
            "profiles": config.profiles(),
            "fingerprint": config.fingerprint(),
            "values": values,
        });
        if options.origins {
            let mut origins = serde_json::Map::new();
            for key in values.keys() {
                if let Some(origin) = config.origin(key) {
                    origins.insert(key.clone(), serde_json::to_value(origin)?);
                }
            }
            output["origins"] = serde_json::Value::Object(origins);
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Effective Configuration".bold());
    println!();
    println!("  {:<10} {}", "Profile:".dimmed(), config.profile());
    if config.profiles().len() > 1 {
        println!("  {:<10} {}", "Applied:".dimmed(), config.profiles().join(", "));
    }
    println!();

    if values.is_empty() {
        println!("  {}", "(no properties)".dimmed());
        return Ok(());
    }

    for (key, value) in &values {
        if options.origins {
            let origin = match config.origin(key) {
                Some(origin) => match &origin.profile {
                    Some(profile) => {
                        format!("{} ({}, %{})", origin.source, origin.ordinal, profile)
                    }
                    None => format!("{} ({})", origin.source, origin.ordinal),
                },
                None => String::new(),
            };
            println!("  {} = {}  {}", key.cyan(), value, origin.dimmed());
        } else {
            println!("  {} = {}", key.cyan(), value);
        }
    }
    Ok(())
}

fn selected_values(config: &EffectiveConfig, options: &ShowOptions) -> Result<PropertyMap> {
    Ok(match (&options.prefix, options.expand) {
        (Some(prefix), false) => config.with_prefix(prefix),
        (Some(prefix), true) => config
            .expanded()?
            .into_iter()
            .filter(|(key, _)| key.starts_with(prefix.as_str()))
            .collect(),
        (None, true) => config.expanded()?,
        (None, false) => config.values().clone(),
    })
}
