//! Config file formats and safe I/O for effconf
//!
//! Turns the file-based configuration sources of a project (`.properties`,
//! YAML and `.env` files) into flat string maps, and writes flat maps back out.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod dotenv;
pub mod error;
pub mod format;
pub mod io;
pub mod properties;
pub mod yaml;

pub use config::ConfigStore;
pub use constants::ConfigFile;
pub use error::{Error, ParseError, Result};
pub use format::Format;

/// A flat, key-sorted property map as produced by every format loader.
pub type PropertyMap = std::collections::BTreeMap<String, String>;
