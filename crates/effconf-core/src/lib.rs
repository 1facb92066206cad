//! Layered effective-configuration resolution for effconf
//!
//! This crate turns a set of ordered property sources into the single
//! key/value mapping a build actually sees, implementing:
//!
//! - **Property sources**: named maps with an integer ordinal; higher wins
//! - **Collectors**: prefix-filtered views of loose property maps, system
//!   properties and environment variables
//! - **Profile resolution**: system property, environment, build and project
//!   properties, then the launch mode default
//! - **Layered merge**: a base pass followed by one `%profile.` pass per
//!   active profile
//! - **ConfigResolver**: all tiers of a project assembled and merged
//!
//! # Architecture
//!
//! ```text
//!                  effconf-cli
//!                       |
//!                 effconf-core
//!                       |
//!                  effconf-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use effconf_core::{ConfigResolver, Snapshot};
//!
//! let config = ConfigResolver::new("/path/to/project")
//!     .snapshot(Snapshot::capture())
//!     .resolve()?;
//! println!("{} -> {:?}", config.profile(), config.get("quarkus.package.type"));
//! ```

pub mod collect;
pub mod effective;
pub mod error;
pub mod expand;
pub mod merge;
pub mod prefix;
pub mod profile;
pub mod resolver;
pub mod snapshot;
pub mod source;

pub use effective::EffectiveConfig;
pub use error::{Error, Result};
pub use merge::{Origin, merge};
pub use prefix::KeyPrefix;
pub use profile::{LaunchMode, ProfileOrigin, ProfileResolver, ResolvedProfile};
pub use resolver::ConfigResolver;
pub use snapshot::Snapshot;
pub use source::{PropertySource, SourceInfo, ordinal};

pub use effconf_fs::PropertyMap;
