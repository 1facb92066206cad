//! SHA-256 checksums in the canonical `sha256:<hex>` form

use sha2::{Digest, Sha256};

use crate::PropertyMap;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the checksum of a flat map together with a context string.
///
/// Entries are hashed in key order as length-prefixed key and value bytes, so
/// `a=b` + `c` and `a` + `b=c` never collide.
pub fn compute_map_checksum(context: &str, map: &PropertyMap) -> String {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, context);
    for (key, value) in map {
        update_field(&mut hasher, key);
        update_field(&mut hasher, value);
    }
    format!("{}{:x}", PREFIX, hasher.finalize())
}

fn update_field(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}
