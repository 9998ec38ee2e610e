//! Content fingerprints used for staleness checks

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Hex characters kept from the SHA-256 digest
pub const FINGERPRINT_LEN: usize = 12;

pub fn fingerprint_bytes(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let mut hex = hex::encode(digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

pub fn fingerprint_file<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let content = std::fs::read(file_path)?;
    Ok(fingerprint_bytes(&content))
}
