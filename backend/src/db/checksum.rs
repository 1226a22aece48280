//! Checksum calculation for schedule change detection.

use sha2::{Digest, Sha256};

use super::repository::{RepositoryError, RepositoryResult};
use crate::models::Schedule;

/// Calculate SHA-256 checksum of string content.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Checksum of a schedule's compact JSON encoding.
///
/// Field order follows the struct definitions, so equal schedules always hash
/// the same regardless of how their source JSON was laid out.
pub fn schedule_checksum(schedule: &Schedule) -> RepositoryResult<String> {
    let content = serde_json::to_string(schedule)
        .map_err(|err| RepositoryError::from(err).with_operation("schedule_checksum"))?;
    Ok(calculate_checksum(&content))
}
