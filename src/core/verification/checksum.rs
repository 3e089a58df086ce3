//! Checksums of bundle documents
//!
//! Bundle files are hashed byte for byte, so a manifest checksum only
//! matches the exact file the sink wrote.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of raw bytes
///
/// # Arguments
///
/// * `data` - The raw bytes to calculate checksum for
///
/// # Returns
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use catex::core::verification::checksum::calculate_checksum_bytes;
///
/// let checksum = calculate_checksum_bytes(b"[]");
/// assert_eq!(checksum.len(), 64); // SHA-256 produces 64 hex characters
/// ```
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_checksum_bytes() {
        let data = b"Hello, World!";
        let checksum = calculate_checksum_bytes(data);

        // Verify it's a valid hex string of correct length
        assert_eq!(checksum.len(), 64);
        assert!(checksum.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_calculate_checksum_bytes_deterministic() {
        let data = br#"[{"guid":"P1"}]"#;
        let checksum1 = calculate_checksum_bytes(data);
        let checksum2 = calculate_checksum_bytes(data);

        assert_eq!(checksum1, checksum2);
    }

    #[test]
    fn test_calculate_checksum_bytes_known_value() {
        assert_eq!(
            calculate_checksum_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_whitespace_changes_checksum() {
        assert_ne!(
            calculate_checksum_bytes(br#"[{"guid":"P1"}]"#),
            calculate_checksum_bytes(br#"[ {"guid":"P1"} ]"#)
        );
    }
}
