//! Shared utility functions.

use sha2::{Digest, Sha256};

/// Short, log-safe identifier for an artifact: the first 8 hex characters of
/// SHA-256 over the trimmed artifact text.
///
/// Lets operators tell which artifact a process loaded without printing it.
pub fn artifact_fingerprint(artifact: &str) -> String {
    let digest = Sha256::digest(artifact.trim().as_bytes());
    hex::encode(&digest[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_length() {
        let fp = artifact_fingerprint("U2FsdGVkX18AESIzRFVmd4tJar2aM2W0Mpt8pj9jJz8=");
        assert_eq!(fp.len(), 8);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_ignores_surrounding_whitespace() {
        assert_eq!(artifact_fingerprint("abc\n"), artifact_fingerprint("  abc"));
    }

    #[test]
    fn test_fingerprint_known_value() {
        // sha256("abc") = ba7816bf...
        assert_eq!(artifact_fingerprint("abc"), "ba7816bf");
    }

    #[test]
    fn test_fingerprint_distinguishes_artifacts() {
        assert_ne!(artifact_fingerprint("first"), artifact_fingerprint("second"));
    }
}
