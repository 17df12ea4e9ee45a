use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SealError {
    #[error("Malformed artifact: {0}")]
    Format(String),

    #[error("Invalid ciphertext length {0}: must be a positive multiple of 16")]
    Cipher(usize),

    #[error("Invalid PKCS#7 padding")]
    Padding,

    #[error("Passphrase unusable for key derivation: {0}")]
    Derivation(String),

    #[error("All decryption strategies failed. Check the passphrase.")]
    DecryptionExhausted,

    #[error("Passphrase must not be empty")]
    EmptyPassphrase,

    #[error("No passphrase found. Set ENCRYPTION_KEY or pass --key.")]
    MissingPassphrase,

    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to write artifact atomically")]
    AtomicWriteFailed(#[source] std::io::Error),
}
