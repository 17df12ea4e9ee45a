//! OpenSSL `enc` container: base64 of `b"Salted__" || salt(8) || ciphertext`.
//!
//! ```text
//! Offset  Size  Field
//! 0       8     Magic: b"Salted__"
//! 8       8     Salt (random per encryption, not secret)
//! 16      N     AES-256-CBC ciphertext, N a positive multiple of 16
//! ```
//!
//! The container does not say which key schedule produced it.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::SealError;

/// Magic marker written by `openssl enc` when a salt is used.
pub const MAGIC: &[u8; 8] = b"Salted__";

pub const SALT_LEN: usize = 8;

/// Magic plus salt.
pub const HEADER_LEN: usize = MAGIC.len() + SALT_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: [u8; SALT_LEN],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(salt: [u8; SALT_LEN], ciphertext: Vec<u8>) -> Self {
        Self { salt, ciphertext }
    }

    /// Raw envelope bytes before base64.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        raw.extend_from_slice(MAGIC);
        raw.extend_from_slice(&self.salt);
        raw.extend_from_slice(&self.ciphertext);
        raw
    }

    /// Parse raw envelope bytes.
    ///
    /// Only the header is validated here; ciphertext length is the cipher's concern.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, SealError> {
        if raw.len() < HEADER_LEN {
            return Err(SealError::Format(format!(
                "too short ({} bytes, need at least {})",
                raw.len(),
                HEADER_LEN
            )));
        }

        if &raw[..MAGIC.len()] != MAGIC {
            return Err(SealError::Format("missing Salted__ header".to_string()));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&raw[MAGIC.len()..HEADER_LEN]);

        Ok(Self {
            salt,
            ciphertext: raw[HEADER_LEN..].to_vec(),
        })
    }

    /// Standard padded base64, no line breaks.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Decode artifact text. Surrounding whitespace (a trailing newline from an
    /// editor, say) is ignored.
    pub fn decode(text: &str) -> Result<Self, SealError> {
        let raw = STANDARD
            .decode(text.trim())
            .map_err(|e| SealError::Format(format!("invalid base64: {}", e)))?;
        Self::from_bytes(&raw)
    }
}
