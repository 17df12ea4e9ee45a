//! Key schedules: passphrase + envelope salt -> AES-256 key and CBC IV.
//!
//! Two schedules exist because artifacts written over the tool's lifetime
//! used different derivations and the envelope carries no identifier:
//!
//! - `LegacyHexKey`: the passphrase must read as hex once dashes are removed
//!   (UUID-style keys). Produces a raw-hex key paired with the MD5-chain IV,
//!   then the full OpenSSL `EVP_BytesToKey` MD5 chain.
//! - `Pbkdf2Sha256`: PBKDF2-HMAC-SHA256, 10,000 iterations, 48 bytes of output.
//!   The only schedule used for new artifacts.

use std::fmt;

use md5::digest::generic_array::GenericArray;
use md5::{Digest, Md5};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{IV_LEN, KEY_LEN};
use crate::envelope::SALT_LEN;
use crate::error::SealError;

/// Iteration count shared with `openssl enc -pbkdf2 -iter 10000 -md sha256`.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Hex digits consumed by the raw-hex interpretation (two per key byte).
const LEGACY_HEX_DIGITS: usize = KEY_LEN * 2;

const OKM_LEN: usize = KEY_LEN + IV_LEN;

/// AES-256 key and CBC IV for a single cipher operation. Zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl KeyMaterial {
    pub fn new(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> Self {
        Self { key: *key, iv: *iv }
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    /// Split 48 bytes of key-derivation output into key (first 32) and IV (next 16).
    fn split(okm: &[u8; OKM_LEN]) -> Self {
        let mut material = Self {
            key: [0u8; KEY_LEN],
            iv: [0u8; IV_LEN],
        };
        material.key.copy_from_slice(&okm[..KEY_LEN]);
        material.iv.copy_from_slice(&okm[KEY_LEN..]);
        material
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial { .. }")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    LegacyHexKey,
    Pbkdf2Sha256,
}

impl Strategy {
    /// Order in which decryption tries the schedules.
    pub const FALLBACK_ORDER: [Strategy; 2] = [Strategy::LegacyHexKey, Strategy::Pbkdf2Sha256];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::LegacyHexKey => "legacy-hex-md5",
            Strategy::Pbkdf2Sha256 => "pbkdf2-sha256",
        }
    }

    /// Primary key material for this schedule.
    ///
    /// For `LegacyHexKey` this is the MD5 chain, and only after the passphrase
    /// passes the hex check. This is what legacy tooling wrote with.
    pub fn derive(self, passphrase: &str, salt: &[u8; SALT_LEN]) -> Result<KeyMaterial, SealError> {
        match self {
            Strategy::LegacyHexKey => {
                legacy_hex_key(passphrase)?;
                Ok(md5_chain(passphrase.as_bytes(), salt))
            }
            Strategy::Pbkdf2Sha256 => Ok(pbkdf2_sha256(passphrase, salt)),
        }
    }

    /// Every key/IV pair decryption should try for this schedule, in order.
    ///
    /// `LegacyHexKey` yields the raw-hex key with the MD5-chain IV first, then the
    /// MD5-chain key and IV. Fails with `SealError::Derivation` when the
    /// passphrase has no hex reading, in which case no legacy candidate exists.
    pub fn candidates(
        self,
        passphrase: &str,
        salt: &[u8; SALT_LEN],
    ) -> Result<Vec<KeyMaterial>, SealError> {
        match self {
            Strategy::LegacyHexKey => {
                let raw_key = legacy_hex_key(passphrase)?;
                let chain = md5_chain(passphrase.as_bytes(), salt);
                let raw = KeyMaterial::new(&raw_key, chain.iv());
                Ok(vec![raw, chain])
            }
            Strategy::Pbkdf2Sha256 => Ok(vec![pbkdf2_sha256(passphrase, salt)]),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interpret the passphrase as a raw hex key.
///
/// Dashes are stripped, the first 64 remaining characters are hex-decoded and
/// the result is right-padded with zero bytes to 32 bytes. A UUID therefore
/// gives 16 key bytes followed by 16 zeros.
///
/// Error messages name positions only, never passphrase characters.
pub fn legacy_hex_key(passphrase: &str) -> Result<Zeroizing<[u8; KEY_LEN]>, SealError> {
    let digits: Zeroizing<String> = Zeroizing::new(
        passphrase
            .chars()
            .filter(|c| *c != '-')
            .take(LEGACY_HEX_DIGITS)
            .collect(),
    );

    // Report the first offending character by position before checking length
    if let Some(index) = digits.chars().position(|c| !c.is_ascii_hexdigit()) {
        return Err(SealError::Derivation(format!(
            "non-hex character at position {}",
            index
        )));
    }

    let decoded = Zeroizing::new(hex::decode(digits.as_bytes()).map_err(|e| {
        let reason = match e {
            hex::FromHexError::OddLength => "odd number of hex digits".to_string(),
            _ => "invalid hex digits".to_string(),
        };
        SealError::Derivation(reason)
    })?);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key[..decoded.len()].copy_from_slice(&decoded);
    Ok(key)
}

/// OpenSSL `EVP_BytesToKey` with MD5 and a single iteration.
///
/// `D_1 = MD5(passphrase || salt)`, `D_i = MD5(D_{i-1} || passphrase || salt)`,
/// concatenated until 48 bytes exist.
pub fn md5_chain(passphrase: &[u8], salt: &[u8; SALT_LEN]) -> KeyMaterial {
    let mut okm = Zeroizing::new([0u8; OKM_LEN]);
    let mut digest = Zeroizing::new([0u8; 16]);
    let mut filled = 0;

    while filled < OKM_LEN {
        let mut hasher = Md5::new();
        if filled > 0 {
            hasher.update(&*digest);
        }
        hasher.update(passphrase);
        hasher.update(salt);
        hasher.finalize_into(GenericArray::from_mut_slice(&mut digest[..]));

        let take = (OKM_LEN - filled).min(digest.len());
        okm[filled..filled + take].copy_from_slice(&digest[..take]);
        filled += take;
    }

    KeyMaterial::split(&okm)
}

/// PBKDF2-HMAC-SHA256 over the raw UTF-8 passphrase, 48 bytes of output.
pub fn pbkdf2_sha256(passphrase: &str, salt: &[u8; SALT_LEN]) -> KeyMaterial {
    let mut okm = Zeroizing::new([0u8; OKM_LEN]);
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, okm.as_mut());
    KeyMaterial::split(&okm)
}
