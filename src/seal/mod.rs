//! Encryption and decryption services for sealed instruction artifacts.
//!
//! Encryption always uses PBKDF2-SHA256. Decryption does not know which key
//! schedule wrote an artifact, so it runs an ordered fallback: each
//! [`Strategy`] in [`Strategy::FALLBACK_ORDER`] is attempted and the first
//! candidate that yields valid PKCS#7 padding and valid UTF-8 wins.
//!
//! Every attempt produces a tagged [`Attempt`] value; only a malformed
//! ciphertext (`SealError::Cipher`) aborts the search.

use rand::Rng;
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::crypto::{self, kdf, KeyMaterial, Strategy};
use crate::envelope::{Envelope, SALT_LEN};
use crate::error::SealError;

/// Why a strategy or candidate did not produce plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The passphrase has no reading under this schedule.
    Derivation,
    /// Decryption finished but the padding was invalid (wrong key).
    Padding,
    /// Padding was valid but the plaintext is not UTF-8.
    Utf8,
}

/// Outcome of one decryption attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Attempt {
    Recovered(String),
    Rejected(Rejection),
}

/// Plaintext together with the schedule that unlocked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovered {
    pub plaintext: String,
    pub strategy: Strategy,
}

fn ensure_passphrase(passphrase: &str) -> Result<(), SealError> {
    if passphrase.is_empty() {
        return Err(SealError::EmptyPassphrase);
    }
    Ok(())
}

// ── Encryption ──────────────────────────────────────────────────────────────

/// Encrypt `plaintext` into artifact text under a fresh random salt.
pub fn encrypt(passphrase: &str, plaintext: &str) -> Result<String, SealError> {
    let salt: [u8; SALT_LEN] = rand::thread_rng().gen();
    encrypt_with_salt(passphrase, plaintext, salt)
}

/// Encrypt with a caller-chosen salt.
///
/// Deterministic; the output matches
/// `openssl enc -aes-256-cbc -pbkdf2 -iter 10000 -md sha256 -S <salt> -base64 -A`
/// with the `Salted__` header included.
pub fn encrypt_with_salt(
    passphrase: &str,
    plaintext: &str,
    salt: [u8; SALT_LEN],
) -> Result<String, SealError> {
    ensure_passphrase(passphrase)?;
    let material = kdf::pbkdf2_sha256(passphrase, &salt);
    let ciphertext = crypto::encrypt_cbc(&material, plaintext.as_bytes());
    Ok(Envelope::new(salt, ciphertext).encode())
}

// ── Decryption ──────────────────────────────────────────────────────────────

/// Decrypt artifact text, returning only the plaintext.
pub fn decrypt(passphrase: &str, artifact: &str) -> Result<String, SealError> {
    decrypt_detailed(passphrase, artifact).map(|recovered| recovered.plaintext)
}

/// Decrypt artifact text and report which key schedule succeeded.
///
/// Errors:
/// - `Format` when the text is not a `Salted__` envelope (checked before anything else)
/// - `Cipher` when the ciphertext is not a positive multiple of 16 bytes
/// - `DecryptionExhausted` when no schedule yields padded UTF-8, usually a wrong passphrase
pub fn decrypt_detailed(passphrase: &str, artifact: &str) -> Result<Recovered, SealError> {
    let envelope = Envelope::decode(artifact)?;
    ensure_passphrase(passphrase)?;

    let recovered = resolve(&Strategy::FALLBACK_ORDER, |strategy| {
        attempt_strategy(strategy, passphrase, &envelope)
    })?;

    if recovered.strategy == Strategy::LegacyHexKey {
        warn!("Artifact uses the legacy MD5 key schedule; re-encrypt it to move to PBKDF2");
    }

    Ok(recovered)
}

/// Ordered fallback policy.
///
/// Calls `attempt` for each strategy in `order` and returns the first recovery.
/// An `Err` from `attempt` stops the search immediately and is returned as is.
pub fn resolve<F>(order: &[Strategy], mut attempt: F) -> Result<Recovered, SealError>
where
    F: FnMut(Strategy) -> Result<Attempt, SealError>,
{
    for &strategy in order {
        match attempt(strategy)? {
            Attempt::Recovered(plaintext) => {
                debug!(strategy = %strategy, "Strategy accepted");
                return Ok(Recovered {
                    plaintext,
                    strategy,
                });
            }
            Attempt::Rejected(rejection) => {
                debug!(strategy = %strategy, ?rejection, "Strategy rejected");
            }
        }
    }

    Err(SealError::DecryptionExhausted)
}

/// Try every candidate key of one strategy against the envelope.
///
/// A strategy that cannot derive from this passphrase is a rejection, not an error.
pub fn attempt_strategy(
    strategy: Strategy,
    passphrase: &str,
    envelope: &Envelope,
) -> Result<Attempt, SealError> {
    let candidates = match strategy.candidates(passphrase, &envelope.salt) {
        Ok(candidates) => candidates,
        Err(SealError::Derivation(reason)) => {
            debug!(strategy = %strategy, %reason, "Strategy not applicable to passphrase");
            return Ok(Attempt::Rejected(Rejection::Derivation));
        }
        Err(e) => return Err(e),
    };

    let mut last = Rejection::Padding;
    for (index, material) in candidates.iter().enumerate() {
        match attempt_candidate(material, &envelope.ciphertext)? {
            Attempt::Rejected(rejection) => {
                debug!(strategy = %strategy, candidate = index, ?rejection, "Candidate rejected");
                last = rejection;
            }
            recovered => return Ok(recovered),
        }
    }

    Ok(Attempt::Rejected(last))
}

/// Decrypt with one key/IV pair and classify the outcome.
pub fn attempt_candidate(material: &KeyMaterial, ciphertext: &[u8]) -> Result<Attempt, SealError> {
    match crypto::decrypt_cbc(material, ciphertext) {
        Ok(mut bytes) => match String::from_utf8(std::mem::take(&mut *bytes)) {
            Ok(text) => Ok(Attempt::Recovered(text)),
            Err(e) => {
                let mut garbage = e.into_bytes();
                garbage.zeroize();
                Ok(Attempt::Rejected(Rejection::Utf8))
            }
        },
        Err(SealError::Padding) => Ok(Attempt::Rejected(Rejection::Padding)),
        Err(e) => Err(e),
    }
}
