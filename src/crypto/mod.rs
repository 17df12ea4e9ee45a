//! Crypto module: AES-256-CBC with PKCS#7 padding, plus the key schedules in [`kdf`].
//!
//! This is the cipher used by `openssl enc -aes-256-cbc`. There is no
//! authentication tag: a wrong key is detected only through invalid padding,
//! and a corrupted ciphertext can still decrypt to well-padded garbage
//! (roughly 1 in 256). Callers that need integrity must add it outside this
//! format.

pub mod kdf;

pub use kdf::{KeyMaterial, Strategy};

use aes::Aes256;
use cbc::cipher::{
    block_padding::Pkcs7, generic_array::GenericArray, BlockDecryptMut, BlockEncryptMut,
    KeyIvInit,
};
use zeroize::Zeroizing;

use crate::error::SealError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = 16;

/// AES block size; ciphertexts are always a positive multiple of this.
pub const BLOCK_LEN: usize = 16;

/// Pad `plaintext` with PKCS#7 and encrypt it with AES-256-CBC.
///
/// Output length is always `(plaintext.len() / 16 + 1) * 16`: an input that is
/// already block-aligned gains a full block of padding.
pub fn encrypt_cbc(material: &KeyMaterial, plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(
        GenericArray::from_slice(material.key()),
        GenericArray::from_slice(material.iv()),
    )
    .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt AES-256-CBC and strip PKCS#7 padding.
///
/// Returns `SealError::Cipher` when the ciphertext is empty or not block-aligned,
/// and `SealError::Padding` when the final block does not end in `p` copies of
/// `p` with `p` in `1..=16`. The second case is what a wrong key looks like.
pub fn decrypt_cbc(
    material: &KeyMaterial,
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>, SealError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(SealError::Cipher(ciphertext.len()));
    }

    // Decrypt in place inside a zeroizing buffer so rejected candidates leave nothing behind
    let mut buf = Zeroizing::new(ciphertext.to_vec());
    let unpadded_len = Aes256CbcDec::new(
        GenericArray::from_slice(material.key()),
        GenericArray::from_slice(material.iv()),
    )
    .decrypt_padded_mut::<Pkcs7>(buf.as_mut_slice())
    .map_err(|_| SealError::Padding)?
    .len();

    buf.truncate(unpadded_len);
    Ok(buf)
}
