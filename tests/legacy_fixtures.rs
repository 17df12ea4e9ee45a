/// Integration tests against artifacts produced by `openssl enc`.
///
/// Fixtures:
///   - LEGACY_MD5: `openssl enc -aes-256-cbc -md md5` (EVP_BytesToKey, MD5 chain)
///   - LEGACY_RAW_HEX: raw-hex key with the MD5-chain IV
///   - MODERN_PBKDF2: `openssl enc -aes-256-cbc -pbkdf2 -iter 10000 -md sha256`
///   - HELLO: the one-block "hello" artifact
///
/// All use salts fixed at creation time, so every expectation here is deterministic.
use promptseal::envelope::Envelope;
use promptseal::{decrypt, decrypt_detailed, SealError, Strategy};

const UUID_KEY: &str = "3f2a9c4e-8b1d-4e7a-9c55-0d6e2f41a8b7";
const UUID_KEY_WRONG: &str = "3f2a9c4e-8b1d-4e7a-9c55-0d6e2f41a8b8";
const PROMPT: &str = "You are a friendly interviewer. Ask one question at a time.";

const LEGACY_MD5: &str = "U2FsdGVkX18BAgMEBQYHCFFt7yJrb8J6piJwGamGlHK6i4Bv/Gls/c6xnVRD+uZnDboK8Lhlm8H/DWPYeto2pN8JmXi6DHb772QafcBUSfo=";
const LEGACY_RAW_HEX: &str = "U2FsdGVkX18BAgMEBQYHCLgkJvFQGglZjqmN3URsjrM=";
const MODERN_PBKDF2: &str = "U2FsdGVkX1+hssPU5fYHGAdWBZ3wSeX2r8mqi8ghgguvN/yMkYLbACLyXuDlZqEMtCTFC/PHj13dz0uxN++oWajjhOhRQ5BFzacDQAG77co=";

const HELLO_KEY: &str = "test-key-0123456789abcdef0123456789abcdef01234567";
const HELLO: &str = "U2FsdGVkX18AESIzRFVmd4tJar2aM2W0Mpt8pj9jJz8=";

#[test]
fn test_legacy_md5_fixture_recovers_via_legacy_strategy() {
    let recovered = decrypt_detailed(UUID_KEY, LEGACY_MD5).expect("legacy artifact must decrypt");
    assert_eq!(recovered.plaintext, PROMPT);
    assert_eq!(recovered.strategy, Strategy::LegacyHexKey);
}

#[test]
fn test_legacy_raw_hex_fixture_recovers() {
    let recovered =
        decrypt_detailed(UUID_KEY, LEGACY_RAW_HEX).expect("raw-hex artifact must decrypt");
    assert_eq!(recovered.plaintext, "raw hex keyed");
    assert_eq!(recovered.strategy, Strategy::LegacyHexKey);
}

#[test]
fn test_modern_fixture_falls_back_to_pbkdf2() {
    // Same hex passphrase: both legacy candidates run and are rejected first
    let recovered = decrypt_detailed(UUID_KEY, MODERN_PBKDF2).expect("modern artifact must decrypt");
    assert_eq!(recovered.plaintext, PROMPT);
    assert_eq!(recovered.strategy, Strategy::Pbkdf2Sha256);
}

#[test]
fn test_hello_fixture() {
    assert_eq!(decrypt(HELLO_KEY, HELLO).expect("hello artifact must decrypt"), "hello");
}

#[test]
fn test_fixtures_with_wrong_passphrase_are_exhausted() {
    for fixture in [LEGACY_MD5, LEGACY_RAW_HEX, MODERN_PBKDF2] {
        let result = decrypt(UUID_KEY_WRONG, fixture);
        assert!(
            matches!(result, Err(SealError::DecryptionExhausted)),
            "expected DecryptionExhausted, got: {:?}",
            result
        );
    }
}

#[test]
fn test_legacy_fixture_needs_hex_passphrase() {
    // A non-hex passphrase never reaches the MD5 chain
    let result = decrypt("not-a-hex-key", LEGACY_MD5);
    assert!(matches!(result, Err(SealError::DecryptionExhausted)));
}

#[test]
fn test_fixture_with_trailing_newline() {
    let on_disk = format!("{}\n", LEGACY_MD5);
    assert_eq!(decrypt(UUID_KEY, &on_disk).expect("newline must be trimmed"), PROMPT);
}

#[test]
fn test_truncated_legacy_fixture_is_cipher_error() {
    let mut envelope = Envelope::decode(LEGACY_MD5).expect("fixture decodes");
    let len = envelope.ciphertext.len() - 5;
    envelope.ciphertext.truncate(len);
    let result = decrypt(UUID_KEY, &envelope.encode());
    assert!(
        matches!(result, Err(SealError::Cipher(n)) if n == len),
        "got: {:?}",
        result
    );
}

#[test]
fn test_fixture_salts() {
    assert_eq!(
        Envelope::decode(LEGACY_MD5).expect("decodes").salt,
        [1, 2, 3, 4, 5, 6, 7, 8]
    );
    assert_eq!(
        Envelope::decode(MODERN_PBKDF2).expect("decodes").salt,
        [0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6, 0x07, 0x18]
    );
}
