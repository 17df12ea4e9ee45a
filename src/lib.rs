/// promptseal library crate: OpenSSL-compatible sealing of agent instruction text.
///
/// Modules are public so that the binary and `tests/` integration tests share one
/// implementation via `use promptseal::seal::*` and friends. Nothing in the
/// library reads environment variables; passphrases are always passed in.
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod seal;
pub mod store;
pub mod util;

pub use crypto::Strategy;
pub use error::SealError;
pub use seal::{decrypt, decrypt_detailed, encrypt, Recovered};
