pub mod decrypt;
pub mod encrypt;

use std::io::{self, IsTerminal};
use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::KeyArgs;
use promptseal::SealError;

/// Local dotenv file read at startup.
pub const ENV_FILE: &str = ".env.local";

/// Merge `path` into the process environment. Variables that are already set
/// keep their values, and a missing file is not an error.
pub fn load_env_file(path: &Path) {
    if dotenv::from_path(path).is_ok() {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }
}

/// Resolve the passphrase: `--key` or `ENCRYPTION_KEY` (clap has already merged
/// `.env.local` into the environment), otherwise a hidden prompt on a terminal.
pub fn resolve_passphrase(args: KeyArgs) -> anyhow::Result<Zeroizing<String>> {
    choose_passphrase(args, io::stdin().is_terminal(), || {
        dialoguer::Password::new()
            .with_prompt("Encryption key")
            .interact()
            .map_err(|e| anyhow::anyhow!("Passphrase prompt failed: {}", e))
    })
}

/// An empty flag or variable counts as unset. The prompt runs only when
/// `interactive` is true.
fn choose_passphrase<F>(
    mut args: KeyArgs,
    interactive: bool,
    prompt: F,
) -> anyhow::Result<Zeroizing<String>>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    if let Some(key) = args.key.take().map(Zeroizing::new) {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    if !interactive {
        return Err(SealError::MissingPassphrase.into());
    }

    let entered = Zeroizing::new(prompt()?);
    if entered.is_empty() {
        return Err(SealError::MissingPassphrase.into());
    }
    Ok(entered)
}
