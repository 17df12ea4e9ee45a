//! Artifact and plaintext file I/O, plus the startup loader for agent instructions.

use anyhow::Context;
use std::path::Path;
use tracing::info;

use crate::error::SealError;
use crate::seal;
use crate::util::artifact_fingerprint;

/// Plaintext instructions read by `promptseal encrypt` when no path is given.
pub const DEFAULT_PLAINTEXT_PATH: &str = "system_prompt.txt";

/// Artifact written by `encrypt` and read by `decrypt` when no path is given.
pub const DEFAULT_ARTIFACT_PATH: &str = "system_prompt_encrypted.txt";

/// Read a UTF-8 plaintext file to encrypt.
pub fn read_plaintext(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        return Err(SealError::InputNotFound(path.to_path_buf()).into());
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plaintext from {}", path.display()))
}

/// Read artifact text, trimmed of surrounding whitespace.
pub fn read_artifact(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        return Err(SealError::InputNotFound(path.to_path_buf()).into());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact from {}", path.display()))?;
    Ok(content.trim().to_string())
}

/// Write `contents` atomically (temp file then rename) and set 0600 permissions.
///
/// The temp file lives in the destination directory so the rename never crosses
/// filesystems. Used for artifacts and for decrypted output alike.
pub fn write_artifact_atomic(dest: &Path, contents: &str) -> anyhow::Result<()> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = dest
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Destination {} has no file name", dest.display()))?;

    let tmp = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&tmp, contents).map_err(SealError::AtomicWriteFailed)?;

    if let Err(e) = std::fs::rename(&tmp, dest) {
        // Attempt cleanup of temp file on rename failure
        let _ = std::fs::remove_file(&tmp);
        return Err(SealError::AtomicWriteFailed(e).into());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(dest, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to set 0600 permissions on {}", dest.display()))?;
    }

    Ok(())
}

/// Load and decrypt agent instructions once at startup.
///
/// Any failure is returned to the caller, which must abort startup rather than
/// run the agent with empty or default instructions.
pub fn load_instructions(path: &Path, passphrase: &str) -> anyhow::Result<String> {
    let artifact = read_artifact(path)?;
    let recovered = seal::decrypt_detailed(passphrase, &artifact)
        .with_context(|| format!("Failed to decrypt instructions from {}", path.display()))?;

    info!(
        path = %path.display(),
        fingerprint = %artifact_fingerprint(&artifact),
        strategy = %recovered.strategy,
        "Instructions decrypted"
    );

    Ok(recovered.plaintext)
}
