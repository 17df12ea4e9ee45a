/// Encrypt command: reads a plaintext prompt, seals it with PBKDF2-SHA256 +
/// AES-256-CBC and writes the artifact atomically.
use anyhow::Context;
use owo_colors::{OwoColorize, Stream::Stdout};
use tracing::info;

use crate::cli::EncryptArgs;
use promptseal::{seal, store, util::artifact_fingerprint};

pub fn run_encrypt(args: EncryptArgs) -> anyhow::Result<()> {
    let passphrase = super::resolve_passphrase(args.key)?;

    if args.input == args.output {
        anyhow::bail!(
            "Refusing to overwrite the plaintext input {} with its own artifact",
            args.input.display()
        );
    }

    let plaintext = store::read_plaintext(&args.input)?;
    let artifact = seal::encrypt(&passphrase, &plaintext)?;
    store::write_artifact_atomic(&args.output, &artifact)
        .with_context(|| format!("Failed to write artifact to {}", args.output.display()))?;

    let fingerprint = artifact_fingerprint(&artifact);
    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        bytes = plaintext.len(),
        %fingerprint,
        "Prompt encrypted"
    );

    println!(
        "{} Encrypted '{}' to '{}'",
        "✓".if_supports_color(Stdout, |t| t.green()),
        args.input.display(),
        args.output.display()
    );
    println!(
        "Fingerprint: {}",
        fingerprint.if_supports_color(Stdout, |t| t.cyan())
    );

    Ok(())
}
