/// Decrypt command: reads an artifact, runs the key-schedule fallback and prints
/// the plaintext to stdout. Status goes to stderr so stdout stays pipeable.
use anyhow::Context;
use owo_colors::{OwoColorize, Stream::Stderr};

use crate::cli::DecryptArgs;
use promptseal::{seal, store, util::artifact_fingerprint, Strategy};

pub fn run_decrypt(args: DecryptArgs) -> anyhow::Result<()> {
    let passphrase = super::resolve_passphrase(args.key)?;

    let artifact = store::read_artifact(&args.input)?;
    let recovered = seal::decrypt_detailed(&passphrase, &artifact)
        .with_context(|| format!("Failed to decrypt {}", args.input.display()))?;

    eprintln!(
        "Decrypted {} ({}) using {}",
        args.input.display(),
        artifact_fingerprint(&artifact),
        recovered.strategy.if_supports_color(Stderr, |t| t.cyan())
    );
    if recovered.strategy == Strategy::LegacyHexKey {
        eprintln!(
            "{} legacy key schedule; run `promptseal encrypt` on the plaintext to upgrade",
            "Note:".if_supports_color(Stderr, |t| t.yellow())
        );
    }

    match args.output {
        Some(path) => {
            store::write_artifact_atomic(&path, &recovered.plaintext)
                .with_context(|| format!("Failed to write plaintext to {}", path.display()))?;
            eprintln!("Plaintext written to {}", path.display());
        }
        None => println!("{}", recovered.plaintext),
    }

    Ok(())
}
