use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use promptseal::store::{DEFAULT_ARTIFACT_PATH, DEFAULT_PLAINTEXT_PATH};

#[derive(Parser)]
#[command(
    name = "promptseal",
    version,
    about = "Encrypt and decrypt agent instruction prompts in OpenSSL's Salted__ format"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a plaintext prompt into an artifact (PBKDF2-SHA256, AES-256-CBC)
    Encrypt(EncryptArgs),
    /// Decrypt an artifact, trying the legacy and current key schedules
    Decrypt(DecryptArgs),
}

#[derive(Args)]
pub struct KeyArgs {
    /// Encryption passphrase (falls back to ENCRYPTION_KEY, then .env.local, then a prompt)
    #[arg(
        long = "key",
        env = "ENCRYPTION_KEY",
        hide_env_values = true,
        value_name = "PASSPHRASE"
    )]
    pub key: Option<String>,
}

#[derive(Parser)]
pub struct EncryptArgs {
    /// Plaintext prompt to encrypt
    #[arg(long, short, value_name = "PATH", default_value = DEFAULT_PLAINTEXT_PATH)]
    pub input: PathBuf,

    /// Where to write the artifact
    #[arg(long, short, value_name = "PATH", default_value = DEFAULT_ARTIFACT_PATH)]
    pub output: PathBuf,

    #[command(flatten)]
    pub key: KeyArgs,
}

#[derive(Parser)]
pub struct DecryptArgs {
    /// Artifact to decrypt
    #[arg(long, short, value_name = "PATH", default_value = DEFAULT_ARTIFACT_PATH)]
    pub input: PathBuf,

    /// Write the plaintext to a file (0600) instead of stdout
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub key: KeyArgs,
}
