use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use zauth_crypto::HashAlgorithm;
use zauth_types::KeyType;

#[derive(Parser)]
#[command(
    name = "zauth",
    about = "zauth — Merkle property commitments and ECDSA/EdDSA signatures",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the Merkle root of ordered leaf values
    Root(RootArgs),
    /// Produce an inclusion proof for one leaf
    Prove(ProveArgs),
    /// Generate a new secret and its public key
    Keygen(KeygenArgs),
    /// Derive the public key of a secret
    Pubkey(PubkeyArgs),
    /// Sign a hex digest
    Sign(SignArgs),
    /// Verify a signature over a hex digest
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct RootArgs {
    #[arg(required = true)]
    pub leaves: Vec<String>,
    /// Overrides the configured hash
    #[arg(long)]
    pub hash: Option<HashAlgorithm>,
}

#[derive(Args)]
pub struct ProveArgs {
    #[arg(short, long)]
    pub index: usize,
    #[arg(required = true)]
    pub leaves: Vec<String>,
    #[arg(long)]
    pub hash: Option<HashAlgorithm>,
}

#[derive(Args)]
pub struct KeygenArgs {
    #[arg(short = 't', long)]
    pub key_type: KeyType,
}

#[derive(Args)]
pub struct PubkeyArgs {
    #[arg(short = 't', long)]
    pub key_type: KeyType,
    #[arg(short, long)]
    pub secret: String,
}

#[derive(Args)]
pub struct SignArgs {
    #[arg(short = 't', long)]
    pub key_type: KeyType,
    #[arg(short, long)]
    pub secret: String,
    #[arg(short, long)]
    pub digest: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[arg(short = 't', long)]
    pub key_type: KeyType,
    #[arg(short, long)]
    pub digest: String,
    #[arg(long)]
    pub signature: String,
    #[arg(short, long)]
    pub public_key: String,
}
