use std::io::Write;

use colored::Colorize;
use serde_json::json;
use zauth_crypto::{HashAlgorithm, MerkleCommitment, MerkleTree, NodeHasher, Side, SignatureProvider};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.format;
    match cli.command {
        Command::Root(args) => cmd_root(args, &config, format, out),
        Command::Prove(args) => cmd_prove(args, &config, format, out),
        Command::Keygen(args) => cmd_keygen(args, format, out),
        Command::Pubkey(args) => cmd_pubkey(args, format, out),
        Command::Sign(args) => cmd_sign(args, format, out),
        Command::Verify(args) => cmd_verify(args, format, out),
    }
}

fn hasher_for(hash: Option<HashAlgorithm>, config: &CliConfig) -> NodeHasher {
    hash.map(NodeHasher::new).unwrap_or_else(|| config.merkle.hasher())
}

fn cmd_root(args: RootArgs, config: &CliConfig, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let hasher = hasher_for(args.hash, config);
    let root = MerkleCommitment::new(hasher).compute_root(&args.leaves)?;
    match format {
        OutputFormat::Text => writeln!(out, "{root}")?,
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "root": root, "leaves": args.leaves.len(), "hash": hasher.algorithm() })
        )?,
    }
    Ok(())
}

fn cmd_prove(args: ProveArgs, config: &CliConfig, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let hasher = hasher_for(args.hash, config);
    let tree = MerkleTree::from_leaves(&args.leaves, hasher)?;
    let proof = tree.proof(args.index)?;
    match format {
        OutputFormat::Text => {
            writeln!(out, "{} {}", "leaf".bold(), proof.leaf)?;
            for step in &proof.path {
                let side = match step.side {
                    Side::Left => "left ",
                    Side::Right => "right",
                };
                writeln!(out, "  {} {}", side.cyan(), step.sibling)?;
            }
            writeln!(out, "{} {}", "root".bold(), proof.root.yellow())?;
            writeln!(out, "{} {}", "hash".bold(), tree.hasher().algorithm())?;
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&proof)?)?,
    }
    Ok(())
}

fn cmd_keygen(args: KeygenArgs, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let provider = SignatureProvider::new(args.key_type);
    let secret = provider.generate_secret();
    let public_key = provider.derive_public_key(&secret)?;
    match format {
        OutputFormat::Text => {
            writeln!(out, "{} {} ({})", "✓".green().bold(), args.key_type, args.key_type.curve())?;
            writeln!(out, "  Secret: {}", secret.red())?;
            writeln!(out, "  Public: {}", public_key.cyan())?;
        }
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "key_type": args.key_type, "secret": secret, "public_key": public_key })
        )?,
    }
    Ok(())
}

fn cmd_pubkey(args: PubkeyArgs, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let public_key = SignatureProvider::new(args.key_type).derive_public_key(&args.secret)?;
    match format {
        OutputFormat::Text => writeln!(out, "{public_key}")?,
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "key_type": args.key_type, "public_key": public_key })
        )?,
    }
    Ok(())
}

fn cmd_sign(args: SignArgs, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let signature = SignatureProvider::new(args.key_type).sign(&args.digest, &args.secret)?;
    match format {
        OutputFormat::Text => writeln!(out, "{signature}")?,
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "key_type": args.key_type, "digest": args.digest, "signature": signature })
        )?,
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let valid = SignatureProvider::new(args.key_type).verify(&args.digest, &args.signature, &args.public_key)?;
    match format {
        OutputFormat::Text if valid => writeln!(out, "{} Signature valid ({})", "✓".green().bold(), args.key_type)?,
        OutputFormat::Text => writeln!(out, "{} Signature invalid ({})", "✗".red().bold(), args.key_type)?,
        OutputFormat::Json => writeln!(out, "{}", json!({ "key_type": args.key_type, "valid": valid }))?,
    }
    if !valid {
        anyhow::bail!("signature verification failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("zauth").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run_command(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn json(args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        serde_json::from_str(&run(&full).unwrap()).unwrap()
    }

    #[test]
    fn root_of_single_leaf() {
        assert_eq!(run(&["root", "only"]).unwrap().trim(), "only");
    }

    #[test]
    fn root_matches_library() {
        let expected = MerkleCommitment::default().compute_root(&["a", "b", "c"]).unwrap();
        assert_eq!(run(&["root", "a", "b", "c"]).unwrap().trim(), expected);
    }

    #[test]
    fn root_json_reports_hash() {
        let value = json(&["root", "--hash", "blake3", "a", "b"]);
        assert_eq!(value["hash"], "blake3");
        assert_eq!(value["leaves"], 2);
        assert_eq!(value["root"], NodeHasher::BLAKE3.hash("ab"));
    }

    #[test]
    fn config_file_selects_hash() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[merkle]\nhash = \"blake3\"").unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(
            run(&["--config", path, "root", "a", "b"]).unwrap().trim(),
            NodeHasher::BLAKE3.hash("ab")
        );
        // Command-line flag wins over the file.
        assert_eq!(
            run(&["--config", path, "root", "--hash", "sha256", "a", "b"]).unwrap().trim(),
            NodeHasher::SHA256.hash("ab")
        );
    }

    #[test]
    fn prove_json_verifies() {
        let value = json(&["prove", "--index", "2", "a", "b", "c", "d", "e"]);
        let proof: zauth_crypto::MerkleProof = serde_json::from_value(value).unwrap();
        assert_eq!(proof.leaf, "c");
        assert!(proof.verify(&NodeHasher::SHA256));
    }

    #[test]
    fn prove_text_names_tree_hash() {
        let text = run(&["prove", "--hash", "blake3", "--index", "0", "a", "b"]).unwrap();
        assert!(text.contains(&NodeHasher::BLAKE3.hash("ab")));
        assert!(text.lines().last().unwrap().ends_with("blake3"));
    }

    #[test]
    fn prove_out_of_range_fails() {
        assert!(run(&["prove", "--index", "3", "a", "b"]).is_err());
    }

    #[test]
    fn keygen_sign_verify_flow() {
        for key_type in ["ECDSA", "EDDSA"] {
            let keys = json(&["keygen", "-t", key_type]);
            let secret = keys["secret"].as_str().unwrap();
            let public = keys["public_key"].as_str().unwrap();

            let derived = json(&["pubkey", "-t", key_type, "-s", secret]);
            assert_eq!(derived["public_key"], public);

            let digest = NodeHasher::SHA256.hash("payload");
            let signed = json(&["sign", "-t", key_type, "-s", secret, "-d", &digest]);
            let signature = signed["signature"].as_str().unwrap();

            let verified = json(&[
                "verify", "-t", key_type, "-d", &digest, "--signature", signature, "-p", public,
            ]);
            assert_eq!(verified["valid"], true);
        }
    }

    #[test]
    fn verify_invalid_signature_fails() {
        let public = zauth_crypto::derive_public_key("01", zauth_types::KeyType::Ecdsa).unwrap();
        let digest = NodeHasher::SHA256.hash("payload");
        let err = run(&["verify", "-t", "ECDSA", "-d", &digest, "--signature", "3006020101020101", "-p", &public])
            .unwrap_err();
        assert!(err.to_string().contains("verification failed"));
    }

    #[test]
    fn malformed_secret_is_reported() {
        let err = run(&["pubkey", "-t", "EDDSA", "-s", "abcd"]).unwrap_err();
        assert!(err.to_string().contains("malformed EDDSA key material"));
    }
}
