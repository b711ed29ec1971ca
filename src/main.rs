use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use slip39_tool::cli::{Cli, Commands};
use slip39_tool::commands::{combine_shares, generate_secret, split_secret};
use slip39_tool::pipeline::generation::GenerationInput;
use slip39_tool::pipeline::reconstruction::ReconstructionInput;

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read the hex master secret from stdin (hidden input when TTY available)
fn read_secret() -> Result<Zeroizing<String>> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter master secret (hex, at least 32 characters):");
        rpassword::read_password()
            .map(Zeroizing::new)
            .context("Failed to read master secret from stdin")
    } else {
        let stdin = io::stdin();
        let mut handle = stdin.lock();
        let mut secret = Zeroizing::new(String::new());
        handle
            .read_line(&mut secret)
            .context("Failed to read master secret from stdin")?;
        Ok(Zeroizing::new(secret.trim().to_string()))
    }
}

/// Prompt for a passphrase on the terminal, or use the empty passphrase
fn read_passphrase(prompt: bool) -> Result<Zeroizing<String>> {
    if !prompt {
        return Ok(Zeroizing::new(String::new()));
    }
    rpassword::prompt_password("Passphrase: ")
        .map(Zeroizing::new)
        .context("Failed to read passphrase")
}

/// Read shares from stdin, one per line
///
/// On a TTY an empty line finishes the list.
fn read_shares() -> Result<Zeroizing<String>> {
    let mut shares = Zeroizing::new(Vec::new());

    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter SLIP-39 shares (one per line, empty line to finish):");

        loop {
            let share = Zeroizing::new(
                rpassword::read_password().context("Failed to read share from stdin")?,
            );
            if share.trim().is_empty() {
                break;
            }
            shares.push(share.trim().to_string());
        }
    } else {
        let stdin = io::stdin();
        let handle = stdin.lock();

        for line in handle.lines() {
            let line = Zeroizing::new(line.context("Failed to read line from stdin")?);
            let trimmed = line.trim();

            // Split output separates shares with blank lines, so piped input
            // reads to the end instead of stopping at the first one
            if !trimmed.is_empty() {
                shares.push(trimmed.to_string());
            }
        }
    }

    if shares.is_empty() {
        anyhow::bail!("No shares provided");
    }

    Ok(Zeroizing::new(shares.join("\n")))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Split {
            total_shares,
            threshold,
            passphrase,
            generate,
        } => {
            let secret = match generate {
                Some(strength) => generate_secret(strength)?,
                None => read_secret()?,
            };
            let input = GenerationInput {
                secret: secret.as_str().to_owned(),
                passphrase: read_passphrase(passphrase)?.as_str().to_owned(),
                total_shares,
                threshold,
            };
            split_secret(&input, generate.is_some(), cli.json)?
        }
        Commands::Combine { passphrase } => {
            let input = ReconstructionInput {
                shares: read_shares()?.as_str().to_owned(),
                passphrase: read_passphrase(passphrase)?.as_str().to_owned(),
            };
            combine_shares(&input, cli.json)?
        }
        Commands::Generate { strength } => generate_secret(strength)?,
    };

    println!("{}", output.as_str());
    Ok(())
}
