use clap::{Parser, Subcommand};

use crate::secret::Strength;

/// Parses a secret strength in bits (multiple of 16, 128 to 2048)
fn parse_strength(s: &str) -> Result<Strength, String> {
    let bits: u16 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    Strength::new(bits).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "slip39-tool")]
#[command(about = "Split a master secret into SLIP-39 mnemonic shares and recover it")]
pub struct Cli {
    /// Print results as JSON views instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a hex master secret into mnemonic shares
    Split {
        /// Number of shares to create (1-16)
        #[arg(short = 'n', long)]
        total_shares: String,

        /// Minimum number of shares needed to reconstruct
        #[arg(short, long)]
        threshold: String,

        /// Prompt for a passphrase protecting the secret
        #[arg(short, long)]
        passphrase: bool,

        /// Generate a random secret of this many bits instead of reading one
        #[arg(short, long, value_parser = parse_strength)]
        generate: Option<Strength>,
    },
    /// Combine mnemonic shares to recover the master secret
    Combine {
        /// Prompt for the passphrase used when splitting
        #[arg(short, long)]
        passphrase: bool,
    },
    /// Print a random master secret as hex
    Generate {
        /// Secret size in bits
        #[arg(short, long, value_parser = parse_strength, default_value = "128")]
        strength: Strength,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strength() {
        assert_eq!(parse_strength("256").unwrap().bits(), 256);
        assert!(parse_strength("100").is_err());
        assert!(parse_strength("many").unwrap_err().contains("not a valid number"));
    }

    #[test]
    fn test_split_arguments() {
        let cli = Cli::parse_from([
            "slip39-tool",
            "--json",
            "split",
            "--total-shares",
            "5",
            "--threshold",
            "3",
            "--generate",
            "256",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Split {
                total_shares,
                threshold,
                passphrase,
                generate,
            } => {
                assert_eq!(total_shares, "5");
                assert_eq!(threshold, "3");
                assert!(!passphrase);
                assert_eq!(generate.map(Strength::bits), Some(256));
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_generate_defaults_to_128_bits() {
        let cli = Cli::parse_from(["slip39-tool", "generate"]);
        match cli.command {
            Commands::Generate { strength } => assert_eq!(strength, Strength::default()),
            _ => panic!("expected generate"),
        }
    }
}
