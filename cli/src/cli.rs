//! # CLI Interface
//!
//! Defines the command-line argument structure for `ledger-cli` using
//! `clap` derive. Network selection is global so every subcommand that
//! needs it reads the same flags and environment.

use clap::{Args, Parser, Subcommand};

use ledger_base::config::Network;

use crate::logging::LogFormat;

/// Operator tool for ledger keys and operations.
///
/// Generates and inspects keys, signs payloads, and decodes encoded
/// operations. Works offline; nothing is ever submitted to a network.
#[derive(Parser, Debug)]
#[command(
    name = "ledger-cli",
    about = "Ledger key and operation tool",
    version,
    propagate_version = true
)]
pub struct LedgerCli {
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Format of diagnostics written to stderr.
    #[arg(
        long,
        global = true,
        env = "LEDGER_LOG_FORMAT",
        value_enum,
        ignore_case = true,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Network selection shared by all subcommands.
#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// Network name (`public`, `testnet`) or a full passphrase.
    #[arg(long, global = true, env = "LEDGER_NETWORK", default_value = "testnet")]
    pub network: String,

    /// Explicit network passphrase. Takes precedence over `--network`.
    #[arg(long, global = true, env = "LEDGER_NETWORK_PASSPHRASE")]
    pub passphrase: Option<String>,
}

impl NetworkArgs {
    pub fn resolve(&self) -> Network {
        match &self.passphrase {
            Some(passphrase) => Network::new(passphrase.clone()),
            None => Network::from_name_or_passphrase(&self.network),
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a keypair, or derive one from an existing seed.
    Keygen(KeygenArgs),
    /// Identify a strkey and print its raw bytes.
    Inspect(InspectArgs),
    /// Print the master account of the selected network.
    Master,
    /// Sign hex-encoded bytes with a seed.
    Sign(SignArgs),
    /// Decode a base64 operation and print it as JSON.
    DecodeOp(DecodeOpArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `keygen` subcommand.
#[derive(Parser, Debug)]
pub struct KeygenArgs {
    /// Existing `S...` seed to derive from instead of generating one.
    #[arg(long)]
    pub seed: Option<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Any strkey: `G...`, `S...`, `M...`, `P...`, `W...`, `Z...` or `K...`.
    pub strkey: String,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// `S...` seed of the signer.
    ///
    /// Prefer the environment variable over the flag so the seed stays out
    /// of shell history.
    #[arg(long, env = "LEDGER_SEED", hide_env_values = true)]
    pub seed: String,

    /// Payload to sign, hex-encoded.
    #[arg(long)]
    pub data_hex: String,
}

/// Arguments for the `decode-op` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeOpArgs {
    /// Base64-encoded operation record.
    pub xdr: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        LedgerCli::command().debug_assert();
    }

    #[test]
    fn passphrase_overrides_network_name() {
        let cli = LedgerCli::parse_from([
            "ledger-cli",
            "--network",
            "public",
            "--passphrase",
            "Private Net ; 2026",
            "master",
        ]);
        assert_eq!(cli.network.resolve().passphrase(), "Private Net ; 2026");
    }

    #[test]
    fn log_format_is_a_closed_choice() {
        let cli = LedgerCli::parse_from(["ledger-cli", "--log-format", "JSON", "master"]);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(LedgerCli::try_parse_from(["ledger-cli", "--log-format", "xml", "master"]).is_err());
    }

    #[test]
    fn parses_decode_op() {
        let cli = LedgerCli::parse_from(["ledger-cli", "decode-op", "AAAAAAAAAAk="]);
        match cli.command {
            Commands::DecodeOp(args) => assert_eq!(args.xdr, "AAAAAAAAAAk="),
            other => panic!("unexpected {other:?}"),
        }
    }
}
