// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ledger CLI
//!
//! Entry point for the `ledger-cli` binary. Parses CLI arguments,
//! initializes logging, and runs one offline command against
//! `ledger-base`.
//!
//! - `keygen`: generate or derive a keypair
//! - `inspect`: identify a strkey and print its bytes
//! - `master`: print the network master account
//! - `sign`: sign a hex payload with a seed
//! - `decode-op`: decode a base64 operation to JSON
//! - `version`: print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;

use ledger_base::config::Network;
use ledger_base::crypto::Keypair;
use ledger_base::identity::strkey;
use ledger_base::transaction::decode_operation_base64;

use cli::{Commands, LedgerCli};

fn main() -> Result<()> {
    let cli = LedgerCli::parse();
    logging::init_logging(cli.log_format);

    let network = cli.network.resolve();
    match cli.command {
        Commands::Keygen(args) => keygen(args),
        Commands::Inspect(args) => inspect(args),
        Commands::Master => master(&network),
        Commands::Sign(args) => sign(args),
        Commands::DecodeOp(args) => decode_op(args),
        Commands::Version => {
            print_version(&network);
            Ok(())
        }
    }
}

/// Generates a fresh keypair or re-derives one from `--seed`.
fn keygen(args: cli::KeygenArgs) -> Result<()> {
    let keypair = match args.seed.as_deref() {
        Some(seed) => Keypair::from_seed(seed).context("failed to parse seed")?,
        None => Keypair::random(),
    };
    let seed = keypair.seed().context("keypair has no secret seed")?;

    tracing::info!(account_id = %keypair.account_id(), "keypair ready");

    println!("Account ID : {}", keypair.account_id());
    println!("Seed       : {}", seed);
    Ok(())
}

/// Reports the role of a strkey and its raw bytes in hex.
fn inspect(args: cli::InspectArgs) -> Result<()> {
    let Some((role, data)) = strkey::detect(args.strkey.trim()) else {
        bail!("'{}' is not a valid strkey", args.strkey);
    };

    println!("Role   : {} (version byte 0x{:02x})", role, role.byte());
    println!("Length : {} bytes", data.len());
    println!("Hex    : {}", hex::encode(&data));
    Ok(())
}

/// Prints the master account derived from the network passphrase.
fn master(network: &Network) -> Result<()> {
    let keypair = Keypair::master(network);

    println!("Network    : {}", network.passphrase());
    println!("Network ID : {}", hex::encode(network.network_id()));
    println!("Master     : {}", keypair.account_id());
    Ok(())
}

/// Signs the decoded payload and prints the decorated signature parts.
fn sign(args: cli::SignArgs) -> Result<()> {
    let keypair = Keypair::from_seed(args.seed.trim()).context("failed to parse seed")?;
    let data = hex::decode(args.data_hex.trim()).context("payload is not valid hex")?;

    let decorated = keypair
        .sign_decorated(&data)
        .context("failed to sign payload")?;

    tracing::info!(account_id = %keypair.account_id(), bytes = data.len(), "payload signed");

    println!("Signer    : {}", keypair.account_id());
    println!("Hint      : {}", hex::encode(decorated.hint));
    println!("Signature : {}", hex::encode(&decorated.signature));
    Ok(())
}

/// Decodes a base64 operation and prints it as pretty JSON.
fn decode_op(args: cli::DecodeOpArgs) -> Result<()> {
    let options = decode_operation_base64(&args.xdr).context("failed to decode operation")?;
    let json = serde_json::to_string_pretty(&options).context("failed to render operation")?;
    println!("{}", json);
    Ok(())
}

/// Prints version information to stdout.
fn print_version(network: &Network) {
    println!("ledger-cli {}", env!("CARGO_PKG_VERSION"));
    println!("network    {}", network.passphrase());
    println!("rustc      {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
