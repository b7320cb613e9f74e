// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ledger Base
//!
//! The transaction-construction core of a ledger client: identifiers,
//! keys, amounts and operations, down to the bytes that get signed.
//!
//! Nothing here talks to a network. Every call is synchronous and works
//! only on the values it is given.
//!
//! ## Architecture
//!
//! - **config**: Protocol constants and the [`config::Network`] identity.
//! - **crypto**: Hashing, the signing provider, and [`crypto::Keypair`].
//! - **identity**: Strkey and legacy base58 identifier codecs.
//! - **xdr**: The canonical binary record format and its record types.
//! - **transaction**: Amounts, prices, assets, operation builders and
//!   the decoder.
//!
//! ## Quick look
//!
//! ```
//! use ledger_base::crypto::Keypair;
//! use ledger_base::transaction::{Asset, Operation, PaymentOpts};
//! use ledger_base::xdr::WriteXdr;
//!
//! let destination = Keypair::random();
//! let op = Operation::payment(&PaymentOpts {
//!     destination: destination.account_id(),
//!     asset: Asset::native(),
//!     amount: "12.5".into(),
//!     source: None,
//! })
//! .unwrap();
//!
//! let bytes = op.to_xdr_bytes().unwrap();
//! let decoded = ledger_base::transaction::decode_operation(&bytes).unwrap();
//! assert!(matches!(decoded, ledger_base::transaction::OperationOptions::Payment(_)));
//! ```
//!
//! ## Ground rules
//!
//! 1. No floating point anywhere near an amount.
//! 2. Secret key material is zeroized on drop and never logged.
//! 3. Builders return the first validation failure; there are no partial
//!    operations.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod transaction;
pub mod xdr;
