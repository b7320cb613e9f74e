//! # Transaction Module
//!
//! Everything between caller input and the binary operation record.
//!
//! ## Architecture
//!
//! ```text
//! amount.rs          Fixed-point amount conversion (7 decimal places)
//! price.rs           Decimal to n/d price approximation
//! asset.rs           Native and issued asset value type
//! types.rs           Option records, one per operation kind
//! operation.rs       Validating builders on Operation
//! administrative.rs  Governance actions packed as JSON payloads
//! decode.rs          Binary record back to option record
//! ```
//!
//! ## Flow
//!
//! 1. **Describe** the operation with its option record.
//! 2. **Build** with the matching `Operation::*` builder, or
//!    [`Operation::from_options`] for any kind.
//! 3. **Encode** with [`crate::xdr::WriteXdr`].
//! 4. **Decode** back with [`decode_operation`] / [`operation_to_object`].
//!
//! Amounts never pass through floating point. Building validates every
//! field and returns the first problem; nothing is half-built.

pub mod administrative;
pub mod amount;
pub mod asset;
pub mod decode;
pub mod operation;
pub mod price;
pub mod types;

pub use amount::{from_network_amount, is_valid_amount, to_network_amount, AmountError};
pub use asset::{Asset, AssetError};
pub use decode::{decode_operation, decode_operation_base64, operation_to_object};
pub use operation::OperationError;
pub use price::{best_r, from_price, to_price};
pub use types::*;

pub use crate::xdr::Operation;
