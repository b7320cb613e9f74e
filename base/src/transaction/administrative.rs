//! Administrative operations.
//!
//! Governance actions travel as an [`AdministrativeOp`] whose payload is a
//! JSON object with a single key naming the action:
//!
//! ```text
//! { "commission": { "flat_fee": "10000000", "percent_fee": "0", "from": "G..." } }
//! ```
//!
//! Every value inside the payload is a string. Amounts are scaled to network
//! integers before they are written. Key order is preserved as built.
//!
//! These builders take positional arguments and never set a source; use
//! [`Operation::with_source`] for that.

use serde_json::{Map, Value};

use super::asset::Asset;
use super::operation::{account, amount, check_unsigned_int, invalid, OperationError};
use super::types::{AdministrativeOpts, AgentLimits, CommissionKey, NumericInput};
use crate::config::NO_LIMIT;
use crate::transaction::amount::{is_valid_amount, to_network_amount};
use crate::xdr::Operation;

pub const ADMIN_OP_COMMISSION: &str = "commission";
pub const ADMIN_OP_TRAITS: &str = "traits";
pub const ADMIN_OP_ACCOUNT_LIMITS: &str = "account_limits";
pub const ADMIN_OP_ASSET: &str = "asset";
pub const ADMIN_OP_MAX_REVERSAL_DURATION: &str = "max_reversal_duration";

fn text(value: impl Into<String>) -> Value {
    Value::String(value.into())
}

fn flag(value: bool) -> Value {
    text(if value { "true" } else { "false" })
}

/// Wrap `attrs` under `name` and build the operation.
fn pack(name: &str, attrs: Map<String, Value>) -> Result<Operation, OperationError> {
    let mut payload = Map::new();
    payload.insert(name.to_string(), Value::Object(attrs));
    Operation::administrative(&AdministrativeOpts {
        op_data: Value::Object(payload).to_string(),
        source: None,
    })
}

fn put_asset(attrs: &mut Map<String, Value>, asset: &Asset) {
    attrs.insert("asset_type".into(), text(asset.asset_type()));
    if let Some(issuer) = asset.issuer() {
        attrs.insert("asset_code".into(), text(asset.code()));
        attrs.insert("asset_issuer".into(), text(issuer));
    }
}

fn put_commission_key(attrs: &mut Map<String, Value>, key: &CommissionKey) {
    let fields = [
        ("from", &key.from),
        ("to", &key.to),
        ("from_type", &key.from_type),
        ("to_type", &key.to_type),
    ];
    for (name, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            attrs.insert(name.into(), text(value));
        }
    }
    if let Some(asset) = &key.asset {
        put_asset(attrs, asset);
    }
}

/// `"-1"` for no limit, otherwise the scaled positive amount.
fn limit_amount(field: &'static str, value: Option<&str>) -> Result<String, OperationError> {
    match value {
        None => Ok(NO_LIMIT.to_string()),
        Some(v) if v == NO_LIMIT => Ok(NO_LIMIT.to_string()),
        Some(v) if is_valid_amount(v, false) => Ok(to_network_amount(v)?.to_string()),
        Some(v) => Err(invalid(field, format!("'{v}' is neither a positive amount nor -1"))),
    }
}

impl Operation {
    /// How long, in seconds, a payment stays reversible.
    pub fn set_max_reversal_duration(max_duration: NumericInput) -> Result<Operation, OperationError> {
        let seconds = check_unsigned_int("max_duration", Some(&max_duration), None)?
            .ok_or_else(|| invalid("max_duration", "required"))?;
        let mut attrs = Map::new();
        attrs.insert("max_reversal_duration".into(), text(seconds.to_string()));
        pack(ADMIN_OP_MAX_REVERSAL_DURATION, attrs)
    }

    /// Create or update the commission rule selected by `key`.
    pub fn set_commission(
        key: &CommissionKey,
        flat_fee: &str,
        percent_fee: &str,
    ) -> Result<Operation, OperationError> {
        let flat_fee = amount("flat_fee", flat_fee, true)?;
        let percent_fee = amount("percent_fee", percent_fee, true)?;

        let mut attrs = Map::new();
        attrs.insert("flat_fee".into(), text(flat_fee.to_string()));
        attrs.insert("percent_fee".into(), text(percent_fee.to_string()));
        put_commission_key(&mut attrs, key);
        pack(ADMIN_OP_COMMISSION, attrs)
    }

    pub fn delete_commission(key: &CommissionKey) -> Result<Operation, OperationError> {
        let mut attrs = Map::new();
        attrs.insert("delete".into(), flag(true));
        put_commission_key(&mut attrs, key);
        pack(ADMIN_OP_COMMISSION, attrs)
    }

    /// Payment limits for one account and asset.
    pub fn set_agent_limits(
        account_id: &str,
        asset_code: &str,
        limits: &AgentLimits,
    ) -> Result<Operation, OperationError> {
        account("account_id", account_id)?;

        let mut attrs = Map::new();
        attrs.insert("asset_code".into(), text(asset_code));
        attrs.insert("account_id".into(), text(account_id));
        let fields: [(&'static str, &Option<String>); 6] = [
            ("max_operation_out", &limits.max_operation_out),
            ("daily_max_out", &limits.daily_max_out),
            ("monthly_max_out", &limits.monthly_max_out),
            ("max_operation_in", &limits.max_operation_in),
            ("daily_max_in", &limits.daily_max_in),
            ("monthly_max_in", &limits.monthly_max_in),
        ];
        for (name, value) in fields {
            attrs.insert(name.into(), text(limit_amount(name, value.as_deref())?));
        }
        pack(ADMIN_OP_ACCOUNT_LIMITS, attrs)
    }

    /// Block outgoing and/or incoming payments for an account. `None` leaves
    /// that direction unchanged.
    pub fn restrict_agent_account(
        account_id: &str,
        block_outgoing: Option<bool>,
        block_incoming: Option<bool>,
    ) -> Result<Operation, OperationError> {
        account("account_id", account_id)?;

        let mut attrs = Map::new();
        attrs.insert("account_id".into(), text(account_id));
        if let Some(block) = block_outgoing {
            // Wire key spelling is fixed by the network.
            attrs.insert("block_outcoming_payments".into(), flag(block));
        }
        if let Some(block) = block_incoming {
            attrs.insert("block_incoming_payments".into(), flag(block));
        }
        pack(ADMIN_OP_TRAITS, attrs)
    }

    /// Create, update or delete an asset definition.
    pub fn manage_assets(
        asset: &Asset,
        is_anonymous: bool,
        is_delete: Option<bool>,
    ) -> Result<Operation, OperationError> {
        let mut attrs = Map::new();
        put_asset(&mut attrs, asset);
        attrs.insert("is_anonymous".into(), flag(is_anonymous));
        if let Some(delete) = is_delete {
            attrs.insert("delete".into(), flag(delete));
        }
        pack(ADMIN_OP_ASSET, attrs)
    }
}
