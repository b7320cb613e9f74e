//! Option records for the operation builders.
//!
//! Each operation kind has a plain record that callers fill in and hand to
//! the matching builder on [`crate::xdr::Operation`]. The same records come
//! back out of [`super::decode::operation_to_object`], so a record survives
//! a build/decode round trip up to normalization (trailing zeros dropped,
//! defaults made explicit).
//!
//! All records serialize with camelCase field names and a `"type"` tag on
//! [`OperationOptions`], which is the shape the CLI prints.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::asset::Asset;

// ---------------------------------------------------------------------------
// Loose inputs
// ---------------------------------------------------------------------------

/// An unsigned-integer field that callers may give as a number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Int(i64),
    Text(String),
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Int(value)
    }
}

impl From<u32> for NumericInput {
    fn from(value: u32) -> Self {
        NumericInput::Int(i64::from(value))
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Int(v) => write!(f, "{v}"),
            NumericInput::Text(s) => f.write_str(s),
        }
    }
}

/// A data entry value: raw bytes, or text stored as its UTF-8 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl DataValue {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            DataValue::Text(s) => s.as_bytes(),
            DataValue::Bytes(b) => b,
        }
    }
}

/// A price as an explicit ratio or as decimal text to approximate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Ratio { n: i64, d: i64 },
    Decimal(String),
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Decimal(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// Per-kind records
// ---------------------------------------------------------------------------

/// Prepaid funding for a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Funding {
    pub asset: Asset,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountOpts {
    pub destination: String,
    /// Raw account type value; must be a known [`crate::xdr::AccountType`].
    pub account_type: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<Funding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOpts {
    pub destination: String,
    pub asset: Asset,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPaymentOpts {
    pub exchange_agent: String,
    pub destination_bank: String,
    pub destination_account: String,
    pub asset: Asset,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPaymentOpts {
    pub send_asset: Asset,
    pub send_max: String,
    pub destination: String,
    pub dest_asset: Asset,
    pub dest_amount: String,
    #[serde(default)]
    pub path: Vec<Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTrustOpts {
    pub asset: Asset,
    /// `None` means the maximum limit; `"0"` removes the trust line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowTrustOpts {
    pub trustor: String,
    pub asset_code: String,
    pub authorize: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerOpts {
    pub pub_key: String,
    pub weight: NumericInput,
    pub signer_type: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOptionsOpts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation_dest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_flags: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_flags: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_weight: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_threshold: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub med_threshold: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_threshold: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<SignerOpts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageOfferOpts {
    pub selling: Asset,
    pub buying: Asset,
    /// Zero deletes the offer.
    pub amount: String,
    pub price: PriceInput,
    /// `None` or zero creates a new offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePassiveOfferOpts {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: String,
    pub price: PriceInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMergeOpts {
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationOpts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageDataOpts {
    pub name: String,
    /// `None` deletes the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministrativeOpts {
    /// JSON object text, `{ "<action>": { ... } }`.
    pub op_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReversalOpts {
    pub payment_source: String,
    pub asset: Asset,
    pub amount: String,
    pub commission_amount: String,
    #[serde(rename = "paymentID")]
    pub payment_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

// ---------------------------------------------------------------------------
// Administrative inputs
// ---------------------------------------------------------------------------

/// Selector for a commission rule. Every field is optional; absent fields
/// are left out of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,
}

/// Per-account, per-asset payment limits. `None` or `"-1"` means no limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_operation_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_max_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_max_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_operation_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_max_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_max_in: Option<String>,
}

// ---------------------------------------------------------------------------
// OperationOptions
// ---------------------------------------------------------------------------

/// Any operation's option record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OperationOptions {
    CreateAccount(CreateAccountOpts),
    Payment(PaymentOpts),
    ExternalPayment(ExternalPaymentOpts),
    PathPayment(PathPaymentOpts),
    ChangeTrust(ChangeTrustOpts),
    AllowTrust(AllowTrustOpts),
    SetOptions(SetOptionsOpts),
    ManageOffer(ManageOfferOpts),
    CreatePassiveOffer(CreatePassiveOfferOpts),
    AccountMerge(AccountMergeOpts),
    Inflation(InflationOpts),
    ManageData(ManageDataOpts),
    Administrative(AdministrativeOpts),
    PaymentReversal(PaymentReversalOpts),
}

impl OperationOptions {
    /// The source override carried by the record, if any.
    pub fn source(&self) -> Option<&str> {
        match self {
            OperationOptions::CreateAccount(o) => o.source.as_deref(),
            OperationOptions::Payment(o) => o.source.as_deref(),
            OperationOptions::ExternalPayment(o) => o.source.as_deref(),
            OperationOptions::PathPayment(o) => o.source.as_deref(),
            OperationOptions::ChangeTrust(o) => o.source.as_deref(),
            OperationOptions::AllowTrust(o) => o.source.as_deref(),
            OperationOptions::SetOptions(o) => o.source.as_deref(),
            OperationOptions::ManageOffer(o) => o.source.as_deref(),
            OperationOptions::CreatePassiveOffer(o) => o.source.as_deref(),
            OperationOptions::AccountMerge(o) => o.source.as_deref(),
            OperationOptions::Inflation(o) => o.source.as_deref(),
            OperationOptions::ManageData(o) => o.source.as_deref(),
            OperationOptions::Administrative(o) => o.source.as_deref(),
            OperationOptions::PaymentReversal(o) => o.source.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_input_accepts_numbers_and_text() {
        let n: NumericInput = serde_json::from_str("7").unwrap();
        assert_eq!(n, NumericInput::Int(7));
        let t: NumericInput = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(t, NumericInput::Text("7".into()));
        assert_eq!(t.to_string(), "7");
    }

    #[test]
    fn price_input_shapes() {
        let r: PriceInput = serde_json::from_str(r#"{"n":1,"d":2}"#).unwrap();
        assert_eq!(r, PriceInput::Ratio { n: 1, d: 2 });
        let d: PriceInput = serde_json::from_str(r#""0.5""#).unwrap();
        assert_eq!(d, PriceInput::Decimal("0.5".into()));
    }

    #[test]
    fn options_are_tagged_by_type() {
        let opts = OperationOptions::Inflation(InflationOpts::default());
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            serde_json::json!({ "type": "inflation" })
        );

        let merge: OperationOptions = serde_json::from_value(serde_json::json!({
            "type": "accountMerge",
            "destination": "GDEST",
            "source": "GSRC"
        }))
        .unwrap();
        assert_eq!(merge.source(), Some("GSRC"));
    }

    #[test]
    fn data_value_bytes() {
        assert_eq!(DataValue::Text("hi".into()).as_bytes(), b"hi");
        assert_eq!(DataValue::Bytes(vec![1, 2]).as_bytes(), &[1, 2]);
    }
}
