//! Operation builders.
//!
//! One associated function per operation kind. Each takes the kind's option
//! record, validates every field in order, and either returns a complete
//! [`Operation`] or the first error. There are no partial results.
//!
//! Validation is strict on purpose: anything the network would reject is
//! rejected here, before it costs a fee.

use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use tracing::debug;

use super::amount::{is_valid_amount, parse_decimal, to_network_amount, AmountError};
use super::asset::{pad_code, AssetError};
use super::price::to_price;
use super::types::*;
use crate::config::{
    ALPHANUM4_CODE_LENGTH, MAX_ASSET_CODE_LENGTH, MAX_DATA_NAME_LENGTH, MAX_DATA_VALUE_LENGTH,
    MAX_HOME_DOMAIN_LENGTH, MAX_INT64, MAX_PATH_LENGTH, MAX_WEIGHT,
};
use crate::crypto::keys::KeyError;
use crate::identity::strkey;
use crate::xdr::{
    AccountId, AccountType, AdministrativeOp, AllowTrustAsset, AllowTrustOp, ChangeTrustOp,
    CreateAccountOp, CreatePassiveOfferOp, ExternalPaymentOp, ManageDataOp, ManageOfferOp,
    Operation, OperationBody, PathPaymentOp, PaymentOp, PaymentReversalOp, PublicKey, ScratchCard,
    SetOptionsOp, Signer, XdrError,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from building or decoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// A field failed validation.
    #[error("{field} is invalid: {reason}")]
    InvalidFieldValue {
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// An amount field is not a valid network amount.
    #[error("{field} must be a valid amount, got '{value}'")]
    InvalidAmount {
        /// The offending field.
        field: &'static str,
        /// The value as given.
        value: String,
    },

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Xdr(#[from] XdrError),

    /// The body discriminant is not a known operation kind.
    #[error("unknown operation type {0}")]
    UnknownOperation(i32),
}

pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> OperationError {
    OperationError::InvalidFieldValue {
        field,
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Resolve `G...` text into an account ID.
pub(crate) fn account(field: &'static str, value: &str) -> Result<AccountId, OperationError> {
    strkey::decode_account_id(value)
        .map(PublicKey::Ed25519)
        .map_err(|e| invalid(field, e.to_string()))
}

fn source_account(source: &Option<String>) -> Result<Option<AccountId>, OperationError> {
    source.as_deref().map(|s| account("source", s)).transpose()
}

/// Validate and scale an amount field.
pub(crate) fn amount(field: &'static str, value: &str, allow_zero: bool) -> Result<i64, OperationError> {
    if !is_valid_amount(value, allow_zero) {
        return Err(OperationError::InvalidAmount {
            field,
            value: value.to_string(),
        });
    }
    Ok(to_network_amount(value)?)
}

/// Shared checker for unsigned 32-bit fields.
///
/// The value must be integral, non-negative and at most `u32::MAX`, and
/// must satisfy `within` when one is given.
pub(crate) fn check_unsigned_int(
    field: &'static str,
    value: Option<&NumericInput>,
    within: Option<fn(u32) -> bool>,
) -> Result<Option<u32>, OperationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let number = match value {
        NumericInput::Int(n) => *n,
        NumericInput::Text(text) => {
            let parsed = parse_decimal(text.trim()).ok_or_else(|| invalid(field, "not a number"))?;
            if !parsed.fract().is_zero() {
                return Err(invalid(field, "not an integer"));
            }
            parsed.to_i64().ok_or_else(|| invalid(field, "out of range"))?
        }
    };
    if number < 0 {
        return Err(invalid(field, "must be unsigned"));
    }
    let number = u32::try_from(number).map_err(|_| invalid(field, "out of range"))?;
    match within {
        Some(check) if !check(number) => Err(invalid(field, format!("{number} is out of range"))),
        _ => Ok(Some(number)),
    }
}

fn weight_in_range(value: u32) -> bool {
    value <= MAX_WEIGHT
}

fn finish(source_account: Option<AccountId>, body: OperationBody) -> Operation {
    debug!(
        kind = body.kind().name(),
        has_source = source_account.is_some(),
        "operation built"
    );
    Operation {
        source_account,
        body,
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

impl Operation {
    /// Build any operation from its tagged option record.
    pub fn from_options(options: &OperationOptions) -> Result<Operation, OperationError> {
        match options {
            OperationOptions::CreateAccount(o) => Self::create_account(o),
            OperationOptions::Payment(o) => Self::payment(o),
            OperationOptions::ExternalPayment(o) => Self::external_payment(o),
            OperationOptions::PathPayment(o) => Self::path_payment(o),
            OperationOptions::ChangeTrust(o) => Self::change_trust(o),
            OperationOptions::AllowTrust(o) => Self::allow_trust(o),
            OperationOptions::SetOptions(o) => Self::set_options(o),
            OperationOptions::ManageOffer(o) => Self::manage_offer(o),
            OperationOptions::CreatePassiveOffer(o) => Self::create_passive_offer(o),
            OperationOptions::AccountMerge(o) => Self::account_merge(o),
            OperationOptions::Inflation(o) => Self::inflation(o),
            OperationOptions::ManageData(o) => Self::manage_data(o),
            OperationOptions::Administrative(o) => Self::administrative(o),
            OperationOptions::PaymentReversal(o) => Self::payment_reversal(o),
        }
    }

    /// Replace the source override of an already built operation.
    pub fn with_source(mut self, source: &str) -> Result<Operation, OperationError> {
        self.source_account = Some(account("source", source)?);
        Ok(self)
    }

    /// Create a new account of a given type, optionally pre-funded.
    ///
    /// Funding is attached only when its amount is a valid positive amount;
    /// otherwise it is ignored.
    pub fn create_account(opts: &CreateAccountOpts) -> Result<Operation, OperationError> {
        let destination = account("destination", &opts.destination)?;
        let account_type = AccountType::from_value(opts.account_type)
            .ok_or_else(|| invalid("account_type", format!("unknown account type {}", opts.account_type)))?;
        let scratch_card = match &opts.funding {
            Some(funding) if is_valid_amount(&funding.amount, false) => Some(ScratchCard {
                asset: funding.asset.to_xdr_object(),
                amount: to_network_amount(&funding.amount)?,
            }),
            _ => None,
        };
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::CreateAccount(CreateAccountOp {
                destination,
                account_type,
                scratch_card,
            }),
        ))
    }

    pub fn payment(opts: &PaymentOpts) -> Result<Operation, OperationError> {
        let destination = account("destination", &opts.destination)?;
        let amount = amount("amount", &opts.amount, false)?;
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::Payment(PaymentOp {
                destination,
                asset: opts.asset.to_xdr_object(),
                amount,
            }),
        ))
    }

    /// Payment to an account held at another bank, via an exchange agent.
    pub fn external_payment(opts: &ExternalPaymentOpts) -> Result<Operation, OperationError> {
        let exchange_agent = account("exchange_agent", &opts.exchange_agent)?;
        let destination_bank = account("destination_bank", &opts.destination_bank)?;
        let destination_account = account("destination_account", &opts.destination_account)?;
        let amount = amount("amount", &opts.amount, false)?;
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::ExternalPayment(ExternalPaymentOp {
                exchange_agent,
                destination_bank,
                destination_account,
                asset: opts.asset.to_xdr_object(),
                amount,
            }),
        ))
    }

    pub fn path_payment(opts: &PathPaymentOpts) -> Result<Operation, OperationError> {
        let send_max = amount("send_max", &opts.send_max, false)?;
        let destination = account("destination", &opts.destination)?;
        let dest_amount = amount("dest_amount", &opts.dest_amount, false)?;
        if opts.path.len() > MAX_PATH_LENGTH {
            return Err(invalid(
                "path",
                format!("at most {MAX_PATH_LENGTH} assets, got {}", opts.path.len()),
            ));
        }
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::PathPayment(PathPaymentOp {
                send_asset: opts.send_asset.to_xdr_object(),
                send_max,
                destination,
                dest_asset: opts.dest_asset.to_xdr_object(),
                dest_amount,
                path: opts.path.iter().map(|a| a.to_xdr_object()).collect(),
            }),
        ))
    }

    /// Create, update or (with limit `"0"`) delete a trust line.
    pub fn change_trust(opts: &ChangeTrustOpts) -> Result<Operation, OperationError> {
        let limit = match &opts.limit {
            Some(limit) => amount("limit", limit, true)?,
            None => MAX_INT64,
        };
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::ChangeTrust(ChangeTrustOp {
                line: opts.asset.to_xdr_object(),
                limit,
            }),
        ))
    }

    /// Authorize or deauthorize a trustor to hold an asset issued by the
    /// operation source.
    pub fn allow_trust(opts: &AllowTrustOpts) -> Result<Operation, OperationError> {
        let trustor = account("trustor", &opts.trustor)?;
        let code = opts.asset_code.as_str();
        if code.is_empty()
            || code.len() > MAX_ASSET_CODE_LENGTH
            || !code.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(invalid("asset_code", "must be 1-12 ASCII alphanumerics"));
        }
        let asset = if code.len() <= ALPHANUM4_CODE_LENGTH {
            AllowTrustAsset::CreditAlphanum4(pad_code(code))
        } else {
            AllowTrustAsset::CreditAlphanum12(pad_code(code))
        };
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::AllowTrust(AllowTrustOp {
                trustor,
                asset,
                authorize: opts.authorize,
            }),
        ))
    }

    pub fn set_options(opts: &SetOptionsOpts) -> Result<Operation, OperationError> {
        let inflation_dest = opts
            .inflation_dest
            .as_deref()
            .map(|dest| account("inflation_dest", dest))
            .transpose()?;

        let weight: Option<fn(u32) -> bool> = Some(weight_in_range);
        let clear_flags = check_unsigned_int("clear_flags", opts.clear_flags.as_ref(), None)?;
        let set_flags = check_unsigned_int("set_flags", opts.set_flags.as_ref(), None)?;
        let master_weight = check_unsigned_int("master_weight", opts.master_weight.as_ref(), weight)?;
        let low_threshold = check_unsigned_int("low_threshold", opts.low_threshold.as_ref(), weight)?;
        let med_threshold = check_unsigned_int("med_threshold", opts.med_threshold.as_ref(), weight)?;
        let high_threshold = check_unsigned_int("high_threshold", opts.high_threshold.as_ref(), weight)?;

        if let Some(domain) = &opts.home_domain {
            if domain.len() > MAX_HOME_DOMAIN_LENGTH {
                return Err(invalid(
                    "home_domain",
                    format!("at most {MAX_HOME_DOMAIN_LENGTH} bytes"),
                ));
            }
        }

        let signer = match &opts.signer {
            Some(signer) => {
                let pub_key = account("signer.pub_key", &signer.pub_key)?;
                let weight = check_unsigned_int("signer.weight", Some(&signer.weight), weight)?
                    .ok_or_else(|| invalid("signer.weight", "required"))?;
                Some(Signer {
                    pub_key,
                    weight,
                    signer_type: signer.signer_type,
                })
            }
            None => None,
        };

        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::SetOptions(SetOptionsOp {
                inflation_dest,
                clear_flags,
                set_flags,
                master_weight,
                low_threshold,
                med_threshold,
                high_threshold,
                home_domain: opts.home_domain.clone(),
                signer,
            }),
        ))
    }

    /// Create, update or (with amount `"0"`) delete an offer.
    pub fn manage_offer(opts: &ManageOfferOpts) -> Result<Operation, OperationError> {
        let amount = amount("amount", &opts.amount, true)?;
        let price = to_price(&opts.price)?;
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::ManageOffer(ManageOfferOp {
                selling: opts.selling.to_xdr_object(),
                buying: opts.buying.to_xdr_object(),
                amount,
                price,
                offer_id: opts.offer_id.unwrap_or(0),
            }),
        ))
    }

    pub fn create_passive_offer(opts: &CreatePassiveOfferOpts) -> Result<Operation, OperationError> {
        let amount = amount("amount", &opts.amount, false)?;
        let price = to_price(&opts.price)?;
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::CreatePassiveOffer(CreatePassiveOfferOp {
                selling: opts.selling.to_xdr_object(),
                buying: opts.buying.to_xdr_object(),
                amount,
                price,
            }),
        ))
    }

    /// Merge the source account into `destination`.
    pub fn account_merge(opts: &AccountMergeOpts) -> Result<Operation, OperationError> {
        let destination = account("destination", &opts.destination)?;
        let source = source_account(&opts.source)?;
        Ok(finish(source, OperationBody::AccountMerge(destination)))
    }

    pub fn inflation(opts: &InflationOpts) -> Result<Operation, OperationError> {
        let source = source_account(&opts.source)?;
        Ok(finish(source, OperationBody::Inflation))
    }

    /// Set, modify or (with no value) delete a data entry.
    pub fn manage_data(opts: &ManageDataOpts) -> Result<Operation, OperationError> {
        if opts.name.len() > MAX_DATA_NAME_LENGTH {
            return Err(invalid("name", format!("at most {MAX_DATA_NAME_LENGTH} bytes")));
        }
        let data_value = match &opts.value {
            Some(value) => {
                let bytes = value.as_bytes();
                if bytes.len() > MAX_DATA_VALUE_LENGTH {
                    return Err(invalid("value", format!("at most {MAX_DATA_VALUE_LENGTH} bytes")));
                }
                Some(bytes.to_vec())
            }
            None => None,
        };
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::ManageData(ManageDataOp {
                data_name: opts.name.clone(),
                data_value,
            }),
        ))
    }

    /// Administrative operation from a raw JSON payload.
    pub fn administrative(opts: &AdministrativeOpts) -> Result<Operation, OperationError> {
        match serde_json::from_str::<serde_json::Value>(&opts.op_data) {
            Ok(serde_json::Value::Object(_)) => {}
            Ok(_) => return Err(invalid("op_data", "must be a JSON object")),
            Err(e) => return Err(invalid("op_data", e.to_string())),
        }
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::Administrative(AdministrativeOp {
                op_data: opts.op_data.clone(),
            }),
        ))
    }

    /// Reverse an earlier payment, returning amount and commission.
    pub fn payment_reversal(opts: &PaymentReversalOpts) -> Result<Operation, OperationError> {
        let payment_source = account("payment_source", &opts.payment_source)?;
        let amount = amount("amount", &opts.amount, false)?;
        let commission_amount = self::amount("commission_amount", &opts.commission_amount, false)?;
        let source = source_account(&opts.source)?;
        Ok(finish(
            source,
            OperationBody::PaymentReversal(PaymentReversalOp {
                payment_id: opts.payment_id,
                payment_source,
                asset: opts.asset.to_xdr_object(),
                amount,
                commission_amount,
            }),
        ))
    }
}
