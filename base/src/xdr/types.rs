//! Record types of the operation schema.
//!
//! Field order in every `write_xdr`/`read_xdr` pair is the wire order. Do not
//! reorder fields for readability.

use bytes::BytesMut;

use super::{
    read_array, read_bool, read_fixed_opaque, read_hyper, read_int, read_option, read_string,
    read_uhyper, read_uint, read_var_opaque, write_array, write_bool, write_fixed_opaque,
    write_hyper, write_int, write_option, write_string, write_uhyper, write_uint,
    write_var_opaque, ReadXdr, WriteXdr, XdrError,
};
use crate::config::{
    MAX_DATA_NAME_LENGTH, MAX_DATA_VALUE_LENGTH, MAX_HOME_DOMAIN_LENGTH, MAX_PATH_LENGTH,
    SIGNATURE_HINT_LENGTH, SIGNATURE_LENGTH,
};

const UNBOUNDED: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

impl WriteXdr for u32 {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        write_uint(out, *self);
        Ok(())
    }
}

impl ReadXdr for u32 {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        read_uint(buf)
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// `KEY_TYPE_ED25519`.
pub const KEY_TYPE_ED25519: i32 = 0;

/// A public key union. Ed25519 is the only arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519([u8; 32]),
}

/// Accounts are identified by their public key.
pub type AccountId = PublicKey;

impl PublicKey {
    /// The raw 32 key bytes.
    pub fn ed25519(&self) -> &[u8; 32] {
        match self {
            PublicKey::Ed25519(bytes) => bytes,
        }
    }
}

impl WriteXdr for PublicKey {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        match self {
            PublicKey::Ed25519(bytes) => {
                write_int(out, KEY_TYPE_ED25519);
                write_fixed_opaque(out, bytes);
            }
        }
        Ok(())
    }
}

impl ReadXdr for PublicKey {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        match read_int(buf)? {
            KEY_TYPE_ED25519 => Ok(PublicKey::Ed25519(read_fixed_opaque(buf)?)),
            value => Err(XdrError::InvalidDiscriminant {
                type_name: "PublicKeyType",
                value,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Assets and prices
// ---------------------------------------------------------------------------

/// Asset type discriminants.
pub const ASSET_TYPE_NATIVE: i32 = 0;
pub const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
pub const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlphaNum4 {
    pub asset_code: [u8; 4],
    pub issuer: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlphaNum12 {
    pub asset_code: [u8; 12],
    pub issuer: AccountId,
}

/// Wire form of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Asset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
}

impl WriteXdr for Asset {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        match self {
            Asset::Native => write_int(out, ASSET_TYPE_NATIVE),
            Asset::CreditAlphanum4(a) => {
                write_int(out, ASSET_TYPE_CREDIT_ALPHANUM4);
                write_fixed_opaque(out, &a.asset_code);
                a.issuer.write_xdr(out)?;
            }
            Asset::CreditAlphanum12(a) => {
                write_int(out, ASSET_TYPE_CREDIT_ALPHANUM12);
                write_fixed_opaque(out, &a.asset_code);
                a.issuer.write_xdr(out)?;
            }
        }
        Ok(())
    }
}

impl ReadXdr for Asset {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        match read_int(buf)? {
            ASSET_TYPE_NATIVE => Ok(Asset::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Asset::CreditAlphanum4(AlphaNum4 {
                asset_code: read_fixed_opaque(buf)?,
                issuer: AccountId::read_xdr(buf)?,
            })),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Asset::CreditAlphanum12(AlphaNum12 {
                asset_code: read_fixed_opaque(buf)?,
                issuer: AccountId::read_xdr(buf)?,
            })),
            value => Err(XdrError::InvalidDiscriminant {
                type_name: "AssetType",
                value,
            }),
        }
    }
}

/// Rational price `n / d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl WriteXdr for Price {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        write_int(out, self.n);
        write_int(out, self.d);
        Ok(())
    }
}

impl ReadXdr for Price {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Price {
            n: read_int(buf)?,
            d: read_int(buf)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Account types
// ---------------------------------------------------------------------------

/// The closed set of account types an account can be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum AccountType {
    AnonymousUser = 0,
    RegisteredUser = 1,
    Merchant = 2,
    DistributionAgent = 3,
    SettlementAgent = 4,
    ExchangeAgent = 5,
    Bank = 6,
    ScratchCard = 7,
    Commission = 8,
    GeneralAgent = 9,
}

impl AccountType {
    pub const ALL: [AccountType; 10] = [
        AccountType::AnonymousUser,
        AccountType::RegisteredUser,
        AccountType::Merchant,
        AccountType::DistributionAgent,
        AccountType::SettlementAgent,
        AccountType::ExchangeAgent,
        AccountType::Bank,
        AccountType::ScratchCard,
        AccountType::Commission,
        AccountType::GeneralAgent,
    ];

    /// Wire value.
    pub const fn value(self) -> i32 {
        self as i32
    }

    pub fn from_value(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.value() == value)
    }
}

impl TryFrom<i32> for AccountType {
    type Error = XdrError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(XdrError::InvalidDiscriminant {
            type_name: "AccountType",
            value,
        })
    }
}

// ---------------------------------------------------------------------------
// Operation records
// ---------------------------------------------------------------------------

/// Prepaid funding attached to a new scratch-card account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchCard {
    pub asset: Asset,
    pub amount: i64,
}

impl WriteXdr for ScratchCard {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.asset.write_xdr(out)?;
        write_hyper(out, self.amount);
        Ok(())
    }
}

impl ReadXdr for ScratchCard {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(ScratchCard {
            asset: Asset::read_xdr(buf)?,
            amount: read_hyper(buf)?,
        })
    }
}

/// Create a new account of a given type. The body is
/// `account_type` followed by an optional [`ScratchCard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountOp {
    pub destination: AccountId,
    pub account_type: AccountType,
    pub scratch_card: Option<ScratchCard>,
}

impl WriteXdr for CreateAccountOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.destination.write_xdr(out)?;
        write_int(out, self.account_type.value());
        write_option(out, &self.scratch_card)
    }
}

impl ReadXdr for CreateAccountOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(CreateAccountOp {
            destination: AccountId::read_xdr(buf)?,
            account_type: AccountType::try_from(read_int(buf)?)?,
            scratch_card: read_option(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOp {
    pub destination: AccountId,
    pub asset: Asset,
    pub amount: i64,
}

impl WriteXdr for PaymentOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.destination.write_xdr(out)?;
        self.asset.write_xdr(out)?;
        write_hyper(out, self.amount);
        Ok(())
    }
}

impl ReadXdr for PaymentOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(PaymentOp {
            destination: AccountId::read_xdr(buf)?,
            asset: Asset::read_xdr(buf)?,
            amount: read_hyper(buf)?,
        })
    }
}

/// Payment routed through an exchange agent to an account at another bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPaymentOp {
    pub exchange_agent: AccountId,
    pub destination_bank: AccountId,
    pub destination_account: AccountId,
    pub asset: Asset,
    pub amount: i64,
}

impl WriteXdr for ExternalPaymentOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.exchange_agent.write_xdr(out)?;
        self.destination_bank.write_xdr(out)?;
        self.destination_account.write_xdr(out)?;
        self.asset.write_xdr(out)?;
        write_hyper(out, self.amount);
        Ok(())
    }
}

impl ReadXdr for ExternalPaymentOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(ExternalPaymentOp {
            exchange_agent: AccountId::read_xdr(buf)?,
            destination_bank: AccountId::read_xdr(buf)?,
            destination_account: AccountId::read_xdr(buf)?,
            asset: Asset::read_xdr(buf)?,
            amount: read_hyper(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPaymentOp {
    pub send_asset: Asset,
    pub send_max: i64,
    pub destination: AccountId,
    pub dest_asset: Asset,
    pub dest_amount: i64,
    pub path: Vec<Asset>,
}

impl WriteXdr for PathPaymentOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.send_asset.write_xdr(out)?;
        write_hyper(out, self.send_max);
        self.destination.write_xdr(out)?;
        self.dest_asset.write_xdr(out)?;
        write_hyper(out, self.dest_amount);
        write_array(out, &self.path, MAX_PATH_LENGTH as u32)
    }
}

impl ReadXdr for PathPaymentOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(PathPaymentOp {
            send_asset: Asset::read_xdr(buf)?,
            send_max: read_hyper(buf)?,
            destination: AccountId::read_xdr(buf)?,
            dest_asset: Asset::read_xdr(buf)?,
            dest_amount: read_hyper(buf)?,
            path: read_array(buf, MAX_PATH_LENGTH as u32)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
    /// Zero creates a new offer.
    pub offer_id: u64,
}

impl WriteXdr for ManageOfferOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.selling.write_xdr(out)?;
        self.buying.write_xdr(out)?;
        write_hyper(out, self.amount);
        self.price.write_xdr(out)?;
        write_uhyper(out, self.offer_id);
        Ok(())
    }
}

impl ReadXdr for ManageOfferOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(ManageOfferOp {
            selling: Asset::read_xdr(buf)?,
            buying: Asset::read_xdr(buf)?,
            amount: read_hyper(buf)?,
            price: Price::read_xdr(buf)?,
            offer_id: read_uhyper(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePassiveOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
}

impl WriteXdr for CreatePassiveOfferOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.selling.write_xdr(out)?;
        self.buying.write_xdr(out)?;
        write_hyper(out, self.amount);
        self.price.write_xdr(out)
    }
}

impl ReadXdr for CreatePassiveOfferOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(CreatePassiveOfferOp {
            selling: Asset::read_xdr(buf)?,
            buying: Asset::read_xdr(buf)?,
            amount: read_hyper(buf)?,
            price: Price::read_xdr(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    pub pub_key: AccountId,
    pub weight: u32,
    pub signer_type: u32,
}

impl WriteXdr for Signer {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.pub_key.write_xdr(out)?;
        write_uint(out, self.weight);
        write_uint(out, self.signer_type);
        Ok(())
    }
}

impl ReadXdr for Signer {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Signer {
            pub_key: AccountId::read_xdr(buf)?,
            weight: read_uint(buf)?,
            signer_type: read_uint(buf)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptionsOp {
    pub inflation_dest: Option<AccountId>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub med_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<String>,
    pub signer: Option<Signer>,
}

impl WriteXdr for SetOptionsOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        write_option(out, &self.inflation_dest)?;
        write_option(out, &self.clear_flags)?;
        write_option(out, &self.set_flags)?;
        write_option(out, &self.master_weight)?;
        write_option(out, &self.low_threshold)?;
        write_option(out, &self.med_threshold)?;
        write_option(out, &self.high_threshold)?;
        match &self.home_domain {
            Some(domain) => {
                write_bool(out, true);
                write_string(out, domain, MAX_HOME_DOMAIN_LENGTH as u32)?;
            }
            None => write_bool(out, false),
        }
        write_option(out, &self.signer)
    }
}

impl ReadXdr for SetOptionsOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(SetOptionsOp {
            inflation_dest: read_option(buf)?,
            clear_flags: read_option(buf)?,
            set_flags: read_option(buf)?,
            master_weight: read_option(buf)?,
            low_threshold: read_option(buf)?,
            med_threshold: read_option(buf)?,
            high_threshold: read_option(buf)?,
            home_domain: if read_bool(buf)? {
                Some(read_string(buf, MAX_HOME_DOMAIN_LENGTH as u32)?)
            } else {
                None
            },
            signer: read_option(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTrustOp {
    pub line: Asset,
    /// Zero removes the trust line.
    pub limit: i64,
}

impl WriteXdr for ChangeTrustOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.line.write_xdr(out)?;
        write_hyper(out, self.limit);
        Ok(())
    }
}

impl ReadXdr for ChangeTrustOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(ChangeTrustOp {
            line: Asset::read_xdr(buf)?,
            limit: read_hyper(buf)?,
        })
    }
}

/// Asset code of an allow-trust operation. The issuer is implied by the
/// operation source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowTrustAsset {
    CreditAlphanum4([u8; 4]),
    CreditAlphanum12([u8; 12]),
}

impl AllowTrustAsset {
    /// Code bytes including NUL padding.
    pub fn code_bytes(&self) -> &[u8] {
        match self {
            AllowTrustAsset::CreditAlphanum4(code) => code,
            AllowTrustAsset::CreditAlphanum12(code) => code,
        }
    }
}

impl WriteXdr for AllowTrustAsset {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        match self {
            AllowTrustAsset::CreditAlphanum4(code) => {
                write_int(out, ASSET_TYPE_CREDIT_ALPHANUM4);
                write_fixed_opaque(out, code);
            }
            AllowTrustAsset::CreditAlphanum12(code) => {
                write_int(out, ASSET_TYPE_CREDIT_ALPHANUM12);
                write_fixed_opaque(out, code);
            }
        }
        Ok(())
    }
}

impl ReadXdr for AllowTrustAsset {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        match read_int(buf)? {
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(AllowTrustAsset::CreditAlphanum4(read_fixed_opaque(buf)?)),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(AllowTrustAsset::CreditAlphanum12(read_fixed_opaque(buf)?)),
            value => Err(XdrError::InvalidDiscriminant {
                type_name: "AllowTrustAsset",
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowTrustOp {
    pub trustor: AccountId,
    pub asset: AllowTrustAsset,
    pub authorize: bool,
}

impl WriteXdr for AllowTrustOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        self.trustor.write_xdr(out)?;
        self.asset.write_xdr(out)?;
        write_bool(out, self.authorize);
        Ok(())
    }
}

impl ReadXdr for AllowTrustOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(AllowTrustOp {
            trustor: AccountId::read_xdr(buf)?,
            asset: AllowTrustAsset::read_xdr(buf)?,
            authorize: read_bool(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageDataOp {
    pub data_name: String,
    /// `None` deletes the entry.
    pub data_value: Option<Vec<u8>>,
}

impl WriteXdr for ManageDataOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        write_string(out, &self.data_name, MAX_DATA_NAME_LENGTH as u32)?;
        match &self.data_value {
            Some(value) => {
                write_bool(out, true);
                write_var_opaque(out, value, MAX_DATA_VALUE_LENGTH as u32)
            }
            None => {
                write_bool(out, false);
                Ok(())
            }
        }
    }
}

impl ReadXdr for ManageDataOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        let data_name = read_string(buf, MAX_DATA_NAME_LENGTH as u32)?;
        let data_value = if read_bool(buf)? {
            Some(read_var_opaque(buf, MAX_DATA_VALUE_LENGTH as u32)?)
        } else {
            None
        };
        Ok(ManageDataOp {
            data_name,
            data_value,
        })
    }
}

/// Governance action carried as JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministrativeOp {
    pub op_data: String,
}

impl WriteXdr for AdministrativeOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        write_string(out, &self.op_data, UNBOUNDED)
    }
}

impl ReadXdr for AdministrativeOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(AdministrativeOp {
            op_data: read_string(buf, UNBOUNDED)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReversalOp {
    pub payment_id: i64,
    pub payment_source: AccountId,
    pub asset: Asset,
    pub amount: i64,
    pub commission_amount: i64,
}

impl WriteXdr for PaymentReversalOp {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        write_hyper(out, self.payment_id);
        self.payment_source.write_xdr(out)?;
        self.asset.write_xdr(out)?;
        write_hyper(out, self.amount);
        write_hyper(out, self.commission_amount);
        Ok(())
    }
}

impl ReadXdr for PaymentReversalOp {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(PaymentReversalOp {
            payment_id: read_hyper(buf)?,
            payment_source: AccountId::read_xdr(buf)?,
            asset: Asset::read_xdr(buf)?,
            amount: read_hyper(buf)?,
            commission_amount: read_hyper(buf)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// Operation kinds and their union discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum OperationType {
    CreateAccount = 0,
    Payment = 1,
    PathPayment = 2,
    ManageOffer = 3,
    CreatePassiveOffer = 4,
    SetOptions = 5,
    ChangeTrust = 6,
    AllowTrust = 7,
    AccountMerge = 8,
    Inflation = 9,
    ManageData = 10,
    Administrative = 11,
    PaymentReversal = 12,
    ExternalPayment = 13,
}

impl OperationType {
    /// Name used in decoded operation objects.
    pub const fn name(self) -> &'static str {
        match self {
            OperationType::CreateAccount => "createAccount",
            OperationType::Payment => "payment",
            OperationType::PathPayment => "pathPayment",
            OperationType::ManageOffer => "manageOffer",
            OperationType::CreatePassiveOffer => "createPassiveOffer",
            OperationType::SetOptions => "setOptions",
            OperationType::ChangeTrust => "changeTrust",
            OperationType::AllowTrust => "allowTrust",
            OperationType::AccountMerge => "accountMerge",
            OperationType::Inflation => "inflation",
            OperationType::ManageData => "manageData",
            OperationType::Administrative => "administrative",
            OperationType::PaymentReversal => "paymentReversal",
            OperationType::ExternalPayment => "externalPayment",
        }
    }
}

/// The operation union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationBody {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    PathPayment(PathPaymentOp),
    ManageOffer(ManageOfferOp),
    CreatePassiveOffer(CreatePassiveOfferOp),
    SetOptions(SetOptionsOp),
    ChangeTrust(ChangeTrustOp),
    AllowTrust(AllowTrustOp),
    AccountMerge(AccountId),
    Inflation,
    ManageData(ManageDataOp),
    Administrative(AdministrativeOp),
    PaymentReversal(PaymentReversalOp),
    ExternalPayment(ExternalPaymentOp),
}

impl OperationBody {
    pub fn kind(&self) -> OperationType {
        match self {
            OperationBody::CreateAccount(_) => OperationType::CreateAccount,
            OperationBody::Payment(_) => OperationType::Payment,
            OperationBody::PathPayment(_) => OperationType::PathPayment,
            OperationBody::ManageOffer(_) => OperationType::ManageOffer,
            OperationBody::CreatePassiveOffer(_) => OperationType::CreatePassiveOffer,
            OperationBody::SetOptions(_) => OperationType::SetOptions,
            OperationBody::ChangeTrust(_) => OperationType::ChangeTrust,
            OperationBody::AllowTrust(_) => OperationType::AllowTrust,
            OperationBody::AccountMerge(_) => OperationType::AccountMerge,
            OperationBody::Inflation => OperationType::Inflation,
            OperationBody::ManageData(_) => OperationType::ManageData,
            OperationBody::Administrative(_) => OperationType::Administrative,
            OperationBody::PaymentReversal(_) => OperationType::PaymentReversal,
            OperationBody::ExternalPayment(_) => OperationType::ExternalPayment,
        }
    }
}

impl WriteXdr for OperationBody {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        write_int(out, self.kind() as i32);
        match self {
            OperationBody::CreateAccount(op) => op.write_xdr(out),
            OperationBody::Payment(op) => op.write_xdr(out),
            OperationBody::PathPayment(op) => op.write_xdr(out),
            OperationBody::ManageOffer(op) => op.write_xdr(out),
            OperationBody::CreatePassiveOffer(op) => op.write_xdr(out),
            OperationBody::SetOptions(op) => op.write_xdr(out),
            OperationBody::ChangeTrust(op) => op.write_xdr(out),
            OperationBody::AllowTrust(op) => op.write_xdr(out),
            OperationBody::AccountMerge(destination) => destination.write_xdr(out),
            OperationBody::Inflation => Ok(()),
            OperationBody::ManageData(op) => op.write_xdr(out),
            OperationBody::Administrative(op) => op.write_xdr(out),
            OperationBody::PaymentReversal(op) => op.write_xdr(out),
            OperationBody::ExternalPayment(op) => op.write_xdr(out),
        }
    }
}

impl ReadXdr for OperationBody {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        let body = match read_int(buf)? {
            0 => OperationBody::CreateAccount(CreateAccountOp::read_xdr(buf)?),
            1 => OperationBody::Payment(PaymentOp::read_xdr(buf)?),
            2 => OperationBody::PathPayment(PathPaymentOp::read_xdr(buf)?),
            3 => OperationBody::ManageOffer(ManageOfferOp::read_xdr(buf)?),
            4 => OperationBody::CreatePassiveOffer(CreatePassiveOfferOp::read_xdr(buf)?),
            5 => OperationBody::SetOptions(SetOptionsOp::read_xdr(buf)?),
            6 => OperationBody::ChangeTrust(ChangeTrustOp::read_xdr(buf)?),
            7 => OperationBody::AllowTrust(AllowTrustOp::read_xdr(buf)?),
            8 => OperationBody::AccountMerge(AccountId::read_xdr(buf)?),
            9 => OperationBody::Inflation,
            10 => OperationBody::ManageData(ManageDataOp::read_xdr(buf)?),
            11 => OperationBody::Administrative(AdministrativeOp::read_xdr(buf)?),
            12 => OperationBody::PaymentReversal(PaymentReversalOp::read_xdr(buf)?),
            13 => OperationBody::ExternalPayment(ExternalPaymentOp::read_xdr(buf)?),
            value => {
                return Err(XdrError::InvalidDiscriminant {
                    type_name: "OperationType",
                    value,
                })
            }
        };
        Ok(body)
    }
}

/// One operation: an optional source override plus the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub source_account: Option<AccountId>,
    pub body: OperationBody,
}

impl WriteXdr for Operation {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        write_option(out, &self.source_account)?;
        self.body.write_xdr(out)
    }
}

impl ReadXdr for Operation {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Operation {
            source_account: read_option(buf)?,
            body: OperationBody::read_xdr(buf)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// A signature tagged with the signer's 4-byte hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedSignature {
    pub hint: [u8; SIGNATURE_HINT_LENGTH],
    pub signature: Vec<u8>,
}

impl WriteXdr for DecoratedSignature {
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError> {
        write_fixed_opaque(out, &self.hint);
        write_var_opaque(out, &self.signature, SIGNATURE_LENGTH as u32)
    }
}

impl ReadXdr for DecoratedSignature {
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(DecoratedSignature {
            hint: read_fixed_opaque(buf)?,
            signature: read_var_opaque(buf, SIGNATURE_LENGTH as u32)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> AccountId {
        PublicKey::Ed25519([byte; 32])
    }

    #[test]
    fn account_id_layout() {
        let bytes = key(0xab).to_xdr_bytes().unwrap();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..], &[0xab; 32]);
    }

    #[test]
    fn credit_asset_layout() {
        let asset = Asset::CreditAlphanum4(AlphaNum4 {
            asset_code: *b"USD\0",
            issuer: key(1),
        });
        let bytes = asset.to_xdr_bytes().unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 0, 1]);
        assert_eq!(&bytes[4..8], b"USD\0");
        assert_eq!(bytes.len(), 4 + 4 + 36);
        assert_eq!(Asset::from_xdr_bytes(&bytes).unwrap(), asset);
    }

    #[test]
    fn inflation_operation_is_eight_bytes() {
        let op = Operation {
            source_account: None,
            body: OperationBody::Inflation,
        };
        assert_eq!(op.to_xdr_bytes().unwrap(), vec![0, 0, 0, 0, 0, 0, 0, 9]);
    }

    #[test]
    fn discriminants_match_wire_table() {
        let body = OperationBody::ExternalPayment(ExternalPaymentOp {
            exchange_agent: key(1),
            destination_bank: key(2),
            destination_account: key(3),
            asset: Asset::Native,
            amount: 5,
        });
        let bytes = body.to_xdr_bytes().unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 0, 13]);

        let admin = OperationBody::Administrative(AdministrativeOp {
            op_data: "{}".into(),
        });
        assert_eq!(&admin.to_xdr_bytes().unwrap()[..4], &[0, 0, 0, 11]);
        assert_eq!(OperationType::PaymentReversal as i32, 12);
    }

    #[test]
    fn unknown_operation_discriminant_is_reported() {
        let bytes = [0u8, 0, 0, 0, 0, 0, 0, 42];
        assert_eq!(
            Operation::from_xdr_bytes(&bytes),
            Err(XdrError::InvalidDiscriminant {
                type_name: "OperationType",
                value: 42
            })
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let bytes = [0u8, 0, 0, 0, 0, 0, 0, 9, 0, 0, 0, 0];
        assert_eq!(Operation::from_xdr_bytes(&bytes), Err(XdrError::TrailingBytes(4)));
    }

    #[test]
    fn create_account_with_scratch_card() {
        let op = CreateAccountOp {
            destination: key(4),
            account_type: AccountType::ScratchCard,
            scratch_card: Some(ScratchCard {
                asset: Asset::Native,
                amount: 10_000_000,
            }),
        };
        let bytes = op.to_xdr_bytes().unwrap();
        // destination, account_type, present flag, native asset, amount
        assert_eq!(bytes.len(), 36 + 4 + 4 + 4 + 8);
        assert_eq!(&bytes[36..40], &[0, 0, 0, 7]);
        assert_eq!(CreateAccountOp::from_xdr_bytes(&bytes).unwrap(), op);
    }

    #[test]
    fn unknown_account_type_is_rejected() {
        let mut bytes = key(4).to_xdr_bytes().unwrap();
        bytes.extend_from_slice(&[0, 0, 0, 99, 0, 0, 0, 0]);
        assert!(matches!(
            CreateAccountOp::from_xdr_bytes(&bytes),
            Err(XdrError::InvalidDiscriminant {
                type_name: "AccountType",
                value: 99
            })
        ));
    }

    #[test]
    fn path_longer_than_five_is_rejected() {
        let op = PathPaymentOp {
            send_asset: Asset::Native,
            send_max: 1,
            destination: key(2),
            dest_asset: Asset::Native,
            dest_amount: 1,
            path: vec![Asset::Native; 6],
        };
        assert!(matches!(
            op.to_xdr_bytes(),
            Err(XdrError::LengthExceeded { max: 5, got: 6 })
        ));
    }

    #[test]
    fn set_options_round_trips_through_base64() {
        let op = SetOptionsOp {
            master_weight: Some(1),
            home_domain: Some("example.com".into()),
            signer: Some(Signer {
                pub_key: key(9),
                weight: 2,
                signer_type: 1,
            }),
            ..Default::default()
        };
        let text = op.to_xdr_base64().unwrap();
        assert_eq!(SetOptionsOp::from_xdr_base64(&text).unwrap(), op);
    }

    #[test]
    fn bad_base64_is_reported() {
        assert!(matches!(
            Operation::from_xdr_base64("***"),
            Err(XdrError::InvalidBase64(_))
        ));
    }

    #[test]
    fn decorated_signature_caps_length() {
        let sig = DecoratedSignature {
            hint: [1, 2, 3, 4],
            signature: vec![0; 65],
        };
        assert!(sig.to_xdr_bytes().is_err());
    }
}
