//! Operation decoding: wire records back to option records.

use tracing::debug;

use super::amount::from_network_amount;
use super::asset::{trim_code, Asset};
use super::operation::OperationError;
use super::price::from_price;
use super::types::*;
use crate::identity::strkey;
use crate::xdr::{AccountId, Operation, OperationBody, ReadXdr, XdrError};

fn account_text(key: &AccountId) -> String {
    strkey::encode_account_id(key.ed25519())
}

fn asset(asset: &crate::xdr::Asset) -> Result<Asset, OperationError> {
    Ok(Asset::from_xdr_object(asset)?)
}

fn unknown_kind(err: XdrError) -> OperationError {
    match err {
        XdrError::InvalidDiscriminant {
            type_name: "OperationType",
            value,
        } => OperationError::UnknownOperation(value),
        other => OperationError::Xdr(other),
    }
}

/// Parse an encoded operation and convert it to its option record.
pub fn decode_operation(bytes: &[u8]) -> Result<OperationOptions, OperationError> {
    let operation = Operation::from_xdr_bytes(bytes).map_err(unknown_kind)?;
    operation_to_object(&operation)
}

/// Same as [`decode_operation`] for base64 text.
pub fn decode_operation_base64(encoded: &str) -> Result<OperationOptions, OperationError> {
    let operation = Operation::from_xdr_base64(encoded).map_err(unknown_kind)?;
    operation_to_object(&operation)
}

/// Convert a wire operation back to the record that would build it.
///
/// Account keys come back as `G...` text, amounts as normalized decimal
/// text, prices as [`PriceInput::Decimal`], allow-trust codes without their
/// NUL padding and data values as bytes. Defaults the builders fill in
/// (offer ID, trust limit) come back explicit.
pub fn operation_to_object(operation: &Operation) -> Result<OperationOptions, OperationError> {
    let source = operation.source_account.as_ref().map(account_text);
    debug!(
        kind = operation.body.kind().name(),
        has_source = source.is_some(),
        "operation decoded"
    );

    let options = match &operation.body {
        OperationBody::CreateAccount(op) => OperationOptions::CreateAccount(CreateAccountOpts {
            destination: account_text(&op.destination),
            account_type: op.account_type.value(),
            funding: op
                .scratch_card
                .as_ref()
                .map(|card| -> Result<Funding, OperationError> {
                    Ok(Funding {
                        asset: asset(&card.asset)?,
                        amount: from_network_amount(card.amount),
                    })
                })
                .transpose()?,
            source,
        }),
        OperationBody::Payment(op) => OperationOptions::Payment(PaymentOpts {
            destination: account_text(&op.destination),
            asset: asset(&op.asset)?,
            amount: from_network_amount(op.amount),
            source,
        }),
        OperationBody::ExternalPayment(op) => OperationOptions::ExternalPayment(ExternalPaymentOpts {
            exchange_agent: account_text(&op.exchange_agent),
            destination_bank: account_text(&op.destination_bank),
            destination_account: account_text(&op.destination_account),
            asset: asset(&op.asset)?,
            amount: from_network_amount(op.amount),
            source,
        }),
        OperationBody::PathPayment(op) => OperationOptions::PathPayment(PathPaymentOpts {
            send_asset: asset(&op.send_asset)?,
            send_max: from_network_amount(op.send_max),
            destination: account_text(&op.destination),
            dest_asset: asset(&op.dest_asset)?,
            dest_amount: from_network_amount(op.dest_amount),
            path: op.path.iter().map(asset).collect::<Result<_, _>>()?,
            source,
        }),
        OperationBody::ManageOffer(op) => OperationOptions::ManageOffer(ManageOfferOpts {
            selling: asset(&op.selling)?,
            buying: asset(&op.buying)?,
            amount: from_network_amount(op.amount),
            price: PriceInput::Decimal(from_price(&op.price)?),
            offer_id: Some(op.offer_id),
            source,
        }),
        OperationBody::CreatePassiveOffer(op) => {
            OperationOptions::CreatePassiveOffer(CreatePassiveOfferOpts {
                selling: asset(&op.selling)?,
                buying: asset(&op.buying)?,
                amount: from_network_amount(op.amount),
                price: PriceInput::Decimal(from_price(&op.price)?),
                source,
            })
        }
        OperationBody::SetOptions(op) => {
            let int = |v: Option<u32>| v.map(NumericInput::from);
            OperationOptions::SetOptions(SetOptionsOpts {
                inflation_dest: op.inflation_dest.as_ref().map(account_text),
                clear_flags: int(op.clear_flags),
                set_flags: int(op.set_flags),
                master_weight: int(op.master_weight),
                low_threshold: int(op.low_threshold),
                med_threshold: int(op.med_threshold),
                high_threshold: int(op.high_threshold),
                home_domain: op.home_domain.clone(),
                signer: op.signer.as_ref().map(|signer| SignerOpts {
                    pub_key: account_text(&signer.pub_key),
                    weight: NumericInput::from(signer.weight),
                    signer_type: signer.signer_type,
                }),
                source,
            })
        }
        OperationBody::ChangeTrust(op) => OperationOptions::ChangeTrust(ChangeTrustOpts {
            asset: asset(&op.line)?,
            limit: Some(from_network_amount(op.limit)),
            source,
        }),
        OperationBody::AllowTrust(op) => OperationOptions::AllowTrust(AllowTrustOpts {
            trustor: account_text(&op.trustor),
            asset_code: trim_code(op.asset.code_bytes())?,
            authorize: op.authorize,
            source,
        }),
        OperationBody::AccountMerge(destination) => {
            OperationOptions::AccountMerge(AccountMergeOpts {
                destination: account_text(destination),
                source,
            })
        }
        OperationBody::Inflation => OperationOptions::Inflation(InflationOpts { source }),
        OperationBody::ManageData(op) => OperationOptions::ManageData(ManageDataOpts {
            name: op.data_name.clone(),
            value: op.data_value.clone().map(DataValue::Bytes),
            source,
        }),
        OperationBody::Administrative(op) => OperationOptions::Administrative(AdministrativeOpts {
            op_data: op.op_data.clone(),
            source,
        }),
        OperationBody::PaymentReversal(op) => OperationOptions::PaymentReversal(PaymentReversalOpts {
            payment_source: account_text(&op.payment_source),
            asset: asset(&op.asset)?,
            amount: from_network_amount(op.amount),
            commission_amount: from_network_amount(op.commission_amount),
            payment_id: op.payment_id,
            source,
        }),
    };
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{write_int, WriteXdr};
    use bytes::BytesMut;

    const DEST: &str = "GDLVVGABQKYQVN6VJP7NHSLEA45A5YLS6PNKMIZFV4BBU2HXA5IRVHUR";
    const ISSUER: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

    #[test]
    fn payment_decodes_with_source() {
        let opts = OperationOptions::Payment(PaymentOpts {
            destination: DEST.into(),
            asset: Asset::new("USD", ISSUER).unwrap(),
            amount: "12.5000000".into(),
            source: Some(ISSUER.into()),
        });
        let op = Operation::from_options(&opts).unwrap();
        let decoded = decode_operation(&op.to_xdr_bytes().unwrap()).unwrap();
        match decoded {
            OperationOptions::Payment(p) => {
                assert_eq!(p.amount, "12.5");
                assert_eq!(p.destination, DEST);
                assert_eq!(p.source.as_deref(), Some(ISSUER));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn manage_offer_normalizes_defaults() {
        let opts = ManageOfferOpts {
            selling: Asset::native(),
            buying: Asset::new("EUR", ISSUER).unwrap(),
            amount: "3".into(),
            price: PriceInput::Ratio { n: 5, d: 4 },
            offer_id: None,
            source: None,
        };
        let op = Operation::manage_offer(&opts).unwrap();
        match operation_to_object(&op).unwrap() {
            OperationOptions::ManageOffer(o) => {
                assert_eq!(o.offer_id, Some(0));
                assert_eq!(o.price, PriceInput::Decimal("1.25".into()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn allow_trust_code_is_trimmed() {
        let op = Operation::allow_trust(&AllowTrustOpts {
            trustor: DEST.into(),
            asset_code: "ABCDE".into(),
            authorize: false,
            source: None,
        })
        .unwrap();
        match operation_to_object(&op).unwrap() {
            OperationOptions::AllowTrust(o) => assert_eq!(o.asset_code, "ABCDE"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn manage_data_value_comes_back_as_bytes() {
        let op = Operation::manage_data(&ManageDataOpts {
            name: "k".into(),
            value: Some(DataValue::Text("v".into())),
            source: None,
        })
        .unwrap();
        match operation_to_object(&op).unwrap() {
            OperationOptions::ManageData(o) => {
                assert_eq!(o.value, Some(DataValue::Bytes(b"v".to_vec())))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn change_trust_limit_is_explicit() {
        let op = Operation::change_trust(&ChangeTrustOpts {
            asset: Asset::new("USD", ISSUER).unwrap(),
            limit: None,
            source: None,
        })
        .unwrap();
        match operation_to_object(&op).unwrap() {
            OperationOptions::ChangeTrust(o) => {
                assert_eq!(o.limit.as_deref(), Some(crate::config::MAX_INT64_AMOUNT))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_discriminant() {
        let mut out = BytesMut::new();
        write_int(&mut out, 0); // no source
        write_int(&mut out, 99);
        assert_eq!(
            decode_operation(&out),
            Err(OperationError::UnknownOperation(99))
        );
    }

    #[test]
    fn truncated_input_is_a_codec_error() {
        let op = Operation::inflation(&InflationOpts::default()).unwrap();
        let bytes = op.to_xdr_bytes().unwrap();
        assert!(matches!(
            decode_operation(&bytes[..bytes.len() - 1]),
            Err(OperationError::Xdr(_))
        ));
    }

    #[test]
    fn base64_entry_point() {
        let op = Operation::inflation(&InflationOpts::default()).unwrap();
        let decoded = decode_operation_base64(&op.to_xdr_base64().unwrap()).unwrap();
        assert_eq!(decoded, OperationOptions::Inflation(InflationOpts::default()));
        assert!(matches!(
            decode_operation_base64("***"),
            Err(OperationError::Xdr(XdrError::InvalidBase64(_)))
        ));
    }
}
