// Operation benchmarks for ledger-base.
//
// Covers building, encoding and decoding operations, plus the amount and
// price conversions every builder leans on.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use ledger_base::crypto::Keypair;
use ledger_base::transaction::{
    best_r, decode_operation, to_network_amount, Asset, ManageOfferOpts, Operation,
    PathPaymentOpts, PaymentOpts, PriceInput,
};
use ledger_base::xdr::WriteXdr;
use rust_decimal::Decimal;
use std::str::FromStr;

fn account(label: u8) -> String {
    Keypair::from_raw_seed(&[label; 32]).account_id()
}

fn bench_build_payment(c: &mut Criterion) {
    let opts = PaymentOpts {
        destination: account(1),
        asset: Asset::new("USD", &account(2)).unwrap(),
        amount: "1250.75".into(),
        source: Some(account(3)),
    };

    c.bench_function("operation/build_payment", |b| {
        b.iter(|| Operation::payment(&opts).unwrap());
    });
}

fn bench_encode_decode(c: &mut Criterion) {
    let usd = Asset::new("USD", &account(2)).unwrap();
    let mut group = c.benchmark_group("operation/path_payment");

    for hops in [0usize, 2, 5] {
        let op = Operation::path_payment(&PathPaymentOpts {
            send_asset: Asset::native(),
            send_max: "100".into(),
            destination: account(1),
            dest_asset: usd.clone(),
            dest_amount: "95".into(),
            path: vec![usd.clone(); hops],
            source: None,
        })
        .unwrap();
        let bytes = op.to_xdr_bytes().unwrap();

        group.bench_with_input(BenchmarkId::new("encode", hops), &op, |b, op| {
            b.iter(|| op.to_xdr_bytes().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decode", hops), &bytes, |b, bytes| {
            b.iter(|| decode_operation(bytes).unwrap());
        });
    }

    group.finish();
}

fn bench_manage_offer_with_decimal_price(c: &mut Criterion) {
    let opts = ManageOfferOpts {
        selling: Asset::native(),
        buying: Asset::new("EUR", &account(2)).unwrap(),
        amount: "10".into(),
        price: PriceInput::Decimal("3.14159265358979".into()),
        offer_id: None,
        source: None,
    };

    c.bench_function("operation/build_manage_offer", |b| {
        b.iter(|| Operation::manage_offer(&opts).unwrap());
    });
}

fn bench_conversions(c: &mut Criterion) {
    let pi = Decimal::from_str("3.14159265358979").unwrap();

    c.bench_function("amount/to_network_amount", |b| {
        b.iter(|| to_network_amount("922337203685.4775807").unwrap());
    });
    c.bench_function("price/best_r", |b| {
        b.iter(|| best_r(pi).unwrap());
    });
}

criterion_group!(
    benches,
    bench_build_payment,
    bench_encode_decode,
    bench_manage_offer_with_decimal_price,
    bench_conversions,
);
criterion_main!(benches);
