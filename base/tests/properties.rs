//! Property-based tests for the identifier codecs and amount conversion.

use data_encoding::BASE32_NOPAD;
use ledger_base::crypto::{crc16_checksum, Keypair};
use ledger_base::identity::strkey::{self, VersionByte};
use ledger_base::transaction::{from_network_amount, is_valid_amount, to_network_amount};
use proptest::{prelude::*, test_runner::Config};

fn role() -> impl Strategy<Value = VersionByte> {
    prop::sample::select(VersionByte::ALL.to_vec())
}

proptest! {
    #![proptest_config(Config {
        cases: 256, ..Config::default()
    })]

    /// Whatever goes in under a role comes back out under that role.
    #[test]
    fn prop_strkey_round_trip(role in role(), data in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = strkey::encode_check(role, &data);
        prop_assert_eq!(strkey::decode_check(role, &encoded).unwrap(), data);
        prop_assert_eq!(strkey::detect(&encoded).map(|(r, _)| r), Some(role));
    }

    /// Flipping any single bit of the payload, version or checksum is caught.
    #[test]
    fn prop_single_bit_corruption_never_decodes(key in any::<[u8; 32]>(), bit in 0usize..(35 * 8)) {
        let mut raw = vec![VersionByte::AccountId.byte()];
        raw.extend_from_slice(&key);
        let checksum = crc16_checksum(&raw);
        raw.extend_from_slice(&checksum);
        prop_assert_eq!(BASE32_NOPAD.encode(&raw), strkey::encode_account_id(&key));

        raw[bit / 8] ^= 1 << (bit % 8);
        let corrupted = BASE32_NOPAD.encode(&raw);
        prop_assert!(strkey::decode_account_id(&corrupted).is_err());
    }

    /// Every non-negative network integer survives text and back.
    #[test]
    fn prop_amount_round_trip(raw in 0i64..=i64::MAX) {
        let text = from_network_amount(raw);
        prop_assert!(is_valid_amount(&text, true));
        prop_assert_eq!(to_network_amount(&text).unwrap(), raw);
    }

    /// Fractional digits past the seventh are rejected, never rounded away,
    /// however far past `Decimal`'s own scale they run.
    #[test]
    fn prop_excess_fraction_digits_rejected(
        raw in 0i64..=i64::MAX / 2,
        extra in prop::collection::vec(0u8..10, 1..34),
        last in 1u8..10,
    ) {
        let mut text = from_network_amount(raw);
        if !text.contains('.') {
            text.push('.');
        }
        let fraction = text.len() - text.find('.').unwrap() - 1;
        text.extend(std::iter::repeat('0').take(7 - fraction));
        text.extend(extra.iter().map(|d| char::from(b'0' + d)));
        text.push(char::from(b'0' + last));

        prop_assert!(!is_valid_amount(&text, true), "{} accepted", text);
    }

    /// The same seed always yields the same keys, and the seed text restores them.
    #[test]
    fn prop_seed_determinism(seed in any::<[u8; 32]>()) {
        let a = Keypair::from_raw_seed(&seed);
        let b = Keypair::from_raw_seed(&seed);
        prop_assert_eq!(a.account_id(), b.account_id());
        prop_assert_eq!(a.raw_public_key(), b.raw_public_key());

        let restored = Keypair::from_seed(&a.seed().unwrap()).unwrap();
        prop_assert_eq!(&restored, &a);
        prop_assert_eq!(a.sign(b"msg").unwrap(), restored.sign(b"msg").unwrap());
    }
}
