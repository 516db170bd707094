use proptest::prelude::*;

use bsv_script::address::{Address, Network};
use bsv_script::chunk::{decode_script, encode_push_datas};
use bsv_script::Script;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pushes_decode_to_their_payloads(
        parts in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..600), 0..6)
    ) {
        let refs: Vec<&[u8]> = parts.iter().map(|p| p.as_slice()).collect();
        let encoded = encode_push_datas(&refs).unwrap();
        let chunks = decode_script(&encoded).unwrap();
        // Zero-length pushes decode as a bare OP_0.
        let decoded: Vec<Vec<u8>> = chunks.into_iter().map(|c| c.data.unwrap_or_default()).collect();
        prop_assert_eq!(decoded, parts);
    }

    #[test]
    fn address_resolves_to_matching_lock(hash in prop::array::uniform20(any::<u8>()), mainnet in any::<bool>()) {
        let network = if mainnet { Network::Mainnet } else { Network::Testnet };
        let addr = Address::from_public_key_hash(&hash, network);
        let parsed = Address::from_string(&addr.to_string()).unwrap();
        prop_assert_eq!(&parsed, &addr);

        let lock = parsed.locking_script();
        prop_assert!(lock.is_p2pkh());
        prop_assert_eq!(lock.public_key_hash().unwrap(), hash);
    }

    #[test]
    fn script_hex_roundtrip(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let script = Script::from_bytes(&data);
        let again = Script::from_hex(&script.to_hex()).unwrap();
        prop_assert_eq!(script, again);
    }
}
