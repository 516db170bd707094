//! Tests for the bsv-transaction crate.
//!
//! Covers a known mainnet-format transaction (parse, txid, signature check)
//! and end-to-end assembly and building against that transaction's outputs.

use bsv_primitives::ec::{PrivateKey, PublicKey, Signature};
use bsv_script::{Address, Network, Script};

use crate::assembler::{assemble, assemble_with_scheme, sign_transaction};
use crate::builder::TransactionBuilder;
use crate::fee::{estimate_size, KeyFormat};
use crate::message::Message;
use crate::output::OutputRequest;
use crate::selection::{PaymentRequest, SelectionPolicy};
use crate::sighash::{signature_hash, SighashScheme};
use crate::template::p2pkh::P2PKH;
use crate::template::TransactionSigner;
use crate::transaction::Transaction;
use crate::txid::calc_txid;
use crate::unspent::Unspent;

// -----------------------------------------------------------------------
// Test vectors
// -----------------------------------------------------------------------

/// One uncompressed-key P2PKH input, two outputs, signed with ALL|FORKID.
const FINAL_TX_1: &str = concat!(
    "01000000018878399d83ec25c627cfbf753ff9ca3602373eac437ab2676154a",
    "3c2da23adf3010000008a47304402204d6f28d77fa31cfc6c13bb1bda2628f2",
    "237e2630e892dc62bb319eb75dc7f9310220741f4df7d9460daa844389eb23f",
    "b318dd674967144eb89477608b10e03c175034141043d5c2875c9bd116875a7",
    "1a5db64cffcb13396b163d039b1d932782489180433476a4352a2add00ebb0d",
    "5c94c515b72eb10f1fd8f3f03b42f4a2b255bfc9aa9e3ffffffff0250c30000",
    "000000001976a914e7c1345fc8f87c68170b3aa798a956c2fe6a9eff88ac088",
    "8fc04000000001976a91492461bde6283b461ece7ddf4dbf1e0a48bd113d888",
    "ac00000000"
);

const FINAL_TX_1_TXID: &str = "64637ffb0d36003eccbb0317dee000ac8a2744cbea3b8a4c3a477c132bb8ca69";

const SOURCE_TXID: &str = "f3ad23dac2a3546167b27a43ac3e370236caf93f75bfcf27c625ec839d397888";
const SOURCE_AMOUNT: u64 = 83727960;

const PAYEE: &str = "n2eMqTT929pb1RDNuqEnxdaLau1rxy3efi";
const CHANGE: &str = "mtrNwJxS1VyHYn3qBY1Qfsm3K3kh1mGRMS";

/// Sequence, output count, outputs and locktime: everything after the scriptSig.
const FINAL_TX_1_TAIL: &str = concat!(
    "ffffffff02",
    "50c30000000000001976a914e7c1345fc8f87c68170b3aa798a956c2fe6a9eff88ac",
    "0888fc04000000001976a91492461bde6283b461ece7ddf4dbf1e0a48bd113d888ac",
    "00000000"
);

/// Version, input count and outpoint: everything before the scriptSig.
const FINAL_TX_1_HEAD: &str = concat!(
    "0100000001",
    "8878399d83ec25c627cfbf753ff9ca3602373eac437ab2676154a3c2da23adf3",
    "01000000"
);

fn unspents() -> Vec<Unspent> {
    vec![Unspent::new(SOURCE_AMOUNT, 15, Script::new(), SOURCE_TXID, 1)]
}

fn outputs() -> Vec<OutputRequest> {
    vec![
        OutputRequest::value(Address::from_string(PAYEE).unwrap(), 50000),
        OutputRequest::value(Address::from_string(CHANGE).unwrap(), 83658760),
    ]
}

fn signer(format: KeyFormat) -> P2PKH {
    let key = PrivateKey::from_hex("c28a9f80738f770d527803a566cf6fc3edf6cea586c4fc4a5223a5ad797e1ac3")
        .expect("valid key");
    P2PKH::new(key, format)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("bsv_transaction=debug")
        .try_init();
}

/// Check every input's scriptSig against a freshly computed digest.
fn assert_signatures_valid(raw_hex: &str, spent: &[Unspent], scheme: SighashScheme) {
    let tx = Transaction::from_hex(raw_hex).expect("should parse assembled tx");
    assert_eq!(tx.inputs.len(), spent.len());

    let mut unsigned = tx.clone();
    for input in &mut unsigned.inputs {
        input.script_sig = Script::new();
    }

    for (i, input) in tx.inputs.iter().enumerate() {
        let pushes = input.script_sig.push_datas().expect("should decode scriptSig");
        assert_eq!(pushes.len(), 2, "scriptSig should hold sig and pubkey");
        let (sig_and_type, pubkey) = (&pushes[0], &pushes[1]);
        let (der, flag) = sig_and_type.split_at(sig_and_type.len() - 1);
        assert_eq!(flag, &[scheme.sighash_byte()]);

        let pubkey = PublicKey::from_bytes(pubkey).expect("valid pubkey");
        let compressed = pushes[1].len() == 33;
        let code = if spent[i].script.is_empty() {
            Script::p2pkh_lock(&pubkey.hash160(compressed))
        } else {
            spent[i].script.clone()
        };
        let digest = signature_hash(&unsigned, i, &code, spent[i].amount, scheme)
            .expect("should hash");
        let sig = Signature::from_der(der).expect("valid der");
        assert!(sig.is_low_s());
        assert!(pubkey.verify(&digest, &sig), "input {} signature should verify", i);
    }
}

// -----------------------------------------------------------------------
// Known transaction
// -----------------------------------------------------------------------

#[test]
fn test_calc_txid() {
    assert_eq!(calc_txid(FINAL_TX_1).expect("valid hex"), FINAL_TX_1_TXID);
}

#[test]
fn test_parse_roundtrip() {
    let tx = Transaction::from_hex(FINAL_TX_1).expect("should parse");
    assert_eq!(tx.version, 1);
    assert_eq!(tx.lock_time, 0);
    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(tx.outputs.len(), 2);
    assert_eq!(tx.inputs[0].txid.to_string(), SOURCE_TXID);
    assert_eq!(tx.inputs[0].txindex, 1);
    assert_eq!(tx.total_output_satoshis(), 50000 + 83658760);
    assert_eq!(tx.to_hex(), FINAL_TX_1);
    assert_eq!(tx.tx_id_hex(), FINAL_TX_1_TXID);
    assert_eq!(tx.size(), FINAL_TX_1.len() / 2);
}

#[test]
fn test_parse_rejects_trailing_and_truncated() {
    assert!(Transaction::from_hex(&format!("{}00", FINAL_TX_1)).is_err());
    assert!(Transaction::from_hex(&FINAL_TX_1[..FINAL_TX_1.len() - 2]).is_err());
    assert!(Transaction::from_hex("zz").is_err());
}

#[test]
fn test_known_forkid_signature_verifies() {
    let tx = Transaction::from_hex(FINAL_TX_1).unwrap();
    let spent = vec![Unspent::new(SOURCE_AMOUNT, 15, Script::new(), SOURCE_TXID, 1)];
    assert_signatures_valid(FINAL_TX_1, &spent, SighashScheme::ForkId);

    // The spending key is the one the change output pays back to.
    let pushes = tx.inputs[0].script_sig.push_datas().unwrap();
    let pubkey = PublicKey::from_bytes(&pushes[1]).unwrap();
    assert_eq!(
        Address::from_public_key(&pubkey, false, Network::Testnet).to_string(),
        CHANGE
    );
}

// -----------------------------------------------------------------------
// Assembly
// -----------------------------------------------------------------------

#[test]
fn test_assemble_matches_known_layout() {
    let s = signer(KeyFormat::Uncompressed);
    let raw = assemble(&s, &unspents(), &outputs()).expect("should assemble");

    assert!(raw.starts_with(FINAL_TX_1_HEAD));
    assert!(raw.ends_with(FINAL_TX_1_TAIL));
    assert_eq!(raw, raw.to_lowercase());
    assert_signatures_valid(&raw, &unspents(), SighashScheme::Legacy);
}

#[test]
fn test_assemble_forkid_matches_known_layout() {
    let s = signer(KeyFormat::Uncompressed);
    let raw = assemble_with_scheme(&s, &unspents(), &outputs(), SighashScheme::ForkId).unwrap();
    assert!(raw.starts_with(FINAL_TX_1_HEAD));
    assert!(raw.ends_with(FINAL_TX_1_TAIL));
    assert_signatures_valid(&raw, &unspents(), SighashScheme::ForkId);
}

#[test]
fn test_assemble_is_deterministic() {
    let s = signer(KeyFormat::Compressed);
    let a = assemble(&s, &unspents(), &outputs()).unwrap();
    let b = assemble(&s, &unspents(), &outputs()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_assemble_multiple_inputs() {
    let s = signer(KeyFormat::Compressed);
    let spent = vec![
        Unspent::new(10000, 1, Script::new(), SOURCE_TXID, 0),
        Unspent::new(20000, 1, s.locking_script(), SOURCE_TXID, 2),
        Unspent::new(30000, 1, Script::new(), FINAL_TX_1_TXID, 0),
    ];
    for scheme in [SighashScheme::Legacy, SighashScheme::ForkId] {
        let raw = assemble_with_scheme(&s, &spent, &outputs()[..1], scheme).unwrap();
        assert_signatures_valid(&raw, &spent, scheme);
    }
}

#[test]
fn test_explicit_script_matches_own_lock() {
    let s = signer(KeyFormat::Compressed);
    let implicit = vec![Unspent::new(10000, 1, Script::new(), SOURCE_TXID, 0)];
    let explicit = vec![Unspent::new(10000, 1, s.locking_script(), SOURCE_TXID, 0)];
    assert_eq!(
        assemble(&s, &implicit, &outputs()).unwrap(),
        assemble(&s, &explicit, &outputs()).unwrap()
    );
}

#[test]
fn test_signed_input_sizes_within_estimate() {
    for format in [KeyFormat::Compressed, KeyFormat::Uncompressed] {
        let s = signer(format);
        let spent = vec![
            Unspent::new(10000, 1, Script::new(), SOURCE_TXID, 0),
            Unspent::new(20000, 1, Script::new(), SOURCE_TXID, 1),
        ];
        let tx = sign_transaction(&s, &spent, &outputs(), SighashScheme::Legacy).unwrap();
        assert!(tx.size() as u64 <= estimate_size(2, 2, format));
        assert_eq!(
            tx.inputs[0].script_sig.push_datas().unwrap()[1].len(),
            format.public_key_len()
        );
    }
}

// -----------------------------------------------------------------------
// Builder
// -----------------------------------------------------------------------

#[test]
fn test_build_end_to_end() {
    init_tracing();
    let s = signer(KeyFormat::Compressed);
    let change = s.address(Network::Testnet);
    let utxos = vec![
        Unspent::new(7000, 3, Script::new(), SOURCE_TXID, 0),
        Unspent::new(3000, 3, Script::new(), SOURCE_TXID, 1),
    ];
    let payments = vec![PaymentRequest::satoshis(Address::from_string(PAYEE).unwrap(), 1000)];

    let built = TransactionBuilder::new()
        .fee_rate(1)
        .change_address(change.clone())
        .build(&s, &utxos, &payments, Some(&Message::text("hello")))
        .expect("should build");

    assert_eq!(built.txid, calc_txid(&built.raw_hex).unwrap());
    assert_eq!(built.inputs.len(), 1);
    assert_eq!(built.inputs[0].amount, 3000);
    assert_eq!(built.outputs.len(), 3);
    assert!(built.outputs[1].is_data());

    let tx = Transaction::from_hex(&built.raw_hex).unwrap();
    assert_eq!(tx.outputs[1].locking_script.to_hex(), "006a0568656c6c6f");
    assert_eq!(tx.outputs[2].locking_script, change.locking_script());
    assert_eq!(3000 - tx.total_output_satoshis(), built.fee);
    assert_signatures_valid(&built.raw_hex, &built.inputs, SighashScheme::ForkId);
}

#[test]
fn test_build_use_all_legacy() {
    let s = signer(KeyFormat::Uncompressed);
    let utxos = vec![
        Unspent::new(5000, 1, Script::new(), SOURCE_TXID, 0),
        Unspent::new(5000, 1, Script::new(), SOURCE_TXID, 1),
    ];
    let payments = vec![PaymentRequest::satoshis(Address::from_string(PAYEE).unwrap(), 1000)];
    let built = TransactionBuilder::new()
        .policy(SelectionPolicy::UseAll)
        .sighash(SighashScheme::Legacy)
        .fee_rate(0)
        .change_address(Address::from_string(CHANGE).unwrap())
        .build(&s, &utxos, &payments, None)
        .unwrap();
    assert_eq!(built.inputs.len(), 2);
    assert_eq!(built.fee, 0);
    assert_eq!(built.outputs[1].satoshis(), 9000);
    assert_signatures_valid(&built.raw_hex, &built.inputs, SighashScheme::Legacy);
}

#[test]
fn test_build_requires_change_address() {
    let s = signer(KeyFormat::Compressed);
    assert!(matches!(
        TransactionBuilder::new().build(&s, &unspents(), &[], None),
        Err(crate::TransactionError::UsageError(_))
    ));
}

#[test]
fn test_signer_trait_object() {
    let s = signer(KeyFormat::Compressed);
    let dyn_signer: &dyn TransactionSigner = &s;
    assert_eq!(
        assemble(dyn_signer, &unspents(), &outputs()).unwrap(),
        assemble(&s, &unspents(), &outputs()).unwrap()
    );
}
