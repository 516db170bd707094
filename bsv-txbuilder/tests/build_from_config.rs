use bsv_txbuilder::prelude::*;
use bsv_txbuilder::transaction::Transaction;

const CONFIG: &str = r#"{
    "fee_rate": 2,
    "policy": "greedy_ascending",
    "sighash": "fork_id",
    "change_address": "mtrNwJxS1VyHYn3qBY1Qfsm3K3kh1mGRMS"
}"#;

const UTXOS: &str = r#"[
    {"amount": 40000, "confirmations": 6, "txid": "f3ad23dac2a3546167b27a43ac3e370236caf93f75bfcf27c625ec839d397888", "txindex": 0},
    {"amount": 25000, "confirmations": 2, "txid": "f3ad23dac2a3546167b27a43ac3e370236caf93f75bfcf27c625ec839d397888", "txindex": 1}
]"#;

#[test]
fn build_from_json_inputs() {
    let config = BuilderConfig::from_json(CONFIG).expect("should parse config");
    let builder = TransactionBuilder::from_config(&config).expect("valid config");
    let utxos: Vec<Unspent> = serde_json::from_str(UTXOS).expect("should parse utxos");

    let signer = P2PKH::from_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn")
        .expect("valid wif");
    assert_eq!(signer.key_format(), KeyFormat::Compressed);

    let payments = vec![PaymentRequest::parse(
        "n2eMqTT929pb1RDNuqEnxdaLau1rxy3efi",
        "0.0003".parse().expect("valid decimal"),
        Unit::Bsv,
    )
    .expect("valid payment")];

    let built = builder
        .build(&signer, &utxos, &payments, None)
        .expect("should build");

    // 30000 sats needs both coins once the fee is added.
    assert_eq!(built.inputs.len(), 2);
    assert_eq!(built.outputs.len(), 2);
    assert_eq!(built.outputs[0].satoshis(), 30000);
    assert_eq!(built.fee, estimate_fee(2, 2, 2, KeyFormat::Compressed));
    assert_eq!(built.txid, calc_txid(&built.raw_hex).unwrap());

    let tx = Transaction::from_hex(&built.raw_hex).expect("should parse");
    assert_eq!(tx.version, 1);
    assert_eq!(tx.lock_time, 0);
    for input in &tx.inputs {
        let pushes = input.script_sig.push_datas().unwrap();
        assert_eq!(pushes[0].last(), Some(&0x41));
        assert_eq!(pushes[1].len(), 33);
    }
    assert_eq!(
        tx.outputs[1].locking_script,
        Address::from_string("mtrNwJxS1VyHYn3qBY1Qfsm3K3kh1mGRMS")
            .unwrap()
            .locking_script()
    );
}

#[test]
fn insufficient_funds_reports_amounts() {
    let builder = TransactionBuilder::new()
        .change_address(Address::from_string("mtrNwJxS1VyHYn3qBY1Qfsm3K3kh1mGRMS").unwrap());
    let utxos: Vec<Unspent> = serde_json::from_str(UTXOS).unwrap();
    let signer = P2PKH::from_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
    let payments = vec![PaymentRequest::satoshis(
        Address::from_string("n2eMqTT929pb1RDNuqEnxdaLau1rxy3efi").unwrap(),
        65000,
    )];

    match builder.build(&signer, &utxos, &payments, None) {
        Err(TransactionError::InsufficientFunds { needed, available }) => {
            assert_eq!(available, 65000);
            assert_eq!(needed, 65000 + estimate_fee(2, 2, 1, KeyFormat::Compressed));
        }
        other => panic!("expected insufficient funds, got {:?}", other.map(|b| b.txid)),
    }
}
