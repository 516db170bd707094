//! Caller-supplied spendable outputs.

use bsv_script::Script;
use serde::{Deserialize, Serialize};

/// A spendable output known to the caller, typically fetched from a UTXO
/// lookup service.
///
/// The builder never mutates these; selection returns fresh copies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unspent {
    /// Value in satoshis.
    pub amount: u64,
    /// Confirmation depth. Informational only.
    #[serde(default)]
    pub confirmations: u32,
    /// Locking script (scriptPubKey) of the output. When empty, the signer's
    /// own P2PKH script is assumed at signing time.
    #[serde(default)]
    pub script: Script,
    /// Source transaction id in display (big-endian) hex.
    pub txid: String,
    /// Output index within the source transaction.
    pub txindex: u32,
}

impl Unspent {
    pub fn new(amount: u64, confirmations: u32, script: Script, txid: &str, txindex: u32) -> Self {
        Unspent {
            amount,
            confirmations,
            script,
            txid: txid.to_string(),
            txindex,
        }
    }
}
