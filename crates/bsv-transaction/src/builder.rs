//! One-call transaction building: select, assemble, identify.

use bsv_script::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembler::assemble_with_scheme;
use crate::message::Message;
use crate::output::OutputRequest;
use crate::selection::{CoinSelector, PaymentRequest, SelectionPolicy};
use crate::sighash::SighashScheme;
use crate::template::TransactionSigner;
use crate::txid::calc_txid;
use crate::unspent::Unspent;
use crate::TransactionError;

/// Builder settings, loadable from JSON.
///
/// ```json
/// { "fee_rate": 1, "policy": "greedy_ascending", "sighash": "fork_id",
///   "change_address": "mtrNwJxS1VyHYn3qBY1Qfsm3K3kh1mGRMS" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Satoshis per byte.
    pub fee_rate: u64,
    pub policy: SelectionPolicy,
    pub sighash: SighashScheme,
    /// Base58Check address receiving change. Must be set before building.
    pub change_address: Option<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            fee_rate: 1,
            policy: SelectionPolicy::GreedyAscending,
            sighash: SighashScheme::ForkId,
            change_address: None,
        }
    }
}

impl BuilderConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The outcome of a successful build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltTransaction {
    /// Lowercase hex raw transaction, ready to broadcast.
    pub raw_hex: String,
    /// Display-order txid.
    pub txid: String,
    /// The coins spent.
    pub inputs: Vec<Unspent>,
    /// The outputs created, change last when present.
    pub outputs: Vec<OutputRequest>,
    /// Satoshis paid to the miner.
    pub fee: u64,
}

/// Funds, signs and identifies P2PKH transactions.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    fee_rate: u64,
    policy: SelectionPolicy,
    sighash: SighashScheme,
    change_address: Option<Address>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            fee_rate: 1,
            policy: SelectionPolicy::GreedyAscending,
            sighash: SighashScheme::ForkId,
            change_address: None,
        }
    }

    /// Create a builder from config, validating the change address.
    pub fn from_config(config: &BuilderConfig) -> Result<Self, TransactionError> {
        let change_address = config
            .change_address
            .as_deref()
            .map(Address::from_string)
            .transpose()?;
        Ok(Self {
            fee_rate: config.fee_rate,
            policy: config.policy,
            sighash: config.sighash,
            change_address,
        })
    }

    pub fn fee_rate(mut self, sat_per_byte: u64) -> Self {
        self.fee_rate = sat_per_byte;
        self
    }

    pub fn policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn sighash(mut self, scheme: SighashScheme) -> Self {
        self.sighash = scheme;
        self
    }

    pub fn change_address(mut self, address: Address) -> Self {
        self.change_address = Some(address);
        self
    }

    /// Select coins, sign, and compute the txid.
    ///
    /// # Arguments
    /// * `signer` - Key owning every UTXO; its key format prices the inputs.
    /// * `utxos` - Coins available to spend.
    /// * `payments` - Value outputs, in order.
    /// * `message` - Optional data to embed.
    ///
    /// # Returns
    /// The built transaction, or the first selection, signing or usage error.
    pub fn build<S: TransactionSigner + ?Sized>(
        &self,
        signer: &S,
        utxos: &[Unspent],
        payments: &[PaymentRequest],
        message: Option<&Message>,
    ) -> Result<BuiltTransaction, TransactionError> {
        let change_address = self.change_address.clone().ok_or_else(|| {
            TransactionError::UsageError("no change address configured".to_string())
        })?;

        let selector = CoinSelector::new(
            self.fee_rate,
            signer.key_format(),
            change_address,
            self.policy,
        );
        let selected = selector.select(utxos, payments, message)?;
        let raw_hex = assemble_with_scheme(signer, &selected.inputs, &selected.outputs, self.sighash)?;
        let txid = calc_txid(&raw_hex)?;

        debug!(%txid, size = raw_hex.len() / 2, fee = selected.fee, "built transaction");

        Ok(BuiltTransaction {
            raw_hex,
            txid,
            inputs: selected.inputs,
            outputs: selected.outputs,
            fee: selected.fee,
        })
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
