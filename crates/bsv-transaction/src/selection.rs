//! Coin selection.
//!
//! Chooses which caller UTXOs fund a set of payments and works out the final
//! output list: value outputs first, then any message outputs, then change.
//! Change is only emitted when the leftover reaches [`DUST_THRESHOLD`];
//! anything smaller goes to the miner.

use bsv_script::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::currency::{to_satoshis, Unit};
use crate::fee::{estimate_fee, KeyFormat, DUST_THRESHOLD};
use crate::message::{encode as encode_message, Message};
use crate::output::OutputRequest;
use crate::unspent::Unspent;
use crate::TransactionError;

/// How UTXOs are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Spend every UTXO given, consolidating them.
    UseAll,
    /// Add UTXOs smallest first until outputs plus fee are covered.
    #[default]
    GreedyAscending,
}

/// A payment the caller wants made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    pub destination: Address,
    pub amount: Decimal,
    pub unit: Unit,
}

impl PaymentRequest {
    pub fn new(destination: Address, amount: Decimal, unit: Unit) -> Self {
        PaymentRequest {
            destination,
            amount,
            unit,
        }
    }

    /// A payment already denominated in satoshis.
    pub fn satoshis(destination: Address, satoshis: u64) -> Self {
        Self::new(destination, Decimal::from(satoshis), Unit::Satoshi)
    }

    /// Parse the destination and build the request.
    pub fn parse(destination: &str, amount: Decimal, unit: Unit) -> Result<Self, TransactionError> {
        Ok(Self::new(Address::from_string(destination)?, amount, unit))
    }

    /// The amount in satoshis.
    pub fn to_satoshis(&self) -> Result<u64, TransactionError> {
        to_satoshis(self.amount, self.unit)
    }
}

/// The result of selection: inputs to spend and outputs to create.
///
/// `fee` is what the miner actually receives, `Σinputs − Σoutputs`, which
/// includes any forfeited sub-dust remainder. When `change` is set, the
/// last entry of `outputs` is the change output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedSet {
    pub inputs: Vec<Unspent>,
    pub outputs: Vec<OutputRequest>,
    pub fee: u64,
    pub change: Option<u64>,
}

impl SelectedSet {
    pub fn total_input(&self) -> u64 {
        self.inputs.iter().map(|u| u.amount).sum()
    }

    pub fn total_output(&self) -> u64 {
        self.outputs.iter().map(|o| o.satoshis()).sum()
    }

    pub fn has_change(&self) -> bool {
        self.change.is_some()
    }
}

/// Selects coins at a fixed fee rate, sending change to one address.
#[derive(Clone, Debug)]
pub struct CoinSelector {
    /// Satoshis per byte.
    pub fee_rate: u64,
    pub key_format: KeyFormat,
    pub change_address: Address,
    pub policy: SelectionPolicy,
}

impl CoinSelector {
    pub fn new(
        fee_rate: u64,
        key_format: KeyFormat,
        change_address: Address,
        policy: SelectionPolicy,
    ) -> Self {
        CoinSelector {
            fee_rate,
            key_format,
            change_address,
            policy,
        }
    }

    /// Choose inputs and compute the output list.
    ///
    /// # Arguments
    /// * `utxos` - Coins available to spend. Never modified.
    /// * `payments` - Value outputs, in order.
    /// * `message` - Optional payload, encoded into data outputs placed after
    ///   the value outputs.
    ///
    /// # Returns
    /// A fresh `SelectedSet`, `UsageError` when `utxos` is empty or an amount
    /// is unusable, or `InsufficientFunds` when the coins cannot cover
    /// outputs plus fee.
    pub fn select(
        &self,
        utxos: &[Unspent],
        payments: &[PaymentRequest],
        message: Option<&Message>,
    ) -> Result<SelectedSet, TransactionError> {
        if utxos.is_empty() {
            return Err(TransactionError::UsageError(
                "no unspent outputs to spend".to_string(),
            ));
        }

        let mut outputs = payments
            .iter()
            .map(|p| Ok(OutputRequest::value(p.destination.clone(), p.to_satoshis()?)))
            .collect::<Result<Vec<_>, TransactionError>>()?;
        if let Some(message) = message {
            outputs.extend(encode_message(message)?);
        }

        let total_out = checked_sum(outputs.iter().map(|o| o.satoshis()))?;

        let (inputs, fee) = match self.policy {
            SelectionPolicy::UseAll => (
                utxos.to_vec(),
                estimate_fee(utxos.len(), outputs.len(), self.fee_rate, self.key_format),
            ),
            SelectionPolicy::GreedyAscending => {
                self.select_ascending(utxos, total_out, outputs.len())?
            }
        };

        let total_in = checked_sum(inputs.iter().map(|u| u.amount))?;
        let needed = total_out
            .checked_add(fee)
            .ok_or_else(|| TransactionError::UsageError("output total overflows".to_string()))?;
        if total_in < needed {
            return Err(TransactionError::InsufficientFunds {
                needed,
                available: total_in,
            });
        }

        let remainder = total_in - needed;
        let change = if remainder >= DUST_THRESHOLD {
            outputs.push(OutputRequest::value(self.change_address.clone(), remainder));
            Some(remainder)
        } else {
            if remainder > 0 {
                warn!(remainder, threshold = DUST_THRESHOLD, "remainder below dust, adding to fee");
            }
            None
        };

        let fee = total_in - checked_sum(outputs.iter().map(|o| o.satoshis()))?;

        debug!(
            policy = ?self.policy,
            inputs = inputs.len(),
            outputs = outputs.len(),
            total_in,
            fee,
            "selected coins"
        );

        Ok(SelectedSet {
            inputs,
            outputs,
            fee,
            change,
        })
    }

    /// Walk the UTXOs smallest first until the running total covers the
    /// outputs plus the fee for a transaction that also carries change.
    ///
    /// Returns the chosen subset and the fee it was priced at.
    fn select_ascending(
        &self,
        utxos: &[Unspent],
        total_out: u64,
        n_outputs: usize,
    ) -> Result<(Vec<Unspent>, u64), TransactionError> {
        let mut sorted = utxos.to_vec();
        sorted.sort_by_key(|u| u.amount);

        let mut selected = Vec::new();
        let mut total: u64 = 0;
        let mut target = total_out;
        for utxo in sorted {
            total = total.checked_add(utxo.amount).ok_or_else(|| {
                TransactionError::UsageError("unspent total overflows".to_string())
            })?;
            selected.push(utxo);

            let fee = estimate_fee(selected.len(), n_outputs + 1, self.fee_rate, self.key_format);
            target = total_out.saturating_add(fee);
            if total >= target {
                return Ok((selected, fee));
            }
        }

        Err(TransactionError::InsufficientFunds {
            needed: target,
            available: total,
        })
    }
}

fn checked_sum(mut values: impl Iterator<Item = u64>) -> Result<u64, TransactionError> {
    values.try_fold(0u64, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| TransactionError::UsageError("amount total overflows".to_string()))
    })
}
