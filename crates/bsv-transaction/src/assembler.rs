//! Signing and assembly of the final raw transaction.
//!
//! Every input is signed against the same unsigned transaction: the digest
//! for input `i` never depends on the scriptSigs produced for other inputs.
//! The scriptSigs are filled in only after all signatures succeed, so a
//! failure on any input yields no transaction at all.

use bsv_primitives::hash::hash160;
use bsv_script::Script;
use tracing::debug;

use crate::input::TxIn;
use crate::output::OutputRequest;
use crate::sighash::{signature_hash, SighashScheme};
use crate::template::p2pkh::unlocking_script;
use crate::template::TransactionSigner;
use crate::transaction::Transaction;
use crate::unspent::Unspent;
use crate::TransactionError;

/// Sign and serialize a transaction with the legacy `SIGHASH_ALL` preimage.
///
/// # Arguments
/// * `signer` - Key collaborator owning every input.
/// * `inputs` - The coins to spend, in order.
/// * `outputs` - The outputs to create, in order.
///
/// # Returns
/// The lowercase hex raw transaction.
pub fn assemble<S: TransactionSigner + ?Sized>(
    signer: &S,
    inputs: &[Unspent],
    outputs: &[OutputRequest],
) -> Result<String, TransactionError> {
    assemble_with_scheme(signer, inputs, outputs, SighashScheme::Legacy)
}

/// Sign and serialize a transaction with the given preimage scheme.
pub fn assemble_with_scheme<S: TransactionSigner + ?Sized>(
    signer: &S,
    inputs: &[Unspent],
    outputs: &[OutputRequest],
    scheme: SighashScheme,
) -> Result<String, TransactionError> {
    Ok(sign_transaction(signer, inputs, outputs, scheme)?.to_hex())
}

/// Build and sign a version 1, locktime 0 transaction.
///
/// An input whose `script` is empty is signed against the signer's own
/// P2PKH locking script.
///
/// # Returns
/// The signed transaction, `SigningError` if the signer's public key does
/// not match its declared format or the signer fails, or `UsageError` for
/// an empty input list or a malformed txid.
pub fn sign_transaction<S: TransactionSigner + ?Sized>(
    signer: &S,
    inputs: &[Unspent],
    outputs: &[OutputRequest],
    scheme: SighashScheme,
) -> Result<Transaction, TransactionError> {
    if inputs.is_empty() {
        return Err(TransactionError::UsageError(
            "cannot assemble a transaction without inputs".to_string(),
        ));
    }

    let key_format = signer.key_format();
    let public_key = signer.public_key_bytes();
    let prefix_ok = match public_key.first() {
        Some(0x02) | Some(0x03) => key_format.is_compressed(),
        Some(0x04) => !key_format.is_compressed(),
        _ => false,
    };
    if public_key.len() != key_format.public_key_len() || !prefix_ok {
        return Err(TransactionError::SigningError(format!(
            "{}-byte public key does not match {:?} key format",
            public_key.len(),
            key_format
        )));
    }
    let own_lock = Script::p2pkh_lock(&hash160(&public_key));

    let mut tx = Transaction::new();
    tx.inputs = inputs
        .iter()
        .map(TxIn::from_unspent)
        .collect::<Result<Vec<_>, _>>()?;
    tx.outputs = outputs
        .iter()
        .map(OutputRequest::to_transaction_output)
        .collect::<Result<Vec<_>, _>>()?;

    let mut script_sigs = Vec::with_capacity(inputs.len());
    for (i, utxo) in inputs.iter().enumerate() {
        let script_code = if utxo.script.is_empty() {
            &own_lock
        } else {
            &utxo.script
        };
        let digest = signature_hash(&tx, i, script_code, utxo.amount, scheme)?;
        let der = signer.sign_digest(&digest)?;
        script_sigs.push(unlocking_script(&der, scheme.sighash_byte(), &public_key)?);
        debug!(input = i, txid = %utxo.txid, vout = utxo.txindex, ?scheme, "signed input");
    }

    for (input, script_sig) in tx.inputs.iter_mut().zip(script_sigs) {
        input.script_sig = script_sig;
    }
    Ok(tx)
}
