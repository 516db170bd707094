//! Signature hash computation for transaction signing.
//!
//! Two preimage layouts are supported, both committing to every input and
//! every output (`SIGHASH_ALL`):
//!
//! * **Legacy**: the whole transaction re-serialized with the signed input's
//!   script slot holding the spent output's script and every other slot
//!   empty, followed by the 4-byte hash type.
//! * **ForkId**: the BIP-143 style digest BSV nodes require since the UAHF
//!   fork, which also commits to the spent amount.
//!
//! See <https://github.com/bitcoin-sv/bitcoin-sv/blob/master/doc/abc/replay-protected-sighash.md#digest-algorithm>

use bsv_primitives::hash::sha256d;
use bsv_primitives::util::{BsvWriter, VarInt};
use bsv_script::Script;
use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs.
pub const SIGHASH_ALL: u32 = 0x01;

/// Replay-protection flag required on all BSV transactions after the UAHF fork.
pub const SIGHASH_FORKID: u32 = 0x40;

/// The standard BSV sighash type: ALL | FORKID.
pub const SIGHASH_ALL_FORKID: u32 = SIGHASH_ALL | SIGHASH_FORKID;

/// Which preimage layout to sign.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SighashScheme {
    /// Original Satoshi preimage with `SIGHASH_ALL`.
    #[default]
    Legacy,
    /// BIP-143 preimage with `SIGHASH_ALL | SIGHASH_FORKID`.
    ForkId,
}

impl SighashScheme {
    /// The hash type committed in the preimage.
    pub fn flag(self) -> u32 {
        match self {
            SighashScheme::Legacy => SIGHASH_ALL,
            SighashScheme::ForkId => SIGHASH_ALL_FORKID,
        }
    }

    /// The byte appended to the DER signature in the scriptSig.
    pub fn sighash_byte(self) -> u8 {
        self.flag() as u8
    }
}

/// Compute the digest to sign for one input.
///
/// # Arguments
/// * `tx`          - The unsigned transaction.
/// * `input_index` - Index of the input being signed.
/// * `script_code` - Locking script of the output being spent.
/// * `amount`      - Satoshis held by that output. Only the ForkId layout uses it.
/// * `scheme`      - The preimage layout.
///
/// # Returns
/// The double SHA-256 of the preimage, or `InvalidTransaction` if the index
/// is out of range.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    amount: u64,
    scheme: SighashScheme,
) -> Result<[u8; 32], TransactionError> {
    let preimage = match scheme {
        SighashScheme::Legacy => legacy_preimage(tx, input_index, script_code)?,
        SighashScheme::ForkId => forkid_preimage(tx, input_index, script_code, amount)?,
    };
    Ok(sha256d(&preimage))
}

/// Build the legacy preimage for `input_index`.
///
/// `version ‖ varint(n_in) ‖ inputs ‖ varint(n_out) ‖ outputs ‖ locktime ‖ 01000000`,
/// where only the signed input carries `script_code`.
pub fn legacy_preimage(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
) -> Result<Vec<u8>, TransactionError> {
    check_index(tx, input_index)?;

    let empty = Script::new();
    let mut writer = BsvWriter::with_capacity(256);
    writer.write_u32_le(tx.version);

    writer.write_varint(VarInt::from(tx.inputs.len()));
    for (i, input) in tx.inputs.iter().enumerate() {
        let script = if i == input_index { script_code } else { &empty };
        input.write_with_script(&mut writer, script);
    }

    writer.write_varint(VarInt::from(tx.outputs.len()));
    for output in &tx.outputs {
        output.write_to(&mut writer);
    }

    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(SIGHASH_ALL);
    Ok(writer.into_bytes())
}

/// Build the BIP-143 preimage for `input_index` with `SIGHASH_ALL | SIGHASH_FORKID`.
///
/// The preimage consists of:
/// 1. nVersion (4 bytes LE)
/// 2. hashPrevouts (32 bytes)
/// 3. hashSequence (32 bytes)
/// 4. outpoint (32+4 bytes)
/// 5. scriptCode (varint + script)
/// 6. value (8 bytes LE)
/// 7. nSequence (4 bytes LE)
/// 8. hashOutputs (32 bytes)
/// 9. nLocktime (4 bytes LE)
/// 10. sighashType (4 bytes LE)
pub fn forkid_preimage(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    amount: u64,
) -> Result<Vec<u8>, TransactionError> {
    check_index(tx, input_index)?;
    let input = &tx.inputs[input_index];

    let mut writer = BsvWriter::with_capacity(256);
    writer.write_u32_le(tx.version);
    writer.write_bytes(&prevouts_hash(tx));
    writer.write_bytes(&sequence_hash(tx));

    writer.write_bytes(input.txid.as_bytes());
    writer.write_u32_le(input.txindex);

    writer.write_var_bytes(script_code.to_bytes());
    writer.write_u64_le(amount);
    writer.write_u32_le(input.sequence);

    writer.write_bytes(&outputs_hash(tx));
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(SIGHASH_ALL_FORKID);
    Ok(writer.into_bytes())
}

// -----------------------------------------------------------------------
// Internal helper functions
// -----------------------------------------------------------------------

fn check_index(tx: &Transaction, input_index: usize) -> Result<(), TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        )));
    }
    Ok(())
}

/// sha256d of every outpoint, `txid ‖ vout`.
fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = BsvWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        writer.write_bytes(input.txid.as_bytes());
        writer.write_u32_le(input.txindex);
    }
    sha256d(writer.as_bytes())
}

/// sha256d of every input sequence number.
fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = BsvWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence);
    }
    sha256d(writer.as_bytes())
}

/// sha256d of every serialized output.
fn outputs_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = BsvWriter::new();
    for output in &tx.outputs {
        output.write_to(&mut writer);
    }
    sha256d(writer.as_bytes())
}
