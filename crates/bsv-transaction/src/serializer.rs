//! Byte blocks for the input and output sections of a raw transaction.
//!
//! Each block is the concatenation of its items in wire format, without the
//! leading count varint, so callers can splice blocks into larger layouts.

use bsv_primitives::util::BsvWriter;

use crate::input::TxIn;
use crate::output::OutputRequest;
use crate::TransactionError;

/// Serialize inputs back to back, each as
/// `txid ‖ index ‖ varint(len) ‖ script_sig ‖ sequence`.
pub fn build_input_block(inputs: &[TxIn]) -> Vec<u8> {
    let mut writer = BsvWriter::with_capacity(inputs.len() * 148);
    for input in inputs {
        input.write_to(&mut writer);
    }
    writer.into_bytes()
}

/// Serialize outputs back to back, each as `amount ‖ varint(len) ‖ script`.
///
/// # Returns
/// The block, or the error from resolving an output's locking script.
pub fn build_output_block(outputs: &[OutputRequest]) -> Result<Vec<u8>, TransactionError> {
    let mut writer = BsvWriter::with_capacity(outputs.len() * 34);
    for output in outputs {
        output.to_transaction_output()?.write_to(&mut writer);
    }
    Ok(writer.into_bytes())
}
