//! Transaction id of a raw transaction.

use bsv_primitives::chainhash::double_hash_h;

use crate::TransactionError;

/// Compute the display-order txid of a hex raw transaction.
///
/// The bytes are hashed as given; they are not parsed.
///
/// # Returns
/// The 64-character lowercase txid, or `SerializationError` for bad hex.
pub fn calc_txid(raw_tx_hex: &str) -> Result<String, TransactionError> {
    let bytes = hex::decode(raw_tx_hex)
        .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
    Ok(double_hash_h(&bytes).to_string())
}
