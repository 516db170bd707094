//! Transaction input referencing a previous output.
//!
//! Holds the outpoint in wire order, the unlocking script, the sequence
//! number and the value being spent (used for signing, never serialized).

use bsv_primitives::chainhash::Hash;
use bsv_primitives::util::{BsvReader, BsvWriter, VarInt};
use bsv_script::Script;

use crate::unspent::Unspent;
use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input in a transaction.
///
/// # Wire format
///
/// | Field        | Size             |
/// |--------------|------------------|
/// | txid         | 32 bytes (LE)    |
/// | txindex      | 4 bytes (LE)     |
/// | script length| VarInt           |
/// | script_sig   | variable         |
/// | sequence     | 4 bytes (LE)     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxIn {
    /// Id of the transaction being spent from. Stored in wire order;
    /// `Display` gives the conventional reversed hex.
    pub txid: Hash,

    /// Index of the output within the source transaction.
    pub txindex: u32,

    /// Unlocking script. Empty until the input is signed.
    pub script_sig: Script,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// Satoshis held by the spent output. Not part of the wire format.
    pub amount: u64,
}

impl TxIn {
    /// Create an unsigned input for the given outpoint.
    pub fn new(txid: Hash, txindex: u32, amount: u64) -> Self {
        TxIn {
            txid,
            txindex,
            script_sig: Script::new(),
            sequence: DEFAULT_SEQUENCE_NUMBER,
            amount,
        }
    }

    /// Create an unsigned input spending `utxo`.
    ///
    /// # Returns
    /// The input, or an error if the UTXO's txid is not 64 hex characters.
    pub fn from_unspent(utxo: &Unspent) -> Result<Self, TransactionError> {
        let txid = Hash::from_hex(&utxo.txid).map_err(|e| {
            TransactionError::UsageError(format!("bad txid '{}' in unspent: {}", utxo.txid, e))
        })?;
        Ok(Self::new(txid, utxo.txindex, utxo.amount))
    }

    /// Deserialize an input from a `BsvReader`.
    ///
    /// # Returns
    /// The input with `amount` set to zero, or a `SerializationError` if
    /// the data is truncated.
    pub fn read_from(reader: &mut BsvReader) -> Result<Self, TransactionError> {
        let txid = reader.read_array::<32>().map_err(|e| {
            TransactionError::SerializationError(format!("reading source txid: {}", e))
        })?;

        let txindex = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;

        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        Ok(TxIn {
            txid: Hash::new(txid),
            txindex,
            script_sig: Script::from_bytes(script_bytes),
            sequence,
            amount: 0,
        })
    }

    /// Serialize this input into a `BsvWriter`.
    pub fn write_to(&self, writer: &mut BsvWriter) {
        self.write_with_script(writer, &self.script_sig);
    }

    /// Serialize this input with `script` in place of its own script_sig.
    ///
    /// Used to build signature preimages, where the slot holds either the
    /// spent output's script or nothing.
    pub fn write_with_script(&self, writer: &mut BsvWriter, script: &Script) {
        writer.write_bytes(self.txid.as_bytes());
        writer.write_u32_le(self.txindex);
        let script_bytes = script.to_bytes();
        writer.write_varint(VarInt::from(script_bytes.len()));
        writer.write_bytes(script_bytes);
        writer.write_u32_le(self.sequence);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BsvWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "f3ad23dac2a3546167b27a43ac3e370236caf93f75bfcf27c625ec839d397888";

    #[test]
    fn test_from_unspent_reverses_txid() {
        let utxo = Unspent::new(83727960, 15, Script::new(), TXID, 1);
        let input = TxIn::from_unspent(&utxo).expect("should build");
        assert_eq!(input.sequence, DEFAULT_SEQUENCE_NUMBER);
        assert_eq!(input.amount, 83727960);
        assert_eq!(input.txid.to_string(), TXID);
        assert_eq!(
            hex::encode(input.to_bytes()),
            format!(
                "{}{}{}{}",
                "8878399d83ec25c627cfbf753ff9ca3602373eac437ab2676154a3c2da23adf3",
                "01000000",
                "00",
                "ffffffff"
            )
        );
    }

    #[test]
    fn test_from_unspent_bad_txid() {
        let utxo = Unspent::new(1000, 0, Script::new(), "", 0);
        assert!(matches!(
            TxIn::from_unspent(&utxo),
            Err(TransactionError::UsageError(_))
        ));
    }

    #[test]
    fn test_read_write_roundtrip() {
        let mut input = TxIn::new(Hash::new([0x11; 32]), 7, 0);
        input.script_sig = Script::from_hex("0102").unwrap();
        input.sequence = 5;
        let bytes = input.to_bytes();

        let mut reader = BsvReader::new(&bytes);
        let back = TxIn::read_from(&mut reader).expect("should parse");
        assert_eq!(back, input);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_truncated() {
        let bytes = [0u8; 20];
        let mut reader = BsvReader::new(&bytes);
        assert!(matches!(
            TxIn::read_from(&mut reader),
            Err(TransactionError::SerializationError(_))
        ));
    }
}
