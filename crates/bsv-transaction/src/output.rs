//! Transaction outputs: what the caller asks for and what goes on the wire.
//!
//! An [`OutputRequest`] is either a payment to an address or a data carrier.
//! Resolving it yields a [`TransactionOutput`], the satoshi value plus the
//! locking script in wire format.

use bsv_primitives::util::{BsvReader, BsvWriter, VarInt};
use bsv_script::{Address, Script};

use crate::message::{Framing, Payload};
use crate::TransactionError;

// -----------------------------------------------------------------
// Requested outputs
// -----------------------------------------------------------------

/// One output the caller wants in the transaction.
///
/// Value outputs always lock to P2PKH, even at zero satoshis. Data outputs
/// always carry zero satoshis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputRequest {
    /// Pay `satoshis` to `destination`.
    Value { destination: Address, satoshis: u64 },
    /// Embed `payload` behind `OP_FALSE OP_RETURN`.
    Data { payload: Payload, framing: Framing },
}

impl OutputRequest {
    pub fn value(destination: Address, satoshis: u64) -> Self {
        OutputRequest::Value {
            destination,
            satoshis,
        }
    }

    /// The value this output carries, zero for data outputs.
    pub fn satoshis(&self) -> u64 {
        match self {
            OutputRequest::Value { satoshis, .. } => *satoshis,
            OutputRequest::Data { .. } => 0,
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, OutputRequest::Data { .. })
    }

    /// Build the locking script for this output.
    ///
    /// # Returns
    /// A P2PKH script for value outputs. For data outputs, `OP_FALSE OP_RETURN`
    /// followed by a single minimal push of the payload, or by the caller's
    /// bytes verbatim under custom framing. Text under custom framing is a
    /// `TypeMismatch`.
    pub fn locking_script(&self) -> Result<Script, TransactionError> {
        match self {
            OutputRequest::Value { destination, .. } => Ok(destination.locking_script()),
            OutputRequest::Data { payload, framing } => match framing {
                Framing::PushData => {
                    let mut body = Script::new();
                    body.append_push_data(payload.as_bytes())?;
                    Ok(Script::data_carrier(body.to_bytes()))
                }
                Framing::Custom => match payload {
                    Payload::Bytes(b) => Ok(Script::data_carrier(b)),
                    Payload::Text(_) => Err(TransactionError::TypeMismatch(
                        "custom framing requires raw bytes, got text".to_string(),
                    )),
                },
            },
        }
    }

    /// Resolve into the wire form.
    pub fn to_transaction_output(&self) -> Result<TransactionOutput, TransactionError> {
        Ok(TransactionOutput {
            satoshis: self.satoshis(),
            locking_script: self.locking_script()?,
        })
    }
}

// -----------------------------------------------------------------
// Wire outputs
// -----------------------------------------------------------------

/// A serialized output.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | satoshis         | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | locking_script   | variable       |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    pub satoshis: u64,
    pub locking_script: Script,
}

impl TransactionOutput {
    pub fn new(satoshis: u64, locking_script: Script) -> Self {
        TransactionOutput {
            satoshis,
            locking_script,
        }
    }

    /// Deserialize an output from a `BsvReader`.
    ///
    /// # Returns
    /// The output, or a `SerializationError` if the data is truncated.
    pub fn read_from(reader: &mut BsvReader) -> Result<Self, TransactionError> {
        let satoshis = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading satoshis: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;

        Ok(TransactionOutput {
            satoshis,
            locking_script: Script::from_bytes(script_bytes),
        })
    }

    /// Append `amount ‖ varint(len) ‖ script` to `writer`.
    pub fn write_to(&self, writer: &mut BsvWriter) {
        writer.write_u64_le(self.satoshis);
        let script_bytes = self.locking_script.to_bytes();
        writer.write_varint(VarInt::from(script_bytes.len()));
        writer.write_bytes(script_bytes);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BsvWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}
