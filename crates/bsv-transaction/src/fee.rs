//! Linear size and fee model for P2PKH transactions.
//!
//! Sizes are fixed per-element estimates rather than measured from a
//! serialized transaction, so selection can price a candidate input set
//! before anything is signed.

use serde::{Deserialize, Serialize};

/// Fixed bytes for version, locktime and the two count varints.
pub const TX_OVERHEAD: u64 = 10;

/// Bytes per P2PKH input spent with a 33-byte compressed public key.
pub const INPUT_SIZE_COMPRESSED: u64 = 148;

/// Bytes per P2PKH input spent with a 65-byte uncompressed public key.
pub const INPUT_SIZE_UNCOMPRESSED: u64 = 180;

/// Bytes per output.
pub const OUTPUT_SIZE: u64 = 34;

/// Smallest change output the builder will emit, in satoshis.
pub const DUST_THRESHOLD: u64 = 546;

/// The public key form a wallet signs with.
///
/// Shared by fee estimation and unlocking-script construction so that the
/// size the fee was priced for is the size that gets signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFormat {
    Compressed,
    Uncompressed,
}

impl KeyFormat {
    /// Estimated serialized size of one input signed with this key form.
    pub fn input_size(self) -> u64 {
        match self {
            KeyFormat::Compressed => INPUT_SIZE_COMPRESSED,
            KeyFormat::Uncompressed => INPUT_SIZE_UNCOMPRESSED,
        }
    }

    /// SEC1 length of a public key in this form.
    pub fn public_key_len(self) -> usize {
        match self {
            KeyFormat::Compressed => 33,
            KeyFormat::Uncompressed => 65,
        }
    }

    pub fn is_compressed(self) -> bool {
        self == KeyFormat::Compressed
    }

    /// The form matching a WIF compression flag.
    pub fn from_compressed(compressed: bool) -> Self {
        if compressed {
            KeyFormat::Compressed
        } else {
            KeyFormat::Uncompressed
        }
    }
}

/// Estimate the size in bytes of a transaction with the given counts.
///
/// `10 + n_inputs * input_size + n_outputs * 34`
pub fn estimate_size(n_inputs: usize, n_outputs: usize, key_format: KeyFormat) -> u64 {
    TX_OVERHEAD
        .saturating_add((n_inputs as u64).saturating_mul(key_format.input_size()))
        .saturating_add((n_outputs as u64).saturating_mul(OUTPUT_SIZE))
}

/// Estimate the fee for a transaction with the given counts.
///
/// # Arguments
/// * `n_inputs` - Number of inputs.
/// * `n_outputs` - Number of outputs, data outputs included.
/// * `sat_per_byte` - Fee rate; `0` yields a zero fee.
/// * `key_format` - Public key form used to sign the inputs.
///
/// # Returns
/// `estimate_size(..) * sat_per_byte` satoshis.
pub fn estimate_fee(
    n_inputs: usize,
    n_outputs: usize,
    sat_per_byte: u64,
    key_format: KeyFormat,
) -> u64 {
    estimate_size(n_inputs, n_outputs, key_format).saturating_mul(sat_per_byte)
}
