/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The caller passed arguments the builder cannot work with (e.g. no
    /// UTXOs, an oversized custom-framed payload, a fractional satoshi).
    #[error("usage error: {0}")]
    UsageError(String),
    /// The available coins cannot cover outputs plus fee.
    #[error("insufficient funds: needed {needed} satoshis, {available} available")]
    InsufficientFunds {
        /// Outputs plus fee, in satoshis.
        needed: u64,
        /// Sum of the coins considered, in satoshis.
        available: u64,
    },
    /// A payload has the wrong type for the requested framing.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// The key collaborator could not sign, or its key does not match the
    /// declared format.
    #[error("signing error: {0}")]
    SigningError(String),
    /// Binary/hex serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// The transaction structure is invalid (e.g. input index out of range).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// Malformed builder configuration.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    /// An underlying script error (forwarded from `bsv-script`).
    #[error("script error: {0}")]
    Script(#[from] bsv_script::ScriptError),
    /// An underlying primitives error (forwarded from `bsv-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] bsv_primitives::PrimitivesError),
}
