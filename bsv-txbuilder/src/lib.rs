#![deny(missing_docs)]

//! BSV P2PKH transaction builder.
//!
//! Re-exports the builder's components for convenient single-crate usage.

pub use bsv_primitives as primitives;
pub use bsv_script as script;
pub use bsv_transaction as transaction;

/// The types needed to fund, sign and identify a transaction.
pub mod prelude {
    pub use bsv_primitives::ec::PrivateKey;
    pub use bsv_script::{Address, Network};
    pub use bsv_transaction::{
        assemble, assemble_with_scheme, calc_txid, estimate_fee, BuilderConfig, BuiltTransaction,
        CoinSelector, Framing, KeyFormat, Message, OutputRequest, P2PKH, Payload, PaymentRequest,
        SelectedSet, SelectionPolicy, SighashScheme, TransactionBuilder, TransactionError,
        TransactionSigner, Unit, Unspent,
    };
}
