/// P2PKH transaction building for BSV.
///
/// Fee estimation, OP_RETURN message encoding, coin selection, input/output
/// serialization, signing and txid computation. The pieces compose as
/// `CoinSelector::select` → `assemble` → `calc_txid`, or in one call via
/// `TransactionBuilder::build`.

pub mod fee;
pub mod message;
pub mod unspent;
pub mod currency;
pub mod selection;
pub mod serializer;
pub mod transaction;
pub mod input;
pub mod output;
pub mod sighash;
pub mod template;
pub mod assembler;
pub mod txid;
pub mod builder;

mod error;
pub use error::TransactionError;
pub use fee::{estimate_fee, KeyFormat};
pub use message::{Framing, Message, Payload};
pub use unspent::Unspent;
pub use currency::Unit;
pub use selection::{CoinSelector, PaymentRequest, SelectedSet, SelectionPolicy};
pub use serializer::{build_input_block, build_output_block};
pub use transaction::Transaction;
pub use input::TxIn;
pub use output::{OutputRequest, TransactionOutput};
pub use sighash::SighashScheme;
pub use template::TransactionSigner;
pub use template::p2pkh::P2PKH;
pub use assembler::{assemble, assemble_with_scheme};
pub use txid::calc_txid;
pub use builder::{BuilderConfig, BuiltTransaction, TransactionBuilder};

#[cfg(test)]
mod tests;
