/// Script encoding and P2PKH address handling for the BSV transaction builder.
///
/// Provides the Script byte newtype, the opcode subset used by P2PKH and
/// OP_RETURN data outputs, push-data framing, and Base58Check addresses.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod address;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use address::{Address, Network};
pub use chunk::ScriptChunk;
