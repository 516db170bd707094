/// Cryptographic primitives and wire helpers for the BSV transaction builder.
///
/// This crate provides the foundational building blocks:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Chain hash type for transaction identification
/// - Compact-size varints and little-endian readers/writers
/// - Base58Check encoding/decoding
/// - secp256k1 keys and deterministic ECDSA signatures

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod base58;
pub mod ec;

mod error;
pub use error::PrimitivesError;
