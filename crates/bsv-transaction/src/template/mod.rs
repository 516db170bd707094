//! Signing collaborators.
//!
//! Assembly needs three things from a key: which public key form it spends
//! with, the public key bytes in that form, and a signature over a digest.
//! The `TransactionSigner` trait captures exactly that, so keys held in an
//! HSM or a remote wallet can stand in for the local [`p2pkh::P2PKH`] signer.

pub mod p2pkh;

use crate::fee::KeyFormat;
use crate::TransactionError;

/// A key able to authorize P2PKH inputs.
pub trait TransactionSigner {
    /// The public key form this signer spends with.
    fn key_format(&self) -> KeyFormat;

    /// The SEC1 public key in the form given by `key_format`.
    fn public_key_bytes(&self) -> Vec<u8>;

    /// Sign a 32-byte digest.
    ///
    /// # Returns
    /// A DER-encoded, deterministic (RFC6979), low-S ECDSA signature without
    /// the sighash byte, or an error if the key cannot sign.
    fn sign_digest(&self, digest: &[u8; 32]) -> Result<Vec<u8>, TransactionError>;
}
