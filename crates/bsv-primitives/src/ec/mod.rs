/// Elliptic curve cryptography on secp256k1.
///
/// Private keys (with WIF import), public keys in both SEC1 forms, and
/// deterministic low-S ECDSA signatures in DER encoding.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
