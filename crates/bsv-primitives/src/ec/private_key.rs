//! secp256k1 private key with WIF import and export.
//!
//! Wraps a k256 signing key. A WIF string also records whether the owner
//! spends with the compressed or uncompressed public key, so decoding
//! returns that flag alongside the key.

use k256::ecdsa::SigningKey;

use crate::base58::{check_decode, check_encode};
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Mainnet WIF prefix byte.
pub const MAINNET_WIF_PREFIX: u8 = 0x80;

/// Testnet WIF prefix byte.
pub const TESTNET_WIF_PREFIX: u8 = 0xef;

/// Compression flag byte appended to WIF for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key used to sign transaction inputs.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the scalar is in `[1, n)`, otherwise `InvalidPrivateKey`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a WIF string, returning the key and its compression flag.
    ///
    /// Accepts both mainnet (`0x80`) and testnet (`0xef`) prefixes. The
    /// payload is 33 bytes for an uncompressed key and 34 bytes (trailing
    /// `0x01`) for a compressed one.
    ///
    /// # Returns
    /// `(key, compressed)` on success, or `InvalidWif` / `ChecksumMismatch`.
    pub fn decode_wif(wif: &str) -> Result<(Self, bool), PrimitivesError> {
        let payload = check_decode(wif).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => e,
            other => PrimitivesError::InvalidWif(other.to_string()),
        })?;

        match payload.first() {
            Some(&MAINNET_WIF_PREFIX) | Some(&TESTNET_WIF_PREFIX) => {}
            _ => {
                return Err(PrimitivesError::InvalidWif(
                    "unknown network prefix".to_string(),
                ))
            }
        }

        let compressed = match payload.len() {
            34 if payload[33] == COMPRESS_MAGIC => true,
            34 => {
                return Err(PrimitivesError::InvalidWif(
                    "invalid compression flag".to_string(),
                ))
            }
            33 => false,
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "invalid payload length {}",
                    n
                )))
            }
        };

        let key = Self::from_bytes(&payload[1..1 + PRIVATE_KEY_BYTES_LEN])?;
        Ok((key, compressed))
    }

    /// Decode a WIF string, discarding the compression flag.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        Self::decode_wif(wif).map(|(key, _)| key)
    }

    /// Encode the key as WIF.
    ///
    /// # Arguments
    /// * `prefix` - Network prefix byte (`MAINNET_WIF_PREFIX` or `TESTNET_WIF_PREFIX`).
    /// * `compressed` - Whether to append the compressed-public-key flag.
    pub fn to_wif(&self, prefix: u8, compressed: bool) -> String {
        let mut payload = Vec::with_capacity(2 + PRIVATE_KEY_BYTES_LEN);
        payload.push(prefix);
        payload.extend_from_slice(&self.to_bytes());
        if compressed {
            payload.push(COMPRESS_MAGIC);
        }
        check_encode(&payload)
    }

    /// Serialize the key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Sign a 32-byte digest with an RFC6979 nonce, producing a low-S signature.
    pub fn sign(&self, digest: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        Signature::sign(digest, self)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}
