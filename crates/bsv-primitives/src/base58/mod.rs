//! Base58Check encoding and decoding.
//!
//! Addresses and WIF private keys are a version byte plus payload,
//! suffixed with the first four bytes of SHA-256d and rendered in
//! Bitcoin's Base58 alphabet.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Number of checksum bytes appended by Base58Check.
const CHECKSUM_LEN: usize = 4;

/// Encode `data` with a 4-byte double-SHA-256 checksum appended.
///
/// # Arguments
/// * `data` - The bytes to encode (typically version byte + payload).
///
/// # Returns
/// A Base58Check-encoded string.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(payload).into_string()
}

/// Decode a Base58Check string, verifying and stripping the checksum.
///
/// # Returns
/// The payload without checksum, `InvalidBase58` for bad characters or
/// short input, or `ChecksumMismatch` when the checksum does not verify.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = bs58::decode(s)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    if checksum != &sha256d(payload)[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_roundtrip() {
        let payload = hex::decode("00f54a5851e9372b87810a8e60cdd2e7cfd80b6e31").unwrap();
        let encoded = check_encode(&payload);
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_known_testnet_address() {
        let payload = check_decode("n2eMqTT929pb1RDNuqEnxdaLau1rxy3efi").unwrap();
        assert_eq!(payload[0], 0x6f);
        assert_eq!(
            hex::encode(&payload[1..]),
            "e7c1345fc8f87c68170b3aa798a956c2fe6a9eff"
        );
    }

    #[test]
    fn test_bad_checksum() {
        let mut encoded = check_encode(&[0x80, 0x01, 0x02, 0x03]);
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert!(matches!(
            check_decode(&encoded),
            Err(PrimitivesError::ChecksumMismatch) | Err(PrimitivesError::InvalidBase58(_))
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(check_decode("invalid!@#$%").is_err());
        assert!(check_decode("").is_err());
    }
}
