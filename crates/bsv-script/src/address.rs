/// P2PKH address handling.
///
/// An address is a network version byte plus a 20-byte public key hash in
/// Base58Check. It resolves to, and can be recovered from, a P2PKH
/// locking script.

use std::fmt;
use std::str::FromStr;

use bsv_primitives::base58::{check_decode, check_encode};
use bsv_primitives::ec::PublicKey;
use bsv_primitives::PrimitivesError;

use crate::{Script, ScriptError};

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;

/// Network type for address prefix selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// Prefix 0x00, addresses start with '1'.
    Mainnet,
    /// Prefix 0x6f, addresses start with 'm' or 'n'.
    Testnet,
}

impl Network {
    fn version_byte(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_P2PKH,
            Network::Testnet => TESTNET_P2PKH,
        }
    }
}

/// A P2PKH address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The Base58Check address string.
    pub address_string: String,
    /// The 20-byte RIPEMD-160(SHA-256(pubkey)) hash.
    pub public_key_hash: [u8; 20],
    /// The network this address belongs to.
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check address string.
    ///
    /// # Arguments
    /// * `addr` - The Base58Check address string.
    ///
    /// # Returns
    /// An `Address`, or an error for bad characters, a failed checksum,
    /// a wrong payload length or an unknown version byte.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let payload = check_decode(addr).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => {
                ScriptError::InvalidAddress(format!("checksum failed for '{}'", addr))
            }
            _ => ScriptError::InvalidAddress(format!("bad encoding for '{}'", addr)),
        })?;

        if payload.len() != 21 {
            return Err(ScriptError::InvalidAddress(format!(
                "invalid length for '{}'",
                addr
            )));
        }

        let network = match payload[0] {
            MAINNET_P2PKH => Network::Mainnet,
            TESTNET_P2PKH => Network::Testnet,
            _ => return Err(ScriptError::UnsupportedAddress(addr.to_string())),
        };

        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&payload[1..]);

        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash: pkh,
            network,
        })
    }

    /// Create an address from a 20-byte public key hash.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let mut payload = Vec::with_capacity(21);
        payload.push(network.version_byte());
        payload.extend_from_slice(hash);

        Address {
            address_string: check_encode(&payload),
            public_key_hash: *hash,
            network,
        }
    }

    /// Create the address of a public key in the given form.
    ///
    /// # Arguments
    /// * `pub_key` - The public key.
    /// * `compressed` - Which SEC1 form the owner spends with.
    /// * `network` - The target network.
    pub fn from_public_key(pub_key: &PublicKey, compressed: bool, network: Network) -> Self {
        Self::from_public_key_hash(&pub_key.hash160(compressed), network)
    }

    /// Recover the address a P2PKH locking script pays to.
    pub fn from_locking_script(script: &Script, network: Network) -> Result<Self, ScriptError> {
        Ok(Self::from_public_key_hash(&script.public_key_hash()?, network))
    }

    /// Resolve the address to its P2PKH locking script.
    pub fn locking_script(&self) -> Script {
        Script::p2pkh_lock(&self.public_key_hash)
    }
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}
