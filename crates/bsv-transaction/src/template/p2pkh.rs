//! Pay-to-Public-Key-Hash (P2PKH) script template.
//!
//! Creates standard P2PKH locking scripts (`OP_DUP OP_HASH160 <hash>
//! OP_EQUALVERIFY OP_CHECKSIG`) and unlocking scripts (`<sig> <pubkey>`),
//! and provides a local signer backed by a secp256k1 private key.

use bsv_primitives::ec::PrivateKey;
use bsv_script::{Address, Network, Script};

use crate::fee::KeyFormat;
use crate::template::TransactionSigner;
use crate::TransactionError;

/// Create a P2PKH locking script paying to `address`.
pub fn lock(address: &Address) -> Script {
    address.locking_script()
}

/// Build the unlocking script `push(der ‖ sighash_byte) ‖ push(pubkey)`.
///
/// # Arguments
/// * `der_signature` - The DER signature, without the sighash byte.
/// * `sighash_byte` - Hash type appended to the signature.
/// * `public_key` - SEC1 public key of the spender.
pub fn unlocking_script(
    der_signature: &[u8],
    sighash_byte: u8,
    public_key: &[u8],
) -> Result<Script, TransactionError> {
    let mut sig_buf = Vec::with_capacity(der_signature.len() + 1);
    sig_buf.extend_from_slice(der_signature);
    sig_buf.push(sighash_byte);

    let mut script = Script::new();
    script.append_push_data(&sig_buf)?;
    script.append_push_data(public_key)?;
    Ok(script)
}

/// A local P2PKH signer: a private key plus the public key form it spends with.
#[derive(Clone, Debug)]
pub struct P2PKH {
    private_key: PrivateKey,
    key_format: KeyFormat,
}

impl P2PKH {
    pub fn new(private_key: PrivateKey, key_format: KeyFormat) -> Self {
        P2PKH {
            private_key,
            key_format,
        }
    }

    /// Create a signer from WIF. The WIF compression flag selects the key format.
    pub fn from_wif(wif: &str) -> Result<Self, TransactionError> {
        let (private_key, compressed) = PrivateKey::decode_wif(wif)?;
        Ok(Self::new(private_key, KeyFormat::from_compressed(compressed)))
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// The address this signer's outputs pay to.
    pub fn address(&self, network: Network) -> Address {
        Address::from_public_key(
            &self.private_key.pub_key(),
            self.key_format.is_compressed(),
            network,
        )
    }

    /// The P2PKH locking script this signer can spend.
    pub fn locking_script(&self) -> Script {
        Script::p2pkh_lock(&self.private_key.pub_key().hash160(self.key_format.is_compressed()))
    }
}

impl TransactionSigner for P2PKH {
    fn key_format(&self) -> KeyFormat {
        self.key_format
    }

    fn public_key_bytes(&self) -> Vec<u8> {
        self.private_key
            .pub_key()
            .to_sec1(self.key_format.is_compressed())
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> Result<Vec<u8>, TransactionError> {
        let signature = self
            .private_key
            .sign(digest)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;
        Ok(signature.to_der())
    }
}
