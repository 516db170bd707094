/// Script type: a byte sequence of opcodes and data pushes.
///
/// Locking scripts produced by the builder are either P2PKH or
/// OP_FALSE OP_RETURN data carriers; unlocking scripts are a signature
/// push followed by a public key push.

use std::fmt;

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// Length of a P2PKH locking script.
pub const P2PKH_SCRIPT_LEN: usize = 25;

/// A script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Build the P2PKH locking script for a 20-byte public key hash.
    ///
    /// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
    pub fn p2pkh_lock(public_key_hash: &[u8; 20]) -> Self {
        let mut b = Vec::with_capacity(P2PKH_SCRIPT_LEN);
        b.push(OP_DUP);
        b.push(OP_HASH160);
        b.push(OP_DATA_20);
        b.extend_from_slice(public_key_hash);
        b.push(OP_EQUALVERIFY);
        b.push(OP_CHECKSIG);
        Script(b)
    }

    /// Build an unspendable data script: `OP_FALSE OP_RETURN` followed by
    /// `body` verbatim.
    ///
    /// `body` is expected to already carry its push framing.
    pub fn data_carrier(body: &[u8]) -> Self {
        let mut b = Vec::with_capacity(2 + body.len());
        b.push(OP_FALSE);
        b.push(OP_RETURN);
        b.extend_from_slice(body);
        Script(b)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Encode the script as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Access the raw script bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // -----------------------------------------------------------------------
    // Script classification
    // -----------------------------------------------------------------------

    /// Check if this is a P2PKH locking script.
    ///
    /// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == P2PKH_SCRIPT_LEN
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Check if this is a data output script (OP_RETURN or OP_FALSE OP_RETURN).
    pub fn is_data(&self) -> bool {
        let b = &self.0;
        (!b.is_empty() && b[0] == OP_RETURN)
            || (b.len() > 1 && b[0] == OP_FALSE && b[1] == OP_RETURN)
    }

    // -----------------------------------------------------------------------
    // Data extraction
    // -----------------------------------------------------------------------

    /// Extract the 20-byte public key hash from a P2PKH locking script.
    ///
    /// # Returns
    /// The hash, `EmptyScript` for an empty script, or `NotP2PKH` otherwise.
    pub fn public_key_hash(&self) -> Result<[u8; 20], ScriptError> {
        if self.0.is_empty() {
            return Err(ScriptError::EmptyScript);
        }
        if !self.is_p2pkh() {
            return Err(ScriptError::NotP2PKH);
        }
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&self.0[3..23]);
        Ok(hash)
    }

    /// Parse the script into decoded chunks.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    /// Collect the data of every push in the script, skipping bare opcodes.
    ///
    /// For a data carrier this yields the embedded payload pieces; for a
    /// P2PKH unlocking script, the signature and the public key.
    pub fn push_datas(&self) -> Result<Vec<Vec<u8>>, ScriptError> {
        Ok(self.chunks()?.into_iter().filter_map(|c| c.data).collect())
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Append `data` with its minimal push prefix.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append bare opcodes.
    ///
    /// Push opcodes are rejected since they need their data; use
    /// `append_push_data` for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        if let Some(&op) = opcodes.iter().find(|&&op| is_push_op(op)) {
            return Err(ScriptError::InvalidOpcodeType(op));
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }

    /// Render the script as space-separated ASM.
    pub fn to_asm(&self) -> String {
        match self.chunks() {
            Ok(chunks) => chunks
                .iter()
                .map(|c| match &c.data {
                    Some(d) => hex::encode(d),
                    None => opcode_to_string(c.op).to_string(),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        }
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P2PKH_HEX: &str = "76a914e7c1345fc8f87c68170b3aa798a956c2fe6a9eff88ac";

    fn pkh() -> [u8; 20] {
        let mut h = [0u8; 20];
        h.copy_from_slice(&hex::decode("e7c1345fc8f87c68170b3aa798a956c2fe6a9eff").unwrap());
        h
    }

    #[test]
    fn test_p2pkh_lock_layout() {
        let script = Script::p2pkh_lock(&pkh());
        assert_eq!(script.to_hex(), P2PKH_HEX);
        assert!(script.is_p2pkh());
        assert!(!script.is_data());
        assert_eq!(script.public_key_hash().expect("should extract"), pkh());
        assert_eq!(
            script.to_asm(),
            "OP_DUP OP_HASH160 e7c1345fc8f87c68170b3aa798a956c2fe6a9eff OP_EQUALVERIFY OP_CHECKSIG"
        );
    }

    #[test]
    fn test_public_key_hash_errors() {
        assert!(matches!(
            Script::new().public_key_hash(),
            Err(ScriptError::EmptyScript)
        ));
        let data = Script::data_carrier(&[0x01, 0xff]);
        assert!(matches!(data.public_key_hash(), Err(ScriptError::NotP2PKH)));
    }

    #[test]
    fn test_data_carrier() {
        let mut body = Script::new();
        body.append_push_data(b"hello").unwrap();
        let script = Script::data_carrier(body.to_bytes());
        assert_eq!(script.to_hex(), "006a0568656c6c6f");
        assert!(script.is_data());
        assert_eq!(script.push_datas().unwrap(), vec![b"hello".to_vec()]);
    }

    #[test]
    fn test_bare_op_return_is_data() {
        assert!(Script::from_bytes(&[OP_RETURN]).is_data());
        assert!(!Script::from_bytes(&[OP_FALSE]).is_data());
    }

    #[test]
    fn test_append_opcodes_rejects_push_ops() {
        let mut script = Script::new();
        assert!(script.append_opcodes(&[OP_DUP, OP_HASH160]).is_ok());
        assert!(matches!(
            script.append_opcodes(&[OP_PUSHDATA1]),
            Err(ScriptError::InvalidOpcodeType(OP_PUSHDATA1))
        ));
        assert_eq!(script.len(), 2);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Script::from_hex("zz").is_err());
        assert!(Script::from_hex("").unwrap().is_empty());
    }

    #[test]
    fn test_serde_as_hex() {
        let script = Script::from_hex(P2PKH_HEX).unwrap();
        let json = serde_json::to_string(&script).expect("should serialize");
        assert_eq!(json, format!("\"{}\"", P2PKH_HEX));
        let back: Script = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, script);
    }
}
