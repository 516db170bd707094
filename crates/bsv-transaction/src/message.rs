//! Encoding of arbitrary payloads into OP_RETURN data outputs.
//!
//! Default framing splits the payload into chunks of at most
//! [`MESSAGE_CHUNK_LIMIT`] bytes; each chunk becomes its own data output with
//! a minimal push prefix. Custom framing hands the caller's bytes to a single
//! output untouched, so the caller can lay out several pushes themselves.

use crate::output::OutputRequest;
use crate::TransactionError;

/// Largest payload carried by one data output.
pub const MESSAGE_CHUNK_LIMIT: usize = 100_000;

/// The content of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// UTF-8 text. Only valid with push-data framing.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(s) => s.as_bytes(),
            Payload::Bytes(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(b: Vec<u8>) -> Self {
        Payload::Bytes(b)
    }
}

/// How a payload is laid out after `OP_FALSE OP_RETURN`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Framing {
    /// Chunked, each chunk behind a minimal push prefix.
    #[default]
    PushData,
    /// Emitted verbatim as one opaque element.
    Custom,
}

/// A payload to embed in the transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub payload: Payload,
    pub framing: Framing,
}

impl Message {
    /// Text with default framing.
    pub fn text(text: &str) -> Self {
        Message {
            payload: Payload::from(text),
            framing: Framing::PushData,
        }
    }

    /// Raw bytes with default framing.
    pub fn bytes(bytes: Vec<u8>) -> Self {
        Message {
            payload: Payload::Bytes(bytes),
            framing: Framing::PushData,
        }
    }

    /// Caller-framed bytes, emitted as-is.
    pub fn custom(bytes: Vec<u8>) -> Self {
        Message {
            payload: Payload::Bytes(bytes),
            framing: Framing::Custom,
        }
    }
}

/// Turn a message into the data outputs that carry it.
///
/// # Arguments
/// * `message` - The payload and its framing.
///
/// # Returns
/// The data outputs in payload order. An empty payload yields none.
/// Custom framing fails with `TypeMismatch` for text and `UsageError` when
/// the bytes exceed [`MESSAGE_CHUNK_LIMIT`].
pub fn encode(message: &Message) -> Result<Vec<OutputRequest>, TransactionError> {
    match message.framing {
        Framing::PushData => Ok(message
            .payload
            .as_bytes()
            .chunks(MESSAGE_CHUNK_LIMIT)
            .map(|chunk| OutputRequest::Data {
                payload: Payload::Bytes(chunk.to_vec()),
                framing: Framing::PushData,
            })
            .collect()),
        Framing::Custom => {
            let bytes = match &message.payload {
                Payload::Bytes(b) => b,
                Payload::Text(_) => {
                    return Err(TransactionError::TypeMismatch(
                        "custom framing requires raw bytes, got text".to_string(),
                    ))
                }
            };
            if bytes.len() > MESSAGE_CHUNK_LIMIT {
                return Err(TransactionError::UsageError(format!(
                    "custom-framed message is {} bytes, limit is {}",
                    bytes.len(),
                    MESSAGE_CHUNK_LIMIT
                )));
            }
            if bytes.is_empty() {
                return Ok(Vec::new());
            }
            Ok(vec![OutputRequest::Data {
                payload: Payload::Bytes(bytes.clone()),
                framing: Framing::Custom,
            }])
        }
    }
}
