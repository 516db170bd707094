//! Script chunk parsing and push-data encoding.
//!
//! A chunk is either a bare opcode or a data push together with its bytes.
//! Unlike a full interpreter this parser treats OP_RETURN as an ordinary
//! opcode, so the pushes that follow it in a data output stay visible.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The pushed bytes, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

/// Decode raw script bytes into chunks.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// The parsed chunks in order, or `DataTooSmall` if a push runs past the end.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        pos += 1;

        let len_width = match op {
            OP_DATA_1..=OP_DATA_75 => 0,
            OP_PUSHDATA1 => 1,
            OP_PUSHDATA2 => 2,
            OP_PUSHDATA4 => 4,
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                continue;
            }
        };

        let length = if len_width == 0 {
            op as usize
        } else {
            let field = bytes
                .get(pos..pos + len_width)
                .ok_or(ScriptError::DataTooSmall)?;
            pos += len_width;
            let mut le = [0u8; 4];
            le[..len_width].copy_from_slice(field);
            u32::from_le_bytes(le) as usize
        };

        let end = pos.checked_add(length).ok_or(ScriptError::DataTooSmall)?;
        let data = bytes.get(pos..end).ok_or(ScriptError::DataTooSmall)?;
        chunks.push(ScriptChunk {
            op,
            data: Some(data.to_vec()),
        });
        pos = end;
    }

    Ok(chunks)
}

/// Compute the minimal push prefix for a payload of `data_len` bytes.
///
/// Lengths up to 75 are pushed directly; larger payloads use
/// OP_PUSHDATA1, OP_PUSHDATA2 or OP_PUSHDATA4 with a little-endian length.
///
/// # Returns
/// The prefix bytes, or `DataTooBig` if the length does not fit in 4 bytes.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xff {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xffff {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xffff_ffff {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

/// Encode several payloads as consecutive pushes.
///
/// # Returns
/// The concatenated pushes, or `PartTooBig(i)` naming the offending part.
pub fn encode_push_datas(parts: &[&[u8]]) -> Result<Vec<u8>, ScriptError> {
    let mut result = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let prefix = push_data_prefix(part.len()).map_err(|_| ScriptError::PartTooBig(i))?;
        result.extend_from_slice(&prefix);
        result.extend_from_slice(part);
    }
    Ok(result)
}
