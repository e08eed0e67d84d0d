//! Tagged chunk decoding
//!
//! Serato files are a flat sequence of **big-endian** TLV chunks:
//! - 4 bytes: tag
//! - 4 bytes: payload length
//! - `length` bytes: payload
//!
//! Container tags (`oses`, `oent`, `otrk`, `adat`) hold a nested chunk
//! sequence. Any other payload is a leaf: 4 bytes are read as a `u32`,
//! everything else as text with NUL bytes dropped. `vrsn` is always text.

use std::borrow::Cow;
use std::io::Cursor;

use binrw::{BinRead, BinReaderExt};
use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::tag::Tag;

/// Size of the tag + length header
pub const HEADER_LEN: usize = 8;

/// Nesting limit; real files stay around 3 levels
pub const MAX_DEPTH: usize = 32;

#[derive(BinRead, Debug)]
#[br(big)]
struct ChunkHeader {
    tag: [u8; 4],
    length: u32,
}

/// One decoded TLV unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub tag: Tag,
    /// Payload length as declared in the header
    pub length: u32,
    pub value: ChunkValue,
}

/// Decoded payload, chosen once from the tag and length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChunkValue {
    Text(String),
    UInt(u32),
    Children(Vec<Chunk>),
}

impl Chunk {
    /// Bytes this chunk occupies including its header
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.length as usize
    }

    pub fn children(&self) -> Option<&[Chunk]> {
        match &self.value {
            ChunkValue::Children(children) => Some(children),
            _ => None,
        }
    }

    /// The single nested chunk of a wrapper container
    pub fn first_child(&self) -> Option<&Chunk> {
        self.children().and_then(|c| c.first())
    }

    pub fn text(&self) -> Option<&str> {
        match &self.value {
            ChunkValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match &self.value {
            ChunkValue::UInt(n) => Some(*n),
            ChunkValue::Text(_) | ChunkValue::Children(_) => None,
        }
    }

    /// Text view of a leaf. A 4-byte text payload was decoded as an integer,
    /// so its bytes are turned back into text here.
    pub fn text_lossy(&self) -> Option<Cow<'_, str>> {
        match &self.value {
            ChunkValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            ChunkValue::UInt(n) => Some(Cow::Owned(decode_text(&n.to_be_bytes()))),
            ChunkValue::Children(_) => None,
        }
    }
}

/// Find the child with the given tag. A repeated field overrides the ones
/// before it, so the last match wins.
pub fn find<'a>(chunks: &'a [Chunk], tag: Tag) -> Option<&'a Chunk> {
    chunks.iter().rfind(|c| c.tag == tag)
}

/// Decode every chunk in `buffer[start..end]`
///
/// The range must be covered exactly: a header or payload that runs past
/// `end` is an error rather than a truncated chunk.
pub fn decode(buffer: &[u8], start: usize, end: usize) -> Result<Vec<Chunk>> {
    if start > end || end > buffer.len() {
        return Err(Error::InvalidRange {
            start,
            end,
            len: buffer.len(),
        });
    }
    decode_range(buffer, start, end, 0)
}

/// Decode a whole buffer
pub fn decode_all(buffer: &[u8]) -> Result<Vec<Chunk>> {
    decode(buffer, 0, buffer.len())
}

fn decode_range(buffer: &[u8], start: usize, end: usize, depth: usize) -> Result<Vec<Chunk>> {
    if depth > MAX_DEPTH {
        return Err(Error::TooDeep(MAX_DEPTH, start));
    }

    let mut chunks = Vec::new();
    let mut cursor = start;
    while cursor < end {
        let chunk = decode_chunk(buffer, cursor, end, depth)?;
        cursor += chunk.encoded_len();
        chunks.push(chunk);
    }
    Ok(chunks)
}

fn decode_chunk(buffer: &[u8], offset: usize, end: usize, depth: usize) -> Result<Chunk> {
    let available = end - offset;
    if available < HEADER_LEN {
        return Err(Error::TruncatedHeader { offset, available });
    }

    let mut reader = Cursor::new(&buffer[offset..offset + HEADER_LEN]);
    let header: ChunkHeader = reader.read_be()?;

    let payload_start = offset + HEADER_LEN;
    let payload_end = payload_start
        .checked_add(header.length as usize)
        .filter(|&e| e <= end)
        .ok_or(Error::Truncated {
            offset,
            length: header.length,
            available: end - payload_start,
        })?;

    let tag = Tag(header.tag);
    trace!(offset, %tag, length = header.length, depth, "chunk");

    let payload = &buffer[payload_start..payload_end];
    let value = if tag.is_container() {
        ChunkValue::Children(decode_range(buffer, payload_start, payload_end, depth + 1)?)
    } else {
        match <[u8; 4]>::try_from(payload) {
            Ok(bytes) if !tag.is_text() => ChunkValue::UInt(u32::from_be_bytes(bytes)),
            _ => ChunkValue::Text(decode_text(payload)),
        }
    };

    Ok(Chunk {
        tag,
        length: header.length,
        value,
    })
}

fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\0', "")
}
