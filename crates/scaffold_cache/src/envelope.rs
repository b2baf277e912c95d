//! The binary envelope wrapped around every cache payload.
//!
//! Payloads are opaque to the cache; the envelope carries magic bytes, a
//! format version, the producing toolkit version, and a checksum so the
//! storage format can evolve and corruption reads as a miss.

use scaffold_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Magic bytes identifying a Scaffold cache entry.
const ENTRY_MAGIC: [u8; 4] = *b"SCFD";

/// Current envelope format version. Increment on breaking changes to
/// the header or payload layout.
const ENTRY_FORMAT_VERSION: u32 = 1;

/// Header prepended to every cache payload for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryHeader {
    /// Magic bytes: must be `b"SCFD"`.
    pub magic: [u8; 4],

    /// Envelope format version.
    pub format_version: u32,

    /// Toolkit version that produced this entry.
    pub producer: String,

    /// Content hash of the payload (for integrity checks).
    pub checksum: ContentHash,
}

/// Seals a payload into envelope bytes.
///
/// Layout: 4-byte header length (little-endian) + bincode header + payload.
pub fn seal(payload: &[u8], producer: &str) -> Result<Vec<u8>, CacheError> {
    let header = EntryHeader {
        magic: ENTRY_MAGIC,
        format_version: ENTRY_FORMAT_VERSION,
        producer: producer.to_string(),
        checksum: ContentHash::from_bytes(payload),
    };

    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

    let header_len = header_bytes.len() as u32;
    let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
    output.extend_from_slice(&header_len.to_le_bytes());
    output.extend_from_slice(&header_bytes);
    output.extend_from_slice(payload);
    Ok(output)
}

/// Opens envelope bytes, validating the header.
///
/// Returns `None` if the header is truncated or invalid, the format
/// version doesn't match, or the checksum doesn't verify. This is
/// fail-safe: corruption results in a cache miss.
pub fn open(raw: &[u8]) -> Option<Vec<u8>> {
    // Need at least 4 bytes for the header length
    if raw.len() < 4 {
        return None;
    }

    let header_len = u32::from_le_bytes(raw[..4].try_into().ok()?) as usize;
    if raw.len() < 4 + header_len {
        return None;
    }

    let header: EntryHeader =
        bincode::serde::decode_from_slice(&raw[4..4 + header_len], bincode::config::standard())
            .ok()?
            .0;

    if header.magic != ENTRY_MAGIC {
        return None;
    }
    if header.format_version != ENTRY_FORMAT_VERSION {
        return None;
    }

    let payload = &raw[4 + header_len..];
    if ContentHash::from_bytes(payload) != header.checksum {
        return None;
    }

    Some(payload.to_vec())
}
