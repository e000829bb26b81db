//! Wire model and string framing of pagination cursors.
//!
//! A token is the JSON form of a [RawCursor], brotli compressed and base64
//! (URL safe, unpadded) encoded. Tokens starting with `{` are read as plain
//! JSON so a cursor can be written by hand while debugging.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use std::io::{Read, Write};

use crate::{error::CursorDecodeError, scalar::CursorScalar, sort::SortDirection};

const BROTLI_BUFFER_SIZE: usize = 4096;
const BROTLI_QUALITY: u32 = 11;
const BROTLI_LG_WINDOW: u32 = 22;
/// Upper bound on the decompressed JSON of a token.
pub const MAX_CURSOR_BYTES: usize = 16 * 1024;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorEncoding {
    #[default]
    Compressed,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCursorEntry {
    pub key: String,
    #[serde(
        rename = "sort",
        default,
        skip_serializing_if = "SortDirection::is_default"
    )]
    pub direction: SortDirection,
    pub value: CursorScalar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawContextEntry {
    pub key: String,
    pub value: CursorScalar,
}

/// Untyped cursor as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCursor {
    pub name: String,
    pub value: Vec<RawCursorEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<RawContextEntry>>,
}

impl RawCursor {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("could not serialize cursor")
    }

    pub fn encode(&self, encoding: CursorEncoding) -> String {
        let json = self.to_json();
        match encoding {
            CursorEncoding::Plain => json,
            CursorEncoding::Compressed => match compress(json.as_bytes()) {
                Ok(bytes) => URL_SAFE_NO_PAD.encode(bytes),
                Err(e) => {
                    tracing::warn!(error = %e, "cursor compression failed, emitting plain cursor");
                    json
                }
            },
        }
    }

    pub fn decode(token: &str) -> Result<Self, CursorDecodeError> {
        let raw = if token.starts_with('{') {
            serde_json::from_str(token)?
        } else {
            let bytes = URL_SAFE_NO_PAD.decode(token.as_bytes())?;
            let json = decompress(&bytes).map_err(CursorDecodeError::Decompress)?;
            serde_json::from_slice(&json)?
        };
        Ok(raw)
    }
}

/// Decodes the outer framing of a token without checking its kind.
pub fn inspect(token: &str) -> Result<RawCursor, CursorDecodeError> {
    RawCursor::decode(token)
}

fn compress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut compressed = Vec::with_capacity(bytes.len());
    {
        let mut writer = brotli::CompressorWriter::new(
            &mut compressed,
            BROTLI_BUFFER_SIZE,
            BROTLI_QUALITY,
            BROTLI_LG_WINDOW,
        );
        writer.write_all(bytes)?;
        writer.flush()?;
    }
    Ok(compressed)
}

fn decompress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    brotli::Decompressor::new(bytes, BROTLI_BUFFER_SIZE)
        .take(MAX_CURSOR_BYTES as u64 + 1)
        .read_to_end(&mut decompressed)?;
    if decompressed.len() > MAX_CURSOR_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("cursor expands beyond {MAX_CURSOR_BYTES} bytes"),
        ));
    }
    Ok(decompressed)
}
