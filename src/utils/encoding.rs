// Encoding utilities

use base64::{engine::general_purpose::STANDARD, Engine as _};
use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::Serializer;

/// Text encodings found in FLAC metadata blocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextEncoding {
    /// Vorbis comments and picture descriptions
    Utf8,
    /// MIME types, catalog numbers, ISRCs and application IDs.
    /// Bytes outside printable ASCII are mapped through Windows-1252.
    Ascii,
}

/// Decode text with specified encoding, replacing malformed sequences
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => UTF_8.decode_without_bom_handling(data).0.into_owned(),
        TextEncoding::Ascii => WINDOWS_1252.decode_without_bom_handling(data).0.into_owned(),
    }
}

/// Decode a fixed-width, NUL-padded ASCII field
pub fn decode_padded(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    decode_text(&data[..end], TextEncoding::Ascii)
}

/// Serialize raw bytes as a base64 string
pub fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

/// Lowercase hex rendering of raw bytes
pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Serialize raw bytes as a lowercase hex string
pub fn serialize_hex<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_hex(data))
}
