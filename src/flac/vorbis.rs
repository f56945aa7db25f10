// VORBIS_COMMENT implementation for FLAC

use serde::Serialize;

use crate::error::{FormatError, FormatResult};
use crate::utils::encoding::{decode_text, TextEncoding};
use crate::utils::io::PayloadReader;

/// One `KEY=VALUE` entry, key stored as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentEntry {
    pub key: String,
    pub value: String,
}

/// Vorbis comment structure
///
/// Entries keep file order and duplicates; lookups compare keys
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VorbisComment {
    pub vendor_string: String,
    pub comments: Vec<CommentEntry>,
}

impl VorbisComment {
    /// Decode a VORBIS_COMMENT payload.
    pub fn from_bytes(data: &[u8]) -> FormatResult<Self> {
        let mut reader = PayloadReader::new(data);

        // Vendor string and entry lengths are little-endian, unlike the rest of FLAC
        let vendor = reader.read_le_prefixed().ok_or(FormatError::TruncatedComment)?;
        let vendor_string = decode_text(vendor, TextEncoding::Utf8);

        let comment_count = reader.read_le_u32().ok_or(FormatError::TruncatedComment)? as usize;

        // Each entry needs at least its 4-byte length prefix
        let mut comments = Vec::with_capacity(comment_count.min(reader.remaining() / 4));
        for _ in 0..comment_count {
            let raw = reader.read_le_prefixed().ok_or(FormatError::TruncatedComment)?;
            comments.push(Self::parse_entry(&decode_text(raw, TextEncoding::Utf8)));
        }

        Ok(VorbisComment {
            vendor_string,
            comments,
        })
    }

    /// Split on the first `=`; an entry without one becomes a key with an empty value.
    fn parse_entry(entry: &str) -> CommentEntry {
        let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
        CommentEntry {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the first value for a field name
    pub fn get(&self, field: &str) -> Option<&str> {
        self.comments
            .iter()
            .find(|entry| entry.key.eq_ignore_ascii_case(field))
            .map(|entry| entry.value.as_str())
    }

    /// All values for a field name, in file order
    pub fn get_all<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.comments
            .iter()
            .filter(move |entry| entry.key.eq_ignore_ascii_case(field))
            .map(|entry| entry.value.as_str())
    }

    /// Iterate `(key, value)` pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.comments
            .iter()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Common Vorbis comment field names
pub struct VorbisFields;
impl VorbisFields {
    pub const TITLE: &'static str = "TITLE";
    pub const ARTIST: &'static str = "ARTIST";
    pub const ALBUM: &'static str = "ALBUM";
    pub const DATE: &'static str = "DATE";
    pub const TRACKNUMBER: &'static str = "TRACKNUMBER";
    pub const GENRE: &'static str = "GENRE";
    pub const COMMENT: &'static str = "COMMENT";
}
