// FLAC metadata block implementation

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{FormatError, FormatResult};

/// FLAC file signature
pub const FLAC_SIGNATURE: &[u8; 4] = b"fLaC";

/// Size of a metadata block header in bytes
pub const BLOCK_HEADER_SIZE: usize = 4;

/// Largest payload length a 24-bit header field can declare
pub const MAX_BLOCK_LENGTH: u32 = (1 << 24) - 1;

/// FLAC metadata block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    CueSheet,
    Picture,
    /// Reserved codes 7-126
    Unknown(u8),
}

impl BlockType {
    /// Code 127 is forbidden by the format and yields `None`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte & 0x7F {
            0 => Some(BlockType::StreamInfo),
            1 => Some(BlockType::Padding),
            2 => Some(BlockType::Application),
            3 => Some(BlockType::SeekTable),
            4 => Some(BlockType::VorbisComment),
            5 => Some(BlockType::CueSheet),
            6 => Some(BlockType::Picture),
            127 => None,
            n => Some(BlockType::Unknown(n)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            BlockType::StreamInfo => 0,
            BlockType::Padding => 1,
            BlockType::Application => 2,
            BlockType::SeekTable => 3,
            BlockType::VorbisComment => 4,
            BlockType::CueSheet => 5,
            BlockType::Picture => 6,
            BlockType::Unknown(n) => n,
        }
    }

    /// Block types the format allows at most once per file
    pub fn is_unique(self) -> bool {
        matches!(
            self,
            BlockType::StreamInfo | BlockType::SeekTable | BlockType::VorbisComment
        )
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::StreamInfo => write!(f, "STREAMINFO"),
            BlockType::Padding => write!(f, "PADDING"),
            BlockType::Application => write!(f, "APPLICATION"),
            BlockType::SeekTable => write!(f, "SEEKTABLE"),
            BlockType::VorbisComment => write!(f, "VORBIS_COMMENT"),
            BlockType::CueSheet => write!(f, "CUESHEET"),
            BlockType::Picture => write!(f, "PICTURE"),
            BlockType::Unknown(n) => write!(f, "UNKNOWN({})", n),
        }
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// FLAC metadata block header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetadataBlockHeader {
    pub is_last: bool,
    pub block_type: BlockType,
    pub length: u32,
}

impl MetadataBlockHeader {
    /// Parse a header from its 4 bytes; `offset` is only used for error reporting.
    pub fn from_bytes(bytes: [u8; BLOCK_HEADER_SIZE], offset: u64) -> FormatResult<Self> {
        let is_last = (bytes[0] & 0x80) != 0;
        let block_type =
            BlockType::from_byte(bytes[0]).ok_or(FormatError::InvalidBlockType { offset })?;

        // Length is big-endian 24-bit
        let length = u32::from_be_bytes([0, bytes[1], bytes[2], bytes[3]]);

        Ok(MetadataBlockHeader {
            is_last,
            block_type,
            length,
        })
    }

    /// Serialize to 4 bytes.
    pub fn to_bytes(&self) -> [u8; BLOCK_HEADER_SIZE] {
        let type_byte = self.block_type.code() | if self.is_last { 0x80 } else { 0 };
        let len = self.length.min(MAX_BLOCK_LENGTH).to_be_bytes();
        [type_byte, len[1], len[2], len[3]]
    }
}

/// Raw metadata block as extracted from the container, not yet decoded
#[derive(Debug, Clone)]
pub struct MetadataBlock {
    pub header: MetadataBlockHeader,
    /// Offset of the block header from the start of the source
    pub offset: u64,
    pub payload: Vec<u8>,
}

impl MetadataBlock {
    pub fn block_type(&self) -> BlockType {
        self.header.block_type
    }

    pub fn is_last(&self) -> bool {
        self.header.is_last
    }

    /// Header plus payload size in bytes
    pub fn total_size(&self) -> u64 {
        BLOCK_HEADER_SIZE as u64 + self.header.length as u64
    }
}
