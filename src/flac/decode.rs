// FLAC block decoder: raw payload to typed block

use serde::Serialize;

use crate::error::FormatResult;
use crate::flac::application::Application;
use crate::flac::cuesheet::CueSheet;
use crate::flac::metadata::BlockType;
use crate::flac::picture::Picture;
use crate::flac::seektable::SeekTable;
use crate::flac::streaminfo::StreamInfo;
use crate::flac::vorbis::VorbisComment;
use crate::utils::encoding::serialize_base64;

/// Typed contents of a metadata block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecodedBlock {
    #[serde(rename = "STREAMINFO")]
    StreamInfo(StreamInfo),
    /// Only the length is kept; the content is never inspected.
    Padding {
        length: usize,
    },
    Application(Application),
    #[serde(rename = "SEEKTABLE")]
    SeekTable(SeekTable),
    VorbisComment(VorbisComment),
    #[serde(rename = "CUESHEET")]
    CueSheet(CueSheet),
    Picture(Picture),
    Unknown {
        code: u8,
        #[serde(serialize_with = "serialize_base64")]
        data: Vec<u8>,
    },
}

impl DecodedBlock {
    pub fn block_type(&self) -> BlockType {
        match self {
            DecodedBlock::StreamInfo(_) => BlockType::StreamInfo,
            DecodedBlock::Padding { .. } => BlockType::Padding,
            DecodedBlock::Application(_) => BlockType::Application,
            DecodedBlock::SeekTable(_) => BlockType::SeekTable,
            DecodedBlock::VorbisComment(_) => BlockType::VorbisComment,
            DecodedBlock::CueSheet(_) => BlockType::CueSheet,
            DecodedBlock::Picture(_) => BlockType::Picture,
            DecodedBlock::Unknown { code, .. } => BlockType::Unknown(*code),
        }
    }
}

/// Decode one payload according to its declared type.
///
/// Pure function of its inputs: no block depends on any other, so payloads
/// can be decoded in any order or in parallel. PADDING and unknown blocks
/// never fail.
pub fn decode(block_type: BlockType, payload: &[u8]) -> FormatResult<DecodedBlock> {
    let block = match block_type {
        BlockType::StreamInfo => DecodedBlock::StreamInfo(StreamInfo::from_bytes(payload)?),
        BlockType::Padding => DecodedBlock::Padding {
            length: payload.len(),
        },
        BlockType::Application => DecodedBlock::Application(Application::from_bytes(payload)?),
        BlockType::SeekTable => DecodedBlock::SeekTable(SeekTable::from_bytes(payload)?),
        BlockType::VorbisComment => {
            DecodedBlock::VorbisComment(VorbisComment::from_bytes(payload)?)
        }
        BlockType::CueSheet => DecodedBlock::CueSheet(CueSheet::from_bytes(payload)?),
        BlockType::Picture => DecodedBlock::Picture(Picture::from_bytes(payload)?),
        BlockType::Unknown(code) => DecodedBlock::Unknown {
            code,
            data: payload.to_vec(),
        },
    };
    Ok(block)
}
