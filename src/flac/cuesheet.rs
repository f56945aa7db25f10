// CUESHEET implementation for FLAC

use serde::Serialize;

use crate::error::{FormatError, FormatResult};
use crate::utils::encoding::decode_padded;
use crate::utils::io::PayloadReader;

const CATALOG_SIZE: usize = 128;
const ISRC_SIZE: usize = 12;
/// Reserved bytes following the CD flag byte in the sheet header
const SHEET_RESERVED: usize = 258;
/// Reserved bytes following the flag byte in a track header
const TRACK_RESERVED: usize = 13;
const INDEX_RESERVED: usize = 3;

/// Track number of the lead-out track on a CD-DA cue sheet
pub const CD_LEAD_OUT_TRACK: u8 = 170;
/// Track number of the lead-out track on any other cue sheet
pub const LEAD_OUT_TRACK: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CueSheetIndex {
    /// Offset in samples relative to the track offset
    pub offset: u64,
    pub number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CueSheetTrack {
    /// Offset in samples from the beginning of the stream
    pub offset: u64,
    pub number: u8,
    pub isrc: String,
    pub is_audio: bool,
    pub pre_emphasis: bool,
    pub indices: Vec<CueSheetIndex>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CueSheet {
    pub media_catalog_number: String,
    pub lead_in_samples: u64,
    pub is_cd: bool,
    pub tracks: Vec<CueSheetTrack>,
}

impl CueSheet {
    pub fn from_bytes(data: &[u8]) -> FormatResult<Self> {
        let mut reader = PayloadReader::new(data);
        Self::read(&mut reader).ok_or(FormatError::TruncatedCueSheet)
    }

    fn read(reader: &mut PayloadReader<'_>) -> Option<Self> {
        let media_catalog_number = decode_padded(reader.read_bytes(CATALOG_SIZE)?);
        let lead_in_samples = reader.read_be_u64()?;
        let is_cd = reader.read_u8()? & 0x80 != 0;
        reader.skip(SHEET_RESERVED)?;

        let track_count = reader.read_u8()?;
        let mut tracks = Vec::with_capacity(track_count as usize);
        for _ in 0..track_count {
            tracks.push(Self::read_track(reader)?);
        }

        Some(CueSheet {
            media_catalog_number,
            lead_in_samples,
            is_cd,
            tracks,
        })
    }

    fn read_track(reader: &mut PayloadReader<'_>) -> Option<CueSheetTrack> {
        let offset = reader.read_be_u64()?;
        let number = reader.read_u8()?;
        let isrc = decode_padded(reader.read_bytes(ISRC_SIZE)?);

        let flags = reader.read_u8()?;
        reader.skip(TRACK_RESERVED)?;

        let index_count = reader.read_u8()?;
        let mut indices = Vec::with_capacity(index_count as usize);
        for _ in 0..index_count {
            let offset = reader.read_be_u64()?;
            let number = reader.read_u8()?;
            reader.skip(INDEX_RESERVED)?;
            indices.push(CueSheetIndex { offset, number });
        }

        Some(CueSheetTrack {
            offset,
            number,
            isrc,
            is_audio: flags & 0x80 == 0,
            pre_emphasis: flags & 0x40 != 0,
            indices,
        })
    }

    /// The lead-out track, if present, is always last.
    pub fn lead_out(&self) -> Option<&CueSheetTrack> {
        self.tracks
            .last()
            .filter(|t| t.number == CD_LEAD_OUT_TRACK || t.number == LEAD_OUT_TRACK)
    }
}
