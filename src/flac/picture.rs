// FLAC PICTURE block implementation

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{FormatError, FormatResult};
use crate::utils::encoding::{decode_text, serialize_base64, TextEncoding};
use crate::utils::io::PayloadReader;

/// Picture types according to FLAC specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureType {
    Other,
    FileIcon,
    OtherFileIcon,
    CoverFront,
    CoverBack,
    LeafletPage,
    Media,
    LeadArtist,
    Artist,
    Conductor,
    Band,
    Composer,
    Lyricist,
    RecordingLocation,
    DuringRecording,
    DuringPerformance,
    VideoScreenCapture,
    BrightColouredFish,
    Illustration,
    BandLogo,
    PublisherLogo,
    /// Codes above 20 are reserved
    Unknown(u32),
}

impl PictureType {
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => PictureType::Other,
            1 => PictureType::FileIcon,
            2 => PictureType::OtherFileIcon,
            3 => PictureType::CoverFront,
            4 => PictureType::CoverBack,
            5 => PictureType::LeafletPage,
            6 => PictureType::Media,
            7 => PictureType::LeadArtist,
            8 => PictureType::Artist,
            9 => PictureType::Conductor,
            10 => PictureType::Band,
            11 => PictureType::Composer,
            12 => PictureType::Lyricist,
            13 => PictureType::RecordingLocation,
            14 => PictureType::DuringRecording,
            15 => PictureType::DuringPerformance,
            16 => PictureType::VideoScreenCapture,
            17 => PictureType::BrightColouredFish,
            18 => PictureType::Illustration,
            19 => PictureType::BandLogo,
            20 => PictureType::PublisherLogo,
            n => PictureType::Unknown(n),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PictureType::Other => "Other",
            PictureType::FileIcon => "File Icon",
            PictureType::OtherFileIcon => "Other File Icon",
            PictureType::CoverFront => "Cover (front)",
            PictureType::CoverBack => "Cover (back)",
            PictureType::LeafletPage => "Leaflet page",
            PictureType::Media => "Media",
            PictureType::LeadArtist => "Lead artist",
            PictureType::Artist => "Artist",
            PictureType::Conductor => "Conductor",
            PictureType::Band => "Band",
            PictureType::Composer => "Composer",
            PictureType::Lyricist => "Lyricist",
            PictureType::RecordingLocation => "Recording Location",
            PictureType::DuringRecording => "During recording",
            PictureType::DuringPerformance => "During performance",
            PictureType::VideoScreenCapture => "Video screen capture",
            PictureType::BrightColouredFish => "Bright coloured fish",
            PictureType::Illustration => "Illustration",
            PictureType::BandLogo => "Band logo",
            PictureType::PublisherLogo => "Publisher logo",
            PictureType::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for PictureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PictureType::Unknown(n) => write!(f, "Unknown ({})", n),
            other => f.write_str(other.name()),
        }
    }
}

impl Serialize for PictureType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// FLAC PICTURE block structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    pub picture_type: PictureType,
    pub mime_type: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    /// Palette size for indexed images, 0 otherwise
    pub indexed_colors: u32,
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
}

impl Picture {
    /// Decode a PICTURE payload; every field is big-endian.
    pub fn from_bytes(data: &[u8]) -> FormatResult<Self> {
        let mut reader = PayloadReader::new(data);
        let truncated = || FormatError::TruncatedPicture;

        let picture_type = PictureType::from_u32(reader.read_be_u32().ok_or_else(truncated)?);

        let mime = reader.read_be_prefixed().ok_or_else(truncated)?;
        let mime_type = decode_text(mime, TextEncoding::Ascii);

        let description = reader.read_be_prefixed().ok_or_else(truncated)?;
        let description = decode_text(description, TextEncoding::Utf8);

        let width = reader.read_be_u32().ok_or_else(truncated)?;
        let height = reader.read_be_u32().ok_or_else(truncated)?;
        let color_depth = reader.read_be_u32().ok_or_else(truncated)?;
        let indexed_colors = reader.read_be_u32().ok_or_else(truncated)?;

        let picture_data = reader.read_be_prefixed().ok_or_else(truncated)?;

        Ok(Picture {
            picture_type,
            mime_type,
            description,
            width,
            height,
            color_depth,
            indexed_colors,
            data: picture_data.to_vec(),
        })
    }

    /// A MIME type of `-->` means the data is a URL to the image.
    pub fn is_link(&self) -> bool {
        self.mime_type == "-->"
    }
}
