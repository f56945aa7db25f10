// FLAC STREAMINFO block implementation

use serde::Serialize;

use crate::error::{FormatError, FormatResult};
use crate::utils::encoding::{serialize_hex, to_hex};

/// Size of the STREAMINFO payload
pub const STREAMINFO_SIZE: usize = 34;

/// Size of the MD5 signature
pub const MD5_SIZE: usize = 16;

/// Decoded STREAMINFO block
///
/// The payload is a fixed 34-byte big-endian bit-packed record:
///
/// | bits | field                      |
/// |------|----------------------------|
/// | 16   | minimum block size         |
/// | 16   | maximum block size         |
/// | 24   | minimum frame size         |
/// | 24   | maximum frame size         |
/// | 20   | sample rate                |
/// | 3    | channels - 1               |
/// | 5    | bits per sample - 1        |
/// | 36   | total samples              |
/// | 128  | MD5 of the unencoded audio |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamInfo {
    /// Minimum block size in samples
    pub min_block_size: u16,
    /// Maximum block size in samples
    pub max_block_size: u16,
    /// Minimum frame size in bytes (0 = unknown)
    pub min_frame_size: u32,
    /// Maximum frame size in bytes (0 = unknown)
    pub max_frame_size: u32,
    /// Sample rate in Hz, always nonzero
    pub sample_rate: u32,
    /// Number of channels (1-8)
    pub channel_count: u8,
    /// Bits per sample (4-32)
    pub bits_per_sample: u8,
    /// Inter-channel samples in the stream (0 = unknown)
    pub total_samples: u64,
    /// MD5 signature of the unencoded audio
    #[serde(serialize_with = "serialize_hex")]
    pub audio_md5: [u8; MD5_SIZE],
}

impl StreamInfo {
    /// Parse STREAMINFO from exactly 34 bytes.
    pub fn from_bytes(bytes: &[u8]) -> FormatResult<Self> {
        if bytes.len() != STREAMINFO_SIZE {
            return Err(FormatError::InvalidStreamInfoSize(bytes.len()));
        }

        let min_block_size = u16::from_be_bytes([bytes[0], bytes[1]]);
        let max_block_size = u16::from_be_bytes([bytes[2], bytes[3]]);
        let min_frame_size = u32::from_be_bytes([0, bytes[4], bytes[5], bytes[6]]);
        let max_frame_size = u32::from_be_bytes([0, bytes[7], bytes[8], bytes[9]]);

        // Bytes 10-17 hold sample rate, channels, bits per sample and total
        // samples packed into a single 64-bit word.
        let mut packed = [0u8; 8];
        packed.copy_from_slice(&bytes[10..18]);
        let packed = u64::from_be_bytes(packed);

        let sample_rate = (packed >> 44) as u32;
        let channel_count = ((packed >> 41) & 0x07) as u8 + 1;
        let bits_per_sample = ((packed >> 36) & 0x1F) as u8 + 1;
        let total_samples = packed & 0x0F_FFFF_FFFF;

        let mut audio_md5 = [0u8; MD5_SIZE];
        audio_md5.copy_from_slice(&bytes[18..STREAMINFO_SIZE]);

        let info = StreamInfo {
            min_block_size,
            max_block_size,
            min_frame_size,
            max_frame_size,
            sample_rate,
            channel_count,
            bits_per_sample,
            total_samples,
            audio_md5,
        };
        info.validate()?;
        Ok(info)
    }

    fn validate(&self) -> FormatResult<()> {
        if self.sample_rate == 0 {
            return Err(FormatError::InvalidStreamInfo("sample rate is zero"));
        }
        if self.min_block_size != 0
            && self.max_block_size != 0
            && self.min_block_size > self.max_block_size
        {
            return Err(FormatError::InvalidStreamInfo(
                "minimum block size exceeds maximum block size",
            ));
        }
        if self.bits_per_sample < 4 {
            return Err(FormatError::InvalidStreamInfo("fewer than 4 bits per sample"));
        }
        Ok(())
    }

    /// Serialize to 34 bytes.
    pub fn to_bytes(&self) -> [u8; STREAMINFO_SIZE] {
        let mut bytes = [0u8; STREAMINFO_SIZE];
        bytes[0..2].copy_from_slice(&self.min_block_size.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.max_block_size.to_be_bytes());
        bytes[4..7].copy_from_slice(&self.min_frame_size.to_be_bytes()[1..]);
        bytes[7..10].copy_from_slice(&self.max_frame_size.to_be_bytes()[1..]);

        let packed = ((self.sample_rate as u64 & 0xF_FFFF) << 44)
            | ((self.channel_count.saturating_sub(1) as u64 & 0x07) << 41)
            | ((self.bits_per_sample.saturating_sub(1) as u64 & 0x1F) << 36)
            | (self.total_samples & 0x0F_FFFF_FFFF);
        bytes[10..18].copy_from_slice(&packed.to_be_bytes());
        bytes[18..].copy_from_slice(&self.audio_md5);
        bytes
    }

    /// An all-zero signature means the encoder did not compute one.
    pub fn has_md5(&self) -> bool {
        self.audio_md5.iter().any(|&b| b != 0)
    }

    pub fn md5_hex(&self) -> String {
        to_hex(&self.audio_md5)
    }

    /// Total samples, or `None` when the encoder left the field at zero.
    pub fn known_total_samples(&self) -> Option<u64> {
        (self.total_samples != 0).then_some(self.total_samples)
    }
}
