//! Synthetic FLAC byte images for integration tests.

#![allow(dead_code)]

use flacinfo::StreamInfo;

pub const STREAMINFO: u8 = 0;
pub const PADDING: u8 = 1;
pub const APPLICATION: u8 = 2;
pub const SEEKTABLE: u8 = 3;
pub const VORBIS_COMMENT: u8 = 4;
pub const CUESHEET: u8 = 5;
pub const PICTURE: u8 = 6;

/// STREAMINFO with the given audio parameters and fixed block sizes
pub fn stream_info(sample_rate: u32, channels: u8, bits: u8, total_samples: u64) -> StreamInfo {
    StreamInfo {
        min_block_size: 4096,
        max_block_size: 4096,
        min_frame_size: 16,
        max_frame_size: 14_000,
        sample_rate,
        channel_count: channels,
        bits_per_sample: bits,
        total_samples,
        audio_md5: [0x5A; 16],
    }
}

pub fn vorbis_payload(vendor: &str, entries: &[&str]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    data.extend_from_slice(vendor.as_bytes());
    data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for entry in entries {
        data.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        data.extend_from_slice(entry.as_bytes());
    }
    data
}

pub fn picture_payload(picture_type: u32, mime: &str, description: &str, image: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&picture_type.to_be_bytes());
    data.extend_from_slice(&(mime.len() as u32).to_be_bytes());
    data.extend_from_slice(mime.as_bytes());
    data.extend_from_slice(&(description.len() as u32).to_be_bytes());
    data.extend_from_slice(description.as_bytes());
    for value in [300u32, 300, 24, 0] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    data.extend_from_slice(&(image.len() as u32).to_be_bytes());
    data.extend_from_slice(image);
    data
}

/// Builds `fLaC` + metadata blocks + audio bytes
#[derive(Default)]
pub struct FlacBuilder {
    blocks: Vec<(u8, Vec<u8>)>,
    audio: Vec<u8>,
    /// Set the last flag on the final block
    terminate: bool,
}

impl FlacBuilder {
    pub fn new() -> Self {
        FlacBuilder {
            terminate: true,
            ..Default::default()
        }
    }

    pub fn stream_info(self, info: &StreamInfo) -> Self {
        self.block(STREAMINFO, info.to_bytes().to_vec())
    }

    pub fn block(mut self, code: u8, payload: Vec<u8>) -> Self {
        self.blocks.push((code, payload));
        self
    }

    pub fn audio(mut self, audio: Vec<u8>) -> Self {
        self.audio = audio;
        self
    }

    pub fn unterminated(mut self) -> Self {
        self.terminate = false;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = b"fLaC".to_vec();
        let count = self.blocks.len();
        for (index, (code, payload)) in self.blocks.into_iter().enumerate() {
            let last = self.terminate && index + 1 == count;
            let len = (payload.len() as u32).to_be_bytes();
            out.push(code | if last { 0x80 } else { 0 });
            out.extend_from_slice(&len[1..]);
            out.extend_from_slice(&payload);
        }
        out.extend_from_slice(&self.audio);
        out
    }
}
