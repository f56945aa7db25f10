// FLAC container reader: walks the metadata-block chain

use std::collections::HashSet;

use rayon::prelude::*;

use crate::error::{FormatError, FormatResult};
use crate::flac::decode::{decode, DecodedBlock};
use crate::flac::metadata::{
    BlockType, MetadataBlock, MetadataBlockHeader, BLOCK_HEADER_SIZE, FLAC_SIGNATURE,
};
use crate::flac::properties::StreamProperties;
use crate::flac::streaminfo::StreamInfo;
use crate::utils::io::ByteSource;

/// Payload volume from which [`BlockChain::prefers_parallel`] picks the rayon pool
pub const PARALLEL_DECODE_MIN_BYTES: usize = 256 * 1024;

/// Ordered metadata blocks of one FLAC stream, as extracted from the container.
///
/// The first block is always STREAMINFO and has already been decoded and
/// validated; the remaining payloads are decoded on demand.
#[derive(Debug, Clone)]
pub struct BlockChain {
    blocks: Vec<MetadataBlock>,
    stream_info: StreamInfo,
    audio_offset: u64,
    total_length: u64,
}

/// Read the signature and every metadata block up to and including the one
/// flagged as last.
///
/// Reads are sequential: each header's length is needed to locate the next.
/// Any structural problem aborts the parse without a partial result.
pub fn open<S: ByteSource + ?Sized>(source: &mut S) -> FormatResult<BlockChain> {
    let total_length = source.total_length()?;

    let signature_len = total_length.min(FLAC_SIGNATURE.len() as u64) as usize;
    let signature = source.read_at(0, signature_len)?;
    if signature != FLAC_SIGNATURE {
        return Err(FormatError::NotAFlacFile { found: signature });
    }

    let mut offset = FLAC_SIGNATURE.len() as u64;

    let first = read_block(source, offset, total_length, false)?
        .ok_or(FormatError::TruncatedHeader { offset })?;
    if first.block_type() != BlockType::StreamInfo {
        return Err(FormatError::MissingStreamInfo {
            found: first.block_type(),
        });
    }
    let stream_info = StreamInfo::from_bytes(&first.payload)?;
    offset += first.total_size();
    let mut is_last = first.is_last();
    let mut blocks = vec![first];

    while !is_last {
        let Some(block) = read_block(source, offset, total_length, true)? else {
            tracing::warn!(offset, "frame sync reached before last metadata block");
            break;
        };
        if block.block_type() == BlockType::StreamInfo {
            return Err(FormatError::DuplicateStreamInfo { offset });
        }
        offset += block.total_size();
        is_last = block.is_last();
        blocks.push(block);
    }

    tracing::debug!(
        blocks = blocks.len(),
        audio_offset = offset,
        total_length,
        "metadata chain complete"
    );

    Ok(BlockChain {
        blocks,
        stream_info,
        audio_offset: offset,
        total_length,
    })
}

/// Read one header and its payload at `offset`.
///
/// Returns `None` when `stop_at_frame` is set and a frame sync code sits where
/// the header should be: the audio starts there.
fn read_block<S: ByteSource + ?Sized>(
    source: &mut S,
    offset: u64,
    total_length: u64,
    stop_at_frame: bool,
) -> FormatResult<Option<MetadataBlock>> {
    if total_length - offset < BLOCK_HEADER_SIZE as u64 {
        return Err(FormatError::TruncatedHeader { offset });
    }
    let raw = source.read_at(offset, BLOCK_HEADER_SIZE)?;
    let raw = [raw[0], raw[1], raw[2], raw[3]];

    if stop_at_frame && raw[0] == 0xFF && raw[1] & 0xFE == 0xF8 {
        return Ok(None);
    }

    let header = MetadataBlockHeader::from_bytes(raw, offset)?;

    let payload_offset = offset + BLOCK_HEADER_SIZE as u64;
    let available = total_length - payload_offset;
    if header.length as u64 > available {
        return Err(FormatError::TruncatedPayload {
            offset,
            declared: header.length,
            available,
        });
    }
    let payload = source.read_at(payload_offset, header.length as usize)?;

    tracing::debug!(
        offset,
        block_type = %header.block_type,
        length = header.length,
        is_last = header.is_last,
        "read metadata block"
    );

    Ok(Some(MetadataBlock {
        header,
        offset,
        payload,
    }))
}

impl BlockChain {
    pub fn blocks(&self) -> &[MetadataBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn stream_info(&self) -> &StreamInfo {
        &self.stream_info
    }

    /// Bytes before the first audio frame: signature plus every block
    pub fn audio_offset(&self) -> u64 {
        self.audio_offset
    }

    pub fn total_length(&self) -> u64 {
        self.total_length
    }

    pub fn properties(&self) -> StreamProperties {
        StreamProperties::derive(&self.stream_info, self.total_length, self.audio_offset)
    }

    /// Decode every block in chain order.
    ///
    /// Failures stay scoped to their block; the other entries are unaffected.
    pub fn decode_all(&self) -> Vec<FormatResult<DecodedBlock>> {
        let decoded = self
            .blocks
            .iter()
            .map(|block| decode(block.block_type(), &block.payload))
            .collect();
        self.finish(decoded)
    }

    /// Same result as [`decode_all`](Self::decode_all), decoding payloads on the rayon pool.
    pub fn decode_parallel(&self) -> Vec<FormatResult<DecodedBlock>> {
        let decoded = self
            .blocks
            .par_iter()
            .map(|block| decode(block.block_type(), &block.payload))
            .collect();
        self.finish(decoded)
    }

    /// Whether decoding is heavy enough to be worth spreading over the rayon pool:
    /// several PICTURE blocks, or at least [`PARALLEL_DECODE_MIN_BYTES`] of payload.
    pub fn prefers_parallel(&self) -> bool {
        let pictures = self
            .blocks
            .iter()
            .filter(|block| block.block_type() == BlockType::Picture)
            .count();
        let payload_bytes: usize = self.blocks.iter().map(|block| block.payload.len()).sum();
        pictures > 1 || payload_bytes >= PARALLEL_DECODE_MIN_BYTES
    }

    /// Reject repeats of single-instance block types, keeping the first occurrence.
    fn finish(
        &self,
        mut decoded: Vec<FormatResult<DecodedBlock>>,
    ) -> Vec<FormatResult<DecodedBlock>> {
        let mut seen = HashSet::new();
        for (block, result) in self.blocks.iter().zip(decoded.iter_mut()) {
            let block_type = block.block_type();
            if block_type.is_unique() && !seen.insert(block_type) {
                *result = Err(FormatError::DuplicateBlock(block_type));
            }
            if let Err(err) = result {
                tracing::warn!(offset = block.offset, %block_type, error = %err, "metadata block skipped");
            }
        }
        decoded
    }
}
