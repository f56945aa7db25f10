// Error types for FLAC metadata parsing

use thiserror::Error;

use crate::flac::metadata::BlockType;

/// Errors raised while reading the metadata-block chain or decoding a block.
#[derive(Error, Debug)]
pub enum FormatError {
    // ========================================================================
    // Container-level errors (abort the whole parse)
    // ========================================================================
    #[error("Not a FLAC file: expected 'fLaC' marker, found {found:?}")]
    NotAFlacFile { found: Vec<u8> },

    #[error("Truncated metadata block header at offset {offset}")]
    TruncatedHeader { offset: u64 },

    #[error("Truncated metadata block payload at offset {offset}: declared {declared} bytes, {available} available")]
    TruncatedPayload {
        offset: u64,
        declared: u32,
        available: u64,
    },

    #[error("Invalid metadata block type 127 at offset {offset}")]
    InvalidBlockType { offset: u64 },

    #[error("Missing STREAMINFO block: first block is {found}")]
    MissingStreamInfo { found: BlockType },

    #[error("Duplicate STREAMINFO block at offset {offset}")]
    DuplicateStreamInfo { offset: u64 },

    #[error("STREAMINFO block has invalid size: expected 34 bytes, found {0}")]
    InvalidStreamInfoSize(usize),

    #[error("Invalid STREAMINFO: {0}")]
    InvalidStreamInfo(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Block-level errors (scoped to a single block)
    // ========================================================================
    #[error("Truncated VORBIS_COMMENT block")]
    TruncatedComment,

    #[error("Truncated PICTURE block")]
    TruncatedPicture,

    #[error("Truncated APPLICATION block")]
    TruncatedApplication,

    #[error("SEEKTABLE block size {0} is not a multiple of 18")]
    InvalidSeekTableSize(usize),

    #[error("Truncated CUESHEET block")]
    TruncatedCueSheet,

    #[error("Duplicate {0} block")]
    DuplicateBlock(BlockType),
}

impl FormatError {
    /// Whether this error invalidates the whole container rather than a single block.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            FormatError::TruncatedComment
                | FormatError::TruncatedPicture
                | FormatError::TruncatedApplication
                | FormatError::InvalidSeekTableSize(_)
                | FormatError::TruncatedCueSheet
                | FormatError::DuplicateBlock(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type FormatResult<T> = Result<T, FormatError>;
