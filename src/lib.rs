// flacinfo - read the metadata blocks of FLAC files

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub mod error;
pub mod flac;
pub mod utils;

pub use error::{FormatError, FormatResult};
pub use flac::{
    decode, open, Application, BlockChain, BlockType, CommentEntry, CueSheet, DecodedBlock,
    MetadataBlock, Picture, PictureType, Ratio, SeekTable, StreamInfo, StreamProperties,
    VorbisComment, VorbisFields,
};
pub use utils::io::ByteSource;

/// A fully analysed FLAC file: raw chain, decoded blocks and derived properties
///
/// Only the metadata-block chain is read; audio frames are never decoded.
///
/// ```no_run
/// let file = flacinfo::FlacFile::open_path("song.flac")?;
/// if let Some(duration) = file.properties().duration_seconds {
///     println!("{:.3} s", duration.to_f64());
/// }
/// if let Some(tags) = file.vorbis_comment() {
///     for (key, value) in tags.iter() {
///         println!("{key}={value}");
///     }
/// }
/// # Ok::<(), flacinfo::FormatError>(())
/// ```
#[derive(Debug)]
pub struct FlacFile {
    chain: BlockChain,
    decoded: Vec<FormatResult<DecodedBlock>>,
    properties: StreamProperties,
}

impl FlacFile {
    /// Parse the metadata of any byte source.
    pub fn read<S: ByteSource + ?Sized>(source: &mut S) -> FormatResult<Self> {
        let chain = flac::open(source)?;
        Ok(Self::from_chain(chain))
    }

    /// Open and parse a file on disk.
    pub fn open_path(path: impl AsRef<Path>) -> FormatResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening FLAC file");
        let mut reader = BufReader::new(File::open(path)?);
        Self::read(&mut reader)
    }

    /// Decode the blocks of an already extracted chain.
    ///
    /// Chains with several pictures or a large payload volume are decoded on
    /// the rayon pool; the result is the same either way.
    pub fn from_chain(chain: BlockChain) -> Self {
        let decoded = if chain.prefers_parallel() {
            chain.decode_parallel()
        } else {
            chain.decode_all()
        };
        let properties = chain.properties();
        FlacFile {
            chain,
            decoded,
            properties,
        }
    }

    pub fn chain(&self) -> &BlockChain {
        &self.chain
    }

    pub fn stream_info(&self) -> &StreamInfo {
        self.chain.stream_info()
    }

    pub fn properties(&self) -> &StreamProperties {
        &self.properties
    }

    /// Decode results in chain order, one per raw block
    pub fn decoded_blocks(&self) -> &[FormatResult<DecodedBlock>] {
        &self.decoded
    }

    /// Raw blocks paired with their decode result
    pub fn entries(&self) -> impl Iterator<Item = (&MetadataBlock, &FormatResult<DecodedBlock>)> {
        self.chain.blocks().iter().zip(self.decoded.iter())
    }

    /// Successfully decoded blocks
    pub fn blocks(&self) -> impl Iterator<Item = &DecodedBlock> {
        self.decoded.iter().filter_map(|result| result.as_ref().ok())
    }

    /// Blocks that failed to decode, with the error that was scoped to them
    pub fn failures(&self) -> impl Iterator<Item = (&MetadataBlock, &FormatError)> {
        self.entries()
            .filter_map(|(block, result)| result.as_ref().err().map(|err| (block, err)))
    }

    pub fn vorbis_comment(&self) -> Option<&VorbisComment> {
        self.blocks().find_map(|block| match block {
            DecodedBlock::VorbisComment(comment) => Some(comment),
            _ => None,
        })
    }

    pub fn seek_table(&self) -> Option<&SeekTable> {
        self.blocks().find_map(|block| match block {
            DecodedBlock::SeekTable(table) => Some(table),
            _ => None,
        })
    }

    pub fn cue_sheet(&self) -> Option<&CueSheet> {
        self.blocks().find_map(|block| match block {
            DecodedBlock::CueSheet(sheet) => Some(sheet),
            _ => None,
        })
    }

    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.blocks().filter_map(|block| match block {
            DecodedBlock::Picture(picture) => Some(picture),
            _ => None,
        })
    }

    pub fn applications(&self) -> impl Iterator<Item = &Application> {
        self.blocks().filter_map(|block| match block {
            DecodedBlock::Application(app) => Some(app),
            _ => None,
        })
    }
}
