// FLAC metadata handling module

pub mod application;
pub mod cuesheet;
pub mod decode;
pub mod metadata;
pub mod picture;
pub mod properties;
pub mod reader;
pub mod seektable;
pub mod streaminfo;
pub mod vorbis;

pub use application::Application;
pub use cuesheet::{CueSheet, CueSheetIndex, CueSheetTrack};
pub use decode::{decode, DecodedBlock};
pub use metadata::{BlockType, MetadataBlock, MetadataBlockHeader, FLAC_SIGNATURE};
pub use picture::{Picture, PictureType};
pub use properties::{Ratio, StreamProperties};
pub use reader::{open, BlockChain, PARALLEL_DECODE_MIN_BYTES};
pub use seektable::{SeekPoint, SeekTable};
pub use streaminfo::StreamInfo;
pub use vorbis::{CommentEntry, VorbisComment, VorbisFields};
