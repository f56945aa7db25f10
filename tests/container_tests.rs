//! Integration tests for the container reader, block decoder and stream
//! properties, driven by synthetic FLAC images.

mod common;

use std::io::Cursor;

use common::*;
use flacinfo::{
    BlockType, DecodedBlock, FlacFile, FormatError, PictureType, Ratio, VorbisFields,
};

fn read(bytes: Vec<u8>) -> Result<FlacFile, FormatError> {
    FlacFile::read(&mut Cursor::new(bytes))
}

// ──────────────────────── end-to-end scenarios ────────────────────────

#[test]
fn one_second_stereo_stream() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .audio(vec![0xAA; 10_000])
        .build();
    assert_eq!(bytes.len(), 10_042);

    let file = read(bytes).unwrap();
    assert_eq!(file.chain().len(), 1);
    assert_eq!(file.chain().audio_offset(), 42);

    let props = file.properties();
    assert_eq!(props.duration_seconds, Some(Ratio::from_integer(1)));
    assert_eq!(props.duration_seconds.map(|d| d.to_f64()), Some(1.0));
    assert_eq!(props.average_bitrate, Some(Ratio::from_integer(80_000)));
    assert_eq!(props.channel_count, 2);
    assert_eq!(props.sample_rate, 44_100);
    assert_eq!(props.bits_per_sample, 16);
}

#[test]
fn streaminfo_padding_and_comments() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 88_200))
        .block(PADDING, vec![0; 100])
        .block(VORBIS_COMMENT, vorbis_payload("test", &["TITLE=Song", "ARTIST=Band"]))
        .audio(vec![0xFF, 0xF8, 0x00, 0x00])
        .build();

    let file = read(bytes).unwrap();
    assert_eq!(file.decoded_blocks().len(), 3);
    assert!(matches!(
        file.decoded_blocks()[1],
        Ok(DecodedBlock::Padding { length: 100 })
    ));

    let comment = file.vorbis_comment().unwrap();
    assert_eq!(comment.vendor_string, "test");
    let entries: Vec<_> = comment.iter().collect();
    assert_eq!(entries, vec![("TITLE", "Song"), ("ARTIST", "Band")]);
    assert_eq!(comment.get(VorbisFields::ARTIST), Some("Band"));
}

// ──────────────────────── chain invariants ────────────────────────

#[test]
fn streaminfo_fields_survive_bit_packing() {
    for (rate, channels, bits, samples) in [
        (8_000, 1, 8, 1),
        (44_100, 2, 16, 44_100),
        (96_000, 6, 24, 123_456_789),
        (655_350, 8, 32, (1 << 36) - 1),
        (1, 1, 4, 0),
    ] {
        let info = stream_info(rate, channels, bits, samples);
        let file = read(FlacBuilder::new().stream_info(&info).build()).unwrap();
        let decoded = file.stream_info();
        assert_eq!(decoded.sample_rate, rate);
        assert_eq!(decoded.channel_count, channels);
        assert_eq!(decoded.bits_per_sample, bits);
        assert_eq!(decoded.total_samples, samples);
        assert_eq!(decoded, &info);
    }
}

#[test]
fn exactly_one_last_block_and_it_is_last() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(48_000, 2, 24, 480_000))
        .block(SEEKTABLE, vec![0; 18 * 2])
        .block(APPLICATION, b"ATCHdata".to_vec())
        .block(PADDING, vec![0; 8])
        .build();

    let file = read(bytes).unwrap();
    let blocks = file.chain().blocks();
    assert_eq!(blocks.len(), 4);
    assert_eq!(blocks.iter().filter(|b| b.is_last()).count(), 1);
    assert!(blocks.last().unwrap().is_last());
    assert_eq!(blocks[0].block_type(), BlockType::StreamInfo);
}

#[test]
fn non_streaminfo_first_block_is_rejected() {
    let bytes = FlacBuilder::new()
        .block(PADDING, vec![0; 10])
        .stream_info(&stream_info(44_100, 2, 16, 0))
        .build();
    assert!(matches!(
        read(bytes),
        Err(FormatError::MissingStreamInfo {
            found: BlockType::Padding
        })
    ));
}

#[test]
fn second_streaminfo_is_rejected() {
    let info = stream_info(44_100, 2, 16, 0);
    let bytes = FlacBuilder::new()
        .stream_info(&info)
        .stream_info(&info)
        .build();
    assert!(matches!(
        read(bytes),
        Err(FormatError::DuplicateStreamInfo { offset: 42 })
    ));
}

#[test]
fn wrong_streaminfo_size_is_rejected() {
    let bytes = FlacBuilder::new().block(STREAMINFO, vec![0; 30]).build();
    assert!(matches!(
        read(bytes),
        Err(FormatError::InvalidStreamInfoSize(30))
    ));
}

#[test]
fn zero_sample_rate_is_rejected() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(0, 2, 16, 0))
        .build();
    assert!(matches!(read(bytes), Err(FormatError::InvalidStreamInfo(_))));
}

#[test]
fn bad_signature() {
    assert!(matches!(
        read(b"ID3\x04rest of an mp3".to_vec()),
        Err(FormatError::NotAFlacFile { .. })
    ));
    assert!(matches!(
        read(b"fL".to_vec()),
        Err(FormatError::NotAFlacFile { .. })
    ));
    assert!(matches!(read(Vec::new()), Err(FormatError::NotAFlacFile { .. })));
}

#[test]
fn payload_short_by_one_byte() {
    let mut bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(PADDING, vec![0; 100])
        .build();
    bytes.pop();

    match read(bytes) {
        Err(FormatError::TruncatedPayload {
            offset,
            declared,
            available,
        }) => {
            assert_eq!(offset, 42);
            assert_eq!(declared, 100);
            assert_eq!(available, 99);
        }
        other => panic!("expected TruncatedPayload, got {:?}", other),
    }
}

#[test]
fn chain_ends_without_last_flag() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .unterminated()
        .build();
    assert!(matches!(
        read(bytes),
        Err(FormatError::TruncatedHeader { offset: 42 })
    ));

    let mut bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .unterminated()
        .build();
    bytes.extend_from_slice(&[0x01, 0x00]);
    assert!(matches!(
        read(bytes),
        Err(FormatError::TruncatedHeader { offset: 42 })
    ));
}

#[test]
fn block_type_127_is_invalid() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(0x7F, vec![1, 2, 3])
        .build();
    // The last flag turns the header byte into 0xFF, which is still not a frame sync
    assert!(matches!(
        read(bytes),
        Err(FormatError::InvalidBlockType { offset: 42 })
    ));
}

#[test]
fn frame_sync_ends_unterminated_chain() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(PADDING, vec![0; 4])
        .unterminated()
        .audio(vec![0xFF, 0xF8, 0x69, 0x08, 0x00, 0x00])
        .build();

    let file = read(bytes).unwrap();
    assert_eq!(file.chain().len(), 2);
    assert_eq!(file.chain().audio_offset(), 42 + 8);
    assert_eq!(file.properties().audio_bytes, 6);
}

#[test]
fn audio_bytes_are_not_inspected() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .audio(vec![0x7F; 64])
        .build();
    let file = read(bytes).unwrap();
    assert_eq!(file.chain().len(), 1);
    assert_eq!(file.properties().audio_bytes, 64);
}

// ──────────────────────── block decoding ────────────────────────

#[test]
fn duplicate_comment_keys_are_kept_in_order() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(
            VORBIS_COMMENT,
            vorbis_payload("v", &["ARTIST=One", "TITLE=Duet", "ARTIST=Two"]),
        )
        .build();

    let file = read(bytes).unwrap();
    let comment = file.vorbis_comment().unwrap();
    assert_eq!(comment.len(), 3);
    let artists: Vec<_> = comment.get_all("artist").collect();
    assert_eq!(artists, vec!["One", "Two"]);
}

#[test]
fn corrupt_block_does_not_hide_the_others() {
    let mut picture = picture_payload(3, "image/png", "cover", &[1, 2, 3, 4]);
    // Declare more image bytes than the block holds
    let len = picture.len();
    picture[len - 8..len - 4].copy_from_slice(&100u32.to_be_bytes());

    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(PICTURE, picture)
        .block(VORBIS_COMMENT, vorbis_payload("v", &["TITLE=Still here"]))
        .build();

    let file = read(bytes).unwrap();
    assert!(matches!(
        file.decoded_blocks()[1],
        Err(FormatError::TruncatedPicture)
    ));
    assert_eq!(file.pictures().count(), 0);
    assert_eq!(file.vorbis_comment().unwrap().get("title"), Some("Still here"));

    let failures: Vec<_> = file.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0.block_type(), BlockType::Picture);
    assert!(!failures[0].1.is_structural());
}

#[test]
fn second_vorbis_comment_is_flagged() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(VORBIS_COMMENT, vorbis_payload("first", &["A=1"]))
        .block(VORBIS_COMMENT, vorbis_payload("second", &["A=2"]))
        .build();

    let file = read(bytes).unwrap();
    assert!(matches!(
        file.decoded_blocks()[2],
        Err(FormatError::DuplicateBlock(BlockType::VorbisComment))
    ));
    assert_eq!(file.vorbis_comment().unwrap().vendor_string, "first");
}

#[test]
fn pictures_and_unknown_blocks() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(PICTURE, picture_payload(3, "image/jpeg", "front", &[0xFF, 0xD8]))
        .block(PICTURE, picture_payload(4, "image/png", "back", &[0x89]))
        .block(42, b"whatever".to_vec())
        .block(PADDING, vec![0xEE; 3])
        .build();

    let file = read(bytes).unwrap();
    let pictures: Vec<_> = file.pictures().collect();
    assert_eq!(pictures.len(), 2);
    assert_eq!(pictures[0].picture_type, PictureType::CoverFront);
    assert_eq!(pictures[0].data, vec![0xFF, 0xD8]);
    assert_eq!(pictures[1].picture_type, PictureType::CoverBack);

    assert!(matches!(
        &file.decoded_blocks()[3],
        Ok(DecodedBlock::Unknown { code: 42, data }) if data == b"whatever"
    ));
    assert!(matches!(
        file.decoded_blocks()[4],
        Ok(DecodedBlock::Padding { length: 3 })
    ));
    assert_eq!(file.failures().count(), 0);
}

#[test]
fn seektable_cuesheet_and_application() {
    let mut seek = Vec::new();
    seek.extend_from_slice(&0u64.to_be_bytes());
    seek.extend_from_slice(&0u64.to_be_bytes());
    seek.extend_from_slice(&4096u16.to_be_bytes());
    seek.extend_from_slice(&u64::MAX.to_be_bytes());
    seek.extend_from_slice(&[0; 10]);

    let mut cue = vec![0u8; 128];
    cue.extend_from_slice(&0u64.to_be_bytes());
    cue.push(0x80);
    cue.extend_from_slice(&[0; 258]);
    cue.push(0);

    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(SEEKTABLE, seek)
        .block(CUESHEET, cue)
        .block(APPLICATION, b"xmcd".to_vec())
        .build();

    let file = read(bytes).unwrap();
    let table = file.seek_table().unwrap();
    assert_eq!(table.points.len(), 2);
    assert_eq!(table.real_points().count(), 1);

    let sheet = file.cue_sheet().unwrap();
    assert!(sheet.is_cd);
    assert!(sheet.tracks.is_empty());

    let app = file.applications().next().unwrap();
    assert_eq!(app.id_string(), "xmcd");
    assert!(app.data.is_empty());
}

#[test]
fn parallel_decode_matches_sequential() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(VORBIS_COMMENT, vorbis_payload("v", &["A=1", "B=2"]))
        .block(PICTURE, picture_payload(3, "image/png", "", &[9; 32]))
        .block(PICTURE, vec![0; 3])
        .block(SEEKTABLE, vec![0; 18])
        .block(SEEKTABLE, vec![0; 18])
        .build();

    let chain = flacinfo::open(&mut Cursor::new(bytes)).unwrap();
    let sequential = chain.decode_all();
    let parallel = chain.decode_parallel();
    assert_eq!(sequential.len(), parallel.len());
    for (a, b) in sequential.iter().zip(parallel.iter()) {
        match (a, b) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            _ => panic!("sequential and parallel decode disagree"),
        }
    }
    assert!(matches!(
        parallel[5],
        Err(FormatError::DuplicateBlock(BlockType::SeekTable))
    ));
}

#[test]
fn picture_heavy_file_is_decoded_in_parallel() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(PICTURE, picture_payload(3, "image/png", "front", &[1; 64]))
        .block(PICTURE, picture_payload(4, "image/png", "back", &[2; 64]))
        .block(PICTURE, vec![0; 3])
        .block(VORBIS_COMMENT, vorbis_payload("v", &["TITLE=Song"]))
        .build();

    let file = read(bytes).unwrap();
    assert!(file.chain().prefers_parallel());
    assert_eq!(file.pictures().count(), 2);
    assert_eq!(file.failures().count(), 1);
    assert!(matches!(
        file.decoded_blocks()[3],
        Err(FormatError::TruncatedPicture)
    ));
    assert_eq!(
        file.vorbis_comment().and_then(|c| c.get(VorbisFields::TITLE)),
        Some("Song")
    );
}

#[test]
fn parallel_decode_threshold() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(PICTURE, picture_payload(3, "image/png", "", &[1; 64]))
        .build();
    let chain = flacinfo::open(&mut Cursor::new(bytes)).unwrap();
    assert!(!chain.prefers_parallel());

    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(PADDING, vec![0; flacinfo::flac::PARALLEL_DECODE_MIN_BYTES])
        .build();
    let chain = flacinfo::open(&mut Cursor::new(bytes)).unwrap();
    assert!(chain.prefers_parallel());
}

// ──────────────────────── derived properties ────────────────────────

#[test]
fn unknown_total_samples_gives_unknown_duration() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 0))
        .audio(vec![0; 500])
        .build();

    let props = *read(bytes).unwrap().properties();
    assert_eq!(props.duration_seconds, None);
    assert_eq!(props.average_bitrate, None);
    assert_eq!(props.audio_bytes, 500);
}

#[test]
fn bitrate_counts_only_audio_bytes() {
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(8_000, 1, 8, 16_000))
        .block(PADDING, vec![0; 1000])
        .audio(vec![0; 4_000])
        .build();

    let props = *read(bytes).unwrap().properties();
    assert_eq!(props.duration_seconds, Some(Ratio::from_integer(2)));
    assert_eq!(props.average_bitrate, Some(Ratio::from_integer(16_000)));
}

#[test]
fn open_path_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.flac");
    let bytes = FlacBuilder::new()
        .stream_info(&stream_info(44_100, 2, 16, 44_100))
        .block(VORBIS_COMMENT, vorbis_payload("disk", &["TITLE=On disk"]))
        .audio(vec![0; 10])
        .build();
    std::fs::write(&path, &bytes).unwrap();

    let file = FlacFile::open_path(&path).unwrap();
    assert_eq!(file.chain().total_length(), bytes.len() as u64);
    assert_eq!(file.vorbis_comment().unwrap().get("TITLE"), Some("On disk"));

    let missing = FlacFile::open_path(dir.path().join("missing.flac")).unwrap_err();
    assert!(matches!(missing, FormatError::Io(_)));
    assert!(missing.is_structural());
}
