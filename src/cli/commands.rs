// CLI command implementations
use std::io::{self, Write};

use anyhow::Context;
use serde_json::{json, Value};

use flacinfo::{DecodedBlock, FlacFile, Picture, Ratio};

use crate::cli::config::{Commands, Config};
use crate::cli::output::OutputFormatter;
use crate::cli::CliResult;

/// Run the selected subcommand; returns whether every file was read successfully.
pub fn run(config: &Config) -> CliResult<bool> {
    let formatter = OutputFormatter::new(config.format);
    let files = expand_files(config.command.files())?;
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match &config.command {
        Commands::Info { .. } => for_each_file(&files, &formatter, &mut writer, info_report),
        Commands::Tags { tags, .. } => for_each_file(&files, &formatter, &mut writer, |path, file| {
            Ok(tags_report(path, file, tags))
        }),
        Commands::Blocks { with_data, .. } => {
            for_each_file(&files, &formatter, &mut writer, |path, file| {
                blocks_report(path, file, *with_data)
            })
        }
        Commands::Pictures { .. } => {
            for_each_file(&files, &formatter, &mut writer, |path, file| {
                Ok(pictures_report(path, file))
            })
        }
    }
}

/// Parse each file and print its report; a failing file is reported and skipped.
fn for_each_file<F>(
    files: &[String],
    formatter: &OutputFormatter,
    writer: &mut impl Write,
    mut report: F,
) -> CliResult<bool>
where
    F: FnMut(&str, &FlacFile) -> CliResult<Value>,
{
    let mut all_ok = true;
    for file_path in files {
        let parsed = FlacFile::open_path(file_path).with_context(|| file_path.clone());
        match parsed {
            Ok(file) => {
                let value = report(file_path, &file)?;
                formatter.output_report(&value, writer)?;
            }
            Err(e) => {
                formatter.print_error(&format!("{:#}", e));
                all_ok = false;
            }
        }
    }
    writer.flush()?;
    Ok(all_ok)
}

/// Expand arguments containing glob metacharacters.
///
/// A pattern matching nothing is kept as-is so the open error names it.
pub fn expand_files(args: &[String]) -> CliResult<Vec<String>> {
    let mut files = Vec::new();
    for arg in args {
        if !arg.contains(['*', '?', '[']) {
            files.push(arg.clone());
            continue;
        }

        let mut matched = false;
        for entry in glob::glob(arg).with_context(|| format!("Invalid glob pattern: {}", arg))? {
            let path = entry?;
            if path.is_file() {
                files.push(path.to_string_lossy().into_owned());
                matched = true;
            }
        }
        if !matched {
            tracing::debug!(pattern = %arg, "glob pattern matched no files");
            files.push(arg.clone());
        }
    }
    Ok(files)
}

/// `m:ss.mmm`, or `unknown` when the sample count is not recorded
fn format_duration(duration: Option<Ratio>) -> String {
    let Some(duration) = duration else {
        return "unknown".to_string();
    };
    let millis = Ratio::new(duration.numer() * 1000, duration.denom())
        .map(|r| r.round())
        .unwrap_or(0);
    let seconds = millis / 1000;
    format!("{}:{:02}.{:03}", seconds / 60, seconds % 60, millis % 1000)
}

fn tag_lines(file: &FlacFile, filter: &[String]) -> Vec<String> {
    let Some(comment) = file.vorbis_comment() else {
        return Vec::new();
    };
    comment
        .iter()
        .filter(|(key, _)| filter.is_empty() || filter.iter().any(|f| f.eq_ignore_ascii_case(key)))
        .map(|(key, value)| format!("{}={}", key, value))
        .collect()
}

fn picture_summary(picture: &Picture) -> Value {
    json!({
        "type": picture.picture_type.to_string(),
        "mime_type": picture.mime_type,
        "description": picture.description,
        "width": picture.width,
        "height": picture.height,
        "color_depth": picture.color_depth,
        "indexed_colors": picture.indexed_colors,
        "data_size": picture.data.len(),
    })
}

fn info_report(path: &str, file: &FlacFile) -> CliResult<Value> {
    let info = file.stream_info();
    let props = file.properties();

    let mut report = json!({
        "file": path,
        "duration": format_duration(props.duration_seconds),
        "duration_seconds": props.duration_seconds.map(|d| d.to_f64()),
        "average_bitrate": props.average_bitrate.and_then(|b| u64::try_from(b.round()).ok()),
        "sample_rate": props.sample_rate,
        "channels": props.channel_count,
        "bits_per_sample": props.bits_per_sample,
        "total_samples": props.total_samples,
        "audio_bytes": props.audio_bytes,
        "block_size": format!("{}-{}", info.min_block_size, info.max_block_size),
        "md5": info.has_md5().then(|| info.md5_hex()),
        "vendor": file.vorbis_comment().map(|c| c.vendor_string.clone()),
        "tags": tag_lines(file, &[]),
        "pictures": file.pictures().count(),
    });

    let errors: Vec<String> = file
        .failures()
        .map(|(block, err)| format!("{} at offset {}: {}", block.block_type(), block.offset, err))
        .collect();
    if !errors.is_empty() {
        report["errors"] = json!(errors);
    }
    Ok(report)
}

fn tags_report(path: &str, file: &FlacFile, filter: &[String]) -> Value {
    json!({
        "file": path,
        "vendor": file.vorbis_comment().map(|c| c.vendor_string.clone()),
        "tags": tag_lines(file, filter),
    })
}

fn block_summary(block: &DecodedBlock) -> CliResult<Value> {
    let summary = match block {
        DecodedBlock::StreamInfo(info) => serde_json::to_value(info)?,
        DecodedBlock::Padding { length } => json!({ "length": length }),
        DecodedBlock::Application(app) => json!({
            "id": app.id_string(),
            "data_size": app.data.len(),
        }),
        DecodedBlock::SeekTable(table) => json!({
            "points": table.points.len(),
            "placeholders": table.points.len() - table.real_points().count(),
        }),
        DecodedBlock::VorbisComment(comment) => json!({
            "vendor": comment.vendor_string,
            "comments": comment.len(),
        }),
        DecodedBlock::CueSheet(sheet) => json!({
            "media_catalog_number": sheet.media_catalog_number,
            "lead_in_samples": sheet.lead_in_samples,
            "is_cd": sheet.is_cd,
            "tracks": sheet.tracks.len(),
        }),
        DecodedBlock::Picture(picture) => picture_summary(picture),
        DecodedBlock::Unknown { code, data } => json!({
            "code": code,
            "data_size": data.len(),
        }),
    };
    Ok(summary)
}

fn blocks_report(path: &str, file: &FlacFile, with_data: bool) -> CliResult<Value> {
    let mut blocks = Vec::new();
    for (index, (block, result)) in file.entries().enumerate() {
        let (contents, error) = match result {
            Ok(decoded) if with_data => (serde_json::to_value(decoded)?, None),
            Ok(decoded) => (block_summary(decoded)?, None),
            Err(err) => (Value::Null, Some(err.to_string())),
        };
        blocks.push(json!({
            "index": index,
            "type": block.block_type().to_string(),
            "offset": block.offset,
            "length": block.header.length,
            "is_last": block.is_last(),
            "contents": contents,
            "error": error,
        }));
    }

    Ok(json!({
        "file": path,
        "audio_offset": file.chain().audio_offset(),
        "blocks": blocks,
    }))
}

fn pictures_report(path: &str, file: &FlacFile) -> Value {
    let pictures: Vec<Value> = file.pictures().map(picture_summary).collect();
    json!({
        "file": path,
        "pictures": pictures,
    })
}
