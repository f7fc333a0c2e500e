//! ffprobe JSON出力 → VideoMetadata
//!
//! ffprobe は数値の多くを文字列で出すため、数値・文字列どちらでも受ける。
//! 欠けている数値は0、文字列は空。

use crate::error::{Result, VideoBatchError};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use video_batch_common::VideoMetadata;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProbeFormat {
    size: Option<Value>,
    duration: Option<Value>,
    bit_rate: Option<Value>,
    format_name: Option<String>,
    format_long_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    codec_long_name: Option<String>,
    width: Option<Value>,
    height: Option<Value>,
    r_frame_rate: Option<String>,
    display_aspect_ratio: Option<String>,
    pix_fmt: Option<String>,
    bit_rate: Option<Value>,
    channels: Option<Value>,
    channel_layout: Option<String>,
    sample_rate: Option<Value>,
}

/// ffprobe の標準出力をパースしてメタデータに変換
///
/// `extracted_at` は抽出時刻の表示文字列。
pub fn parse_probe_output(stdout: &str, path: &Path, extracted_at: &str) -> Result<VideoMetadata> {
    let raw: ProbeOutput =
        serde_json::from_str(stdout).map_err(|e| VideoBatchError::ProbeParse(e.to_string()))?;

    let mut meta = VideoMetadata {
        filepath: path.display().to_string(),
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        extraction_timestamp: extracted_at.to_string(),
        ..Default::default()
    };

    if let Some(format) = &raw.format {
        meta.file_size_bytes = to_u64(&format.size);
        meta.file_size_mb = round2(meta.file_size_bytes as f64 / BYTES_PER_MB);
        meta.duration_seconds = round2(to_f64(&format.duration));
        meta.format_name = format.format_name.clone().unwrap_or_default();
        meta.format_long_name = format.format_long_name.clone().unwrap_or_default();
        meta.bit_rate = to_u64(&format.bit_rate);
    }

    meta.subtitle_count = raw
        .streams
        .iter()
        .filter(|s| s.codec_type.as_deref() == Some("subtitle"))
        .count() as u32;
    meta.has_subtitles = meta.subtitle_count > 0;

    // 先頭の映像ストリーム
    if let Some(video) = first_stream(&raw.streams, "video") {
        meta.has_video = true;
        meta.video_codec = video.codec_name.clone().unwrap_or_default();
        meta.video_codec_long = video.codec_long_name.clone().unwrap_or_default();
        meta.width = to_u64(&video.width) as u32;
        meta.height = to_u64(&video.height) as u32;
        meta.resolution = format!("{}x{}", meta.width, meta.height);
        meta.frame_rate = video.r_frame_rate.clone().unwrap_or_default();
        meta.aspect_ratio = video.display_aspect_ratio.clone().unwrap_or_default();
        meta.pixel_format = video.pix_fmt.clone().unwrap_or_default();
        meta.video_bitrate = to_text(&video.bit_rate).unwrap_or_else(|| "N/A".to_string());
    }

    // 先頭の音声ストリーム
    if let Some(audio) = first_stream(&raw.streams, "audio") {
        meta.has_audio = true;
        meta.audio_codec = audio.codec_name.clone().unwrap_or_default();
        meta.audio_codec_long = audio.codec_long_name.clone().unwrap_or_default();
        meta.audio_channels = to_u64(&audio.channels) as u32;
        meta.audio_channel_layout = audio.channel_layout.clone().unwrap_or_default();
        meta.audio_sample_rate = to_text(&audio.sample_rate).unwrap_or_default();
        meta.audio_bitrate = to_text(&audio.bit_rate).unwrap_or_else(|| "N/A".to_string());
    }

    Ok(meta)
}

fn first_stream<'a>(streams: &'a [ProbeStream], kind: &str) -> Option<&'a ProbeStream> {
    streams.iter().find(|s| s.codec_type.as_deref() == Some(kind))
}

fn to_f64(value: &Option<Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn to_u64(value: &Option<Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as u64),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .or_else(|_| s.parse::<f64>().map(|f| f as u64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn to_text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
