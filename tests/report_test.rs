//! レポート出力の統合テスト
//!
//! JSON・Excel・失敗ログの書き出しを検証

use calamine::{open_workbook, Data, Reader, Xlsx};
use tempfile::tempdir;
use video_batch_common::{DownloadInfo, ProcessResult, VideoMetadata};
use video_batch_tools::report::{ReportWriter, DOWNLOAD_REPORT, PROBE_REPORT};

fn sample_metadata(name: &str) -> VideoMetadata {
    VideoMetadata {
        filepath: format!("/videos/{}", name),
        filename: name.to_string(),
        file_size_bytes: 13_107_200,
        file_size_mb: 12.5,
        duration_seconds: 65.43,
        format_long_name: "QuickTime / MOV".to_string(),
        resolution: "1920x1080".to_string(),
        width: 1920,
        height: 1080,
        video_codec: "h264".to_string(),
        audio_codec: "aac".to_string(),
        extraction_timestamp: "2026-01-18 10:00:00".to_string(),
        ..Default::default()
    }
}

fn probe_success(name: &str) -> ProcessResult<VideoMetadata> {
    let meta = sample_metadata(name);
    ProcessResult::success(meta.filepath.clone(), meta.summary_line(), meta)
}

fn read_rows(path: &std::path::Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("xlsxを開けない");
    let range = workbook.worksheet_range("Video Metadata").expect("シートがない");
    range.rows().map(|r| r.to_vec()).collect()
}

/// 全件成功なら失敗ログは作らない
#[test]
fn test_no_failure_log_when_all_succeed() {
    let dir = tempdir().expect("Failed to create temp dir");
    let results = vec![probe_success("a.mp4"), probe_success("b.mkv")];

    let artifacts = ReportWriter::new(dir.path(), PROBE_REPORT)
        .write(&results, "20260118_100000")
        .expect("レポート出力失敗");

    assert!(artifacts.json.exists());
    assert!(artifacts.excel.exists());
    assert!(artifacts.failure_log.is_none());
    assert!(artifacts.json.ends_with("video_metadata_20260118_100000.json"));
    assert!(artifacts.excel.ends_with("video_metadata_summary_20260118_100000.xlsx"));

    let txt_files = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == "txt").unwrap_or(false))
        .count();
    assert_eq!(txt_files, 0);
}

/// 失敗があれば失敗ログを作り、JSONには全件残る
#[test]
fn test_failure_log_and_full_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let results = vec![
        probe_success("a.mp4"),
        ProcessResult::failure("/videos/gone.mkv", "File not found"),
    ];

    let artifacts = ReportWriter::new(dir.path(), PROBE_REPORT)
        .write(&results, "20260118_100000")
        .unwrap();

    let log_path = artifacts.failure_log.expect("失敗ログがない");
    assert!(log_path.ends_with("failed_extractions_20260118_100000.txt"));
    let log = std::fs::read_to_string(log_path).unwrap();
    assert!(log.contains("File: gone.mkv\nReason: File not found\n\n"));

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&artifacts.json).unwrap()).unwrap();
    let records = json.as_array().expect("配列ではない");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["resolution"], "1920x1080");
    assert_eq!(records[0]["duration_seconds"], 65.43);
    assert_eq!(records[1]["success"], false);
    assert_eq!(records[1]["message"], "File not found");
}

/// 見出しは Filename で始まり File Path で終わる
#[test]
fn test_excel_column_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let results = vec![probe_success("sample.mp4")];

    let artifacts = ReportWriter::new(dir.path(), PROBE_REPORT)
        .write(&results, "20260118_100000")
        .unwrap();

    let rows = read_rows(&artifacts.excel);
    assert_eq!(rows.len(), 2);

    let header: Vec<String> = rows[0]
        .iter()
        .map(|c| match c {
            Data::String(s) => s.clone(),
            other => format!("{:?}", other),
        })
        .collect();
    assert_eq!(header.first().map(String::as_str), Some("Filename"));
    assert_eq!(header.last().map(String::as_str), Some("File Path"));
    assert_eq!(header.len(), 17);

    let row = &rows[1];
    assert_eq!(row[0], Data::String("sample.mp4".to_string()));
    assert_eq!(row[2], Data::Float(65.43));
    assert_eq!(row[3], Data::Float(12.5));
    assert_eq!(row[4], Data::String("1920x1080".to_string()));
    assert_eq!(row[16], Data::String("/videos/sample.mp4".to_string()));
}

/// 時刻違いで2回書くと別ファイル・同じ内容
#[test]
fn test_repeated_writes_do_not_collide() {
    let dir = tempdir().expect("Failed to create temp dir");
    let writer = ReportWriter::new(dir.path(), DOWNLOAD_REPORT);
    let results = vec![
        ProcessResult::success(
            "https://x/a",
            "Success",
            DownloadInfo {
                quality: "1080p".to_string(),
                output_dir: "Downloaded_Videos".to_string(),
                finished_at: "2026-01-18 10:00:00".to_string(),
            },
        ),
        ProcessResult::failure("https://x/b", "Unknown error"),
    ];

    let first = writer.write(&results, "20260118_100000").unwrap();
    let second = writer.write(&results, "20260118_100005").unwrap();

    for (a, b) in first.paths().iter().zip(second.paths()) {
        assert_ne!(*a, b);
        assert!(a.exists() && b.exists());
    }
    assert_eq!(
        std::fs::read_to_string(&first.json).unwrap(),
        std::fs::read_to_string(&second.json).unwrap()
    );
    assert_eq!(
        std::fs::read_to_string(first.failure_log.as_ref().unwrap()).unwrap(),
        std::fs::read_to_string(second.failure_log.as_ref().unwrap()).unwrap()
    );
    assert!(first.failure_log.unwrap().ends_with("failed_downloads_20260118_100000.txt"));
}

/// 空の結果でも出力できる
#[test]
fn test_empty_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    let results: Vec<ProcessResult<VideoMetadata>> = vec![];

    let artifacts = ReportWriter::new(dir.path(), PROBE_REPORT)
        .write(&results, "20260118_100000")
        .unwrap();
    assert_eq!(std::fs::read_to_string(&artifacts.json).unwrap().trim(), "[]");
    assert!(artifacts.failure_log.is_none());
}

/// セル上限を超える失敗メッセージでも全ファイルを書き出す
#[test]
fn test_oversized_failure_message_keeps_all_artifacts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let long_message = "E".repeat(40_000);
    let results: Vec<ProcessResult<DownloadInfo>> = vec![ProcessResult::failure("https://x/a", long_message.clone())];

    let artifacts = ReportWriter::new(dir.path(), DOWNLOAD_REPORT)
        .write(&results, "20260118_100000")
        .expect("レポート出力失敗");

    assert!(artifacts.json.exists());
    assert!(artifacts.excel.exists());
    let log = std::fs::read_to_string(artifacts.failure_log.expect("失敗ログがない")).unwrap();
    // 失敗ログには全文が残る
    assert!(log.contains(&long_message));

    let mut workbook: Xlsx<_> = open_workbook(&artifacts.excel).expect("xlsxを開けない");
    let range = workbook.worksheet_range("Downloads").expect("シートがない");
    match range.get_value((1, 2)) {
        Some(Data::String(s)) => assert_eq!(s.chars().count(), 32_767),
        other => panic!("メッセージ列が文字列ではない: {:?}", other),
    }
}
