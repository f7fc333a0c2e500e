//! テスト用ヘルパー
//!
//! 外部ツールの代わりに実行可能なシェルスクリプトを置く。

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// 実行可能なスタブスクリプトを作成
#[cfg(unix)]
pub fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("スタブ書き込み失敗");
    let mut perms = std::fs::metadata(&path).expect("メタデータ取得失敗").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("権限設定失敗");
    path
}

/// 1920x1080 / 65.43秒 / 12.5MB の ffprobe 出力
pub const PROBE_JSON: &str = r#"{"streams":[{"codec_type":"video","codec_name":"h264","width":1920,"height":1080,"r_frame_rate":"30/1","display_aspect_ratio":"16:9"},{"codec_type":"audio","codec_name":"aac","channels":2,"channel_layout":"stereo","sample_rate":"44100"}],"format":{"format_name":"mov,mp4,m4a,3gp,3g2,mj2","format_long_name":"QuickTime / MOV","duration":"65.430000","size":"13107200","bit_rate":"1602540"}}"#;
