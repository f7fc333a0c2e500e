use anyhow::Context;
use clap::Parser;
use dialoguer::Input;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use video_batch_common::{RunSummary, WorkItem};
use video_batch_tools::{cli, config, download, error, probe, report, runner, scanner, sheet, tools};
use cli::{Cli, Commands};
use config::Config;
use report::{ReportArtifacts, ReportWriter, DOWNLOAD_REPORT, PROBE_REPORT};
use runner::BatchRunner;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Probe { folder, report_dir, delay, no_progress } => {
            println!("🎞 video-batch - メタデータ抽出\n");

            let version = tools::check_ffprobe(&config.ffprobe_path)?;
            println!("✔ FFprobe: {}\n", version);

            let folder = folder.unwrap_or_else(|| prompt_folder(&config.default_folder));

            // 1. スキャン
            println!("[1/3] フォルダをスキャン中: {}", folder.display());
            let files = scanner::scan_folder(&folder)?;
            if files.is_empty() {
                return Err(error::VideoBatchError::NoItems(format!(
                    "{} (対応形式: {})",
                    folder.display(),
                    scanner::VIDEO_EXTENSIONS.join(", ")
                ))
                .into());
            }
            println!("✔ {}件の動画を検出\n", files.len());

            // 2. 抽出
            println!("[2/3] メタデータ抽出中...");
            let items: Vec<WorkItem> = files.into_iter().map(WorkItem::File).collect();
            let delay = delay.map(Duration::from_secs).unwrap_or_else(|| config.probe_delay());
            let prober = probe::Prober::new(&config.ffprobe_path);
            let results = BatchRunner::new(delay, config.display_width)
                .with_progress(!no_progress)
                .run(&items, |item| prober.action(item));
            println!();

            // 3. 保存
            println!("[3/3] レポートを保存中...");
            let report_dir = report_dir.unwrap_or_else(|| config.report_dir.clone());
            let artifacts = ReportWriter::new(&report_dir, PROBE_REPORT).write(&results, &report::stamp_now())?;

            print_summary(&RunSummary::from_results(&results), &artifacts, &report_dir);
        }

        Commands::Download { input, quality, cookies, output_folder, report_dir, delay, no_progress } => {
            println!("📥 video-batch - 一括ダウンロード ({})\n", quality);

            let version = tools::check_ytdlp(&config.ytdlp_path)?;
            println!("✔ yt-dlp: {}\n", version);

            // 1. URL読み込み
            let input = input.unwrap_or_else(|| config.url_file.clone());
            println!("[1/3] URL一覧を読み込み中: {}", input.display());
            let urls = sheet::read_urls(&input)?;
            if urls.is_empty() {
                return Err(error::VideoBatchError::NoItems(input.display().to_string()).into());
            }
            println!("✔ 有効なURL: {}件\n", urls.len());

            // 2. ダウンロード
            let cookies = cookies.unwrap_or_else(|| config.cookie_file.clone());
            let output_folder = output_folder.unwrap_or_else(|| config.default_folder.clone());
            let downloader = download::Downloader::new(&config.ytdlp_path, cookies, output_folder, quality)?;

            println!("[2/3] ダウンロード中... (画質: {})", quality);
            let items: Vec<WorkItem> = urls.into_iter().map(WorkItem::Url).collect();
            let delay = delay.map(Duration::from_secs).unwrap_or_else(|| config.download_delay(quality));
            let results = BatchRunner::new(delay, config.display_width)
                .with_progress(!no_progress)
                .run(&items, |item| downloader.action(item));
            println!();

            // 3. 保存
            println!("[3/3] レポートを保存中...");
            let report_dir = report_dir.unwrap_or_else(|| config.report_dir.clone());
            let artifacts = ReportWriter::new(&report_dir, DOWNLOAD_REPORT).write(&results, &report::stamp_now())?;

            print_summary(&RunSummary::from_results(&results), &artifacts, &report_dir);
            println!("保存先: {}", absolute(downloader.output_dir()).display());
        }

        Commands::Formats { url, cookies } => {
            tools::check_ytdlp(&config.ytdlp_path)?;
            let cookies = cookies.unwrap_or_else(|| config.cookie_file.clone());
            let listing = download::list_formats(&config.ytdlp_path, &cookies, &url)?;
            println!("{}", listing);
        }

        Commands::Template { path, force } => {
            let path = path.unwrap_or_else(|| PathBuf::from(sheet::TEMPLATE_FILE_NAME));
            sheet::write_template(&path, force)?;
            println!("✔ テンプレートを作成しました: {}", absolute(&path).display());
            println!("  1列目の URL 見出しの下に1行1件で記入してください");
        }

        Commands::Check => {
            let mut missing = false;
            match tools::check_ffprobe(&config.ffprobe_path) {
                Ok(version) => println!("✔ FFprobe: {}", version),
                Err(e) => {
                    println!("✖ {}", e);
                    missing = true;
                }
            }
            match tools::check_ytdlp(&config.ytdlp_path) {
                Ok(version) => println!("✔ yt-dlp: {}", version),
                Err(e) => {
                    println!("✖ {}", e);
                    missing = true;
                }
            }
            if missing {
                anyhow::bail!("必要なツールが見つかりません");
            }
        }

        Commands::Config { set_cookie_file, set_default_folder, show } => {
            let mut config = config;

            if let Some(path) = set_cookie_file {
                config.set_cookie_file(path)?;
                println!("✔ Cookieファイルを設定しました");
            }

            if let Some(path) = set_default_folder {
                config.set_default_folder(path)?;
                println!("✔ 既定フォルダを設定しました");
            }

            if show {
                println!("設定 ({}):", Config::config_path()?.display());
                println!("  ffprobe: {}", config.ffprobe_path.display());
                println!("  yt-dlp: {}", config.ytdlp_path.display());
                println!("  既定フォルダ: {}", config.default_folder.display());
                println!("  Cookieファイル: {}", config.cookie_file.display());
                println!("  URL一覧: {}", config.url_file.display());
                println!("  レポート出力先: {}", config.report_dir.display());
                let download_delay = config
                    .download_delay_secs
                    .map(|secs| format!("{}s", secs))
                    .unwrap_or_else(|| "画質の既定値 (1080p 2s / 1440p 3s)".to_string());
                println!("  待機秒数: ダウンロード {} / 解析 {}s", download_delay, config.probe_delay_secs);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// フォルダを対話入力（Enterで既定値、端末でなければ既定値）
fn prompt_folder(default: &Path) -> PathBuf {
    println!("既定の動画フォルダ: {}", default.display());
    Input::<String>::new()
        .with_prompt("フォルダのパス")
        .default(default.display().to_string())
        .interact_text()
        .map(PathBuf::from)
        .unwrap_or_else(|_| default.to_path_buf())
}

fn print_summary(summary: &RunSummary, artifacts: &ReportArtifacts, report_dir: &Path) {
    println!("{}", "=".repeat(70));
    println!("合計: {}件", summary.attempted);
    println!("✔ 成功: {}件", summary.succeeded);
    if summary.has_failures() {
        println!("✖ 失敗: {}件", summary.failed);
    }
    println!("\n📄 出力ファイル:");
    for path in artifacts.paths() {
        println!("   - {}", path.display());
    }
    if let Some(log) = &artifacts.failure_log {
        println!("\n⚠ 失敗一覧: {}", log.display());
    }
    println!("\n💾 レポート保存先: {}", absolute(report_dir).display());
    println!("{}", "=".repeat(70));
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
