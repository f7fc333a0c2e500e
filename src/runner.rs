//! 逐次バッチ実行
//!
//! 1件ずつアクションを呼び、結果を入力順に1件1レコードで蓄積する。
//! アクションのエラーはその件の失敗として記録し、残りの処理は続行する。

use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use video_batch_common::{truncate_display, ProcessResult, WorkItem};

/// 事前チェックで存在しなかったファイルの失敗理由
pub const FILE_NOT_FOUND: &str = "File not found";

/// 失敗メッセージの表示上限（文字数）
const ERROR_DISPLAY_WIDTH: usize = 100;

/// アクション成功時の値
#[derive(Debug, Clone)]
pub struct Completed<T> {
    pub message: String,
    pub fields: T,
}

impl<T> Completed<T> {
    pub fn new(message: impl Into<String>, fields: T) -> Self {
        Self {
            message: message.into(),
            fields,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchRunner {
    delay: Duration,
    display_width: usize,
    show_progress: bool,
}

impl BatchRunner {
    pub fn new(delay: Duration, display_width: usize) -> Self {
        Self {
            delay,
            display_width,
            show_progress: true,
        }
    }

    /// false なら進捗バーの代わりに1件1行で表示
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// 全件を順に処理する
    ///
    /// 最後の1件を除き、各件の後に固定時間待機する。
    pub fn run<T, F>(&self, items: &[WorkItem], mut action: F) -> Vec<ProcessResult<T>>
    where
        F: FnMut(&WorkItem) -> Result<Completed<T>>,
    {
        let total = items.len();
        let progress = self.progress_bar(total);
        let mut results = Vec::with_capacity(total);

        for (idx, item) in items.iter().enumerate() {
            let label = format!(
                "[{}/{}] {}",
                idx + 1,
                total,
                truncate_display(&item.display_name(), self.display_width)
            );
            progress.set_message(label.clone());
            self.emit(&progress, &label);

            let result = self.process_one(item, &mut action);
            if result.success {
                self.emit(&progress, &format!("   ✔ {}", result.message));
            } else {
                self.emit(
                    &progress,
                    &format!("   ✖ {}", truncate_display(&result.message, ERROR_DISPLAY_WIDTH)),
                );
            }
            results.push(result);
            progress.inc(1);

            if idx + 1 < total && !self.delay.is_zero() {
                tracing::debug!(delay_ms = self.delay.as_millis() as u64, "courtesy delay");
                std::thread::sleep(self.delay);
            }
        }

        progress.finish_and_clear();
        results
    }

    fn process_one<T, F>(&self, item: &WorkItem, action: &mut F) -> ProcessResult<T>
    where
        F: FnMut(&WorkItem) -> Result<Completed<T>>,
    {
        let id = item.id();

        if let WorkItem::File(path) = item {
            if !path.exists() {
                tracing::warn!(item = %id, "file vanished before processing");
                return ProcessResult::failure(id, FILE_NOT_FOUND);
            }
        }

        match action(item) {
            Ok(done) => {
                tracing::info!(item = %id, "item succeeded");
                ProcessResult::success(id, done.message, done.fields)
            }
            Err(e) => {
                tracing::warn!(item = %id, error = %e, "item failed");
                ProcessResult::failure(id, e.to_string())
            }
        }
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    }

    fn emit(&self, progress: &ProgressBar, line: &str) {
        if self.show_progress {
            progress.println(line);
        } else {
            println!("{}", line);
        }
    }
}
