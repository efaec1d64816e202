//! 解析中の進捗表示
//!
//! サーバーは途中経過を返さないため、段階メッセージを順に表示する。

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// (進捗%, メッセージ)
pub const STAGES: &[(u64, &str)] = &[
    (20, "Uploading images..."),
    (40, "Processing images..."),
    (60, "Detecting fluid pockets..."),
    (80, "Measuring quadrants..."),
    (100, "Calculating AFI..."),
];

const STAGE_DELAY: Duration = Duration::from_millis(400);

pub fn progress_bar(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{bar:30.cyan/blue} {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// 段階表示（アップロードと並行して実行）
pub async fn simulate(bar: &ProgressBar) {
    for (position, message) in STAGES {
        bar.set_position(*position);
        bar.set_message(*message);
        tokio::time::sleep(STAGE_DELAY).await;
    }
}
