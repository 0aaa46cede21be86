//! 用于演示 `display-format` 库的核心功能。
//!
//! ## 如何运行
//!
//! ```bash
//! cargo run --package display_format_rs --example demo
//! ```

use display_format_rs::{
    DisabledTrack, DisplayFormatter, InlineContext, MediaType, Metadata, SubtitleState, config,
};

use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let format_config = config::load_or_default();
    info!("窗口标题格式: {}", format_config.window_title_format);
    info!("正在播放格式: {}", format_config.now_playing_format);
    let formatter = DisplayFormatter::from_config(format_config);

    // 这里硬编码了两个条目作为示例。在实际应用中，这些信息来自播放器解析出的元数据。
    let song = Metadata::new()
        .with("title", "有点甜")
        .with("artist", "汪苏泷, BY2")
        .with("album", "万有引力");
    let clip = Metadata::new().with("duration", "93.2");

    for (metadata, display_string, media_type) in [
        (&song, "youdiantian.flac", MediaType::Audio),
        (&clip, "holiday.mkv", MediaType::Video),
        (&Metadata::new(), "https://example.com/stream", MediaType::Video),
    ] {
        info!(
            "[{}] 窗口标题: {} | 正在播放: {}",
            media_type,
            formatter.window_title(metadata, display_string, media_type),
            formatter.now_playing(metadata, display_string, media_type),
        );
    }

    let context = InlineContext::new("/videos/holiday.mkv")
        .disabled(DisabledTrack::Audio)
        .subtitles(SubtitleState::Disabled)
        .times(75.25, 0.0, 93.2);
    info!("OSD: {}", formatter.osd_time(&context));
    info!("截图文件名: {}", formatter.screenshot_name(&context));
}
