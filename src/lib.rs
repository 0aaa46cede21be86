#![warn(missing_docs)]

//! # Display Format RS
//!
//! 媒体播放器界面使用的显示文本模板引擎，用于根据文件元数据生成窗口标题、
//! “正在播放”文本、OSD 时间和截图文件名。
//!
//! ## 主要功能
//!
//! - **显示树**: 将 `%title{#}{$}{$}` 这类格式字符串编译成一棵可复用的树，
//!   每次元数据更新时只需求值，无需重新解析。
//! - **行内格式化**: 对 `%F - %ap` 这类只涉及文件名和时间的格式字符串单次扫描、立即输出。
//! - **配置**: 以 JSON 形式持久化用户编辑的各处格式字符串。
//!
//! ## 显示树
//!
//! ```rust
//! use display_format_rs::{DisplayTree, MediaType, Metadata};
//!
//! let tree = DisplayTree::compile("%title{#}{$}{$}%artist{ - #}{}{}");
//! let metadata = Metadata::new()
//!     .with("title", "Song X")
//!     .with("artist", "Band");
//!
//! assert_eq!(
//!     tree.evaluate(&metadata, "song.mp3", MediaType::Audio),
//!     "Song X - Band"
//! );
//! // 元数据为空时直接返回显示名称
//! assert_eq!(
//!     tree.evaluate(&Metadata::new(), "song.mp3", MediaType::Audio),
//!     "song.mp3"
//! );
//! ```
//!
//! ## 行内格式化
//!
//! ```rust
//! use display_format_rs::{InlineContext, render_inline};
//!
//! let context = InlineContext::new("/x/song.mp3").times(0.0, 65.4, 125.0);
//! assert_eq!(
//!     render_inline("%F - %ap to %bp", &context),
//!     "song - 00:01:05 to 00:02:05"
//! );
//! ```
pub mod config;
pub mod error;
pub mod model;
pub mod template;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::{
    config::FormatConfig,
    error::{DisplayFormatError, Result},
    model::{DisabledTrack, MediaType, Metadata, SubtitleState},
    template::{DisplayParser, DisplayTree, InlineContext, render_inline, render_inline_at},
};

use tracing::debug;

// ==========================================================
//  顶层 API
// ==========================================================

/// 顶层格式化器，按一份 [`FormatConfig`] 持有所有已编译的格式。
///
/// 这是与本库交互的主要入口点。显示树格式在配置变化时编译一次，
/// 之后每次元数据更新都只做求值。
#[derive(Debug)]
pub struct DisplayFormatter {
    config: FormatConfig,
    window_title: DisplayParser,
    now_playing: DisplayParser,
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayFormatter {
    /// 使用默认配置创建格式化器。
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(FormatConfig::default())
    }

    /// 使用给定配置创建格式化器。
    #[must_use]
    pub fn from_config(config: FormatConfig) -> Self {
        let window_title = DisplayParser::with_format(&config.window_title_format);
        let now_playing = DisplayParser::with_format(&config.now_playing_format);
        Self {
            config,
            window_title,
            now_playing,
        }
    }

    /// 当前配置。
    #[must_use]
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// 应用新的配置，只重新编译发生变化的显示树格式。
    pub fn apply_config(&mut self, config: FormatConfig) {
        if config.window_title_format != self.config.window_title_format {
            debug!("窗口标题格式已变化，重新编译。");
            self.window_title
                .take_format_string(&config.window_title_format);
        }
        if config.now_playing_format != self.config.now_playing_format {
            debug!("正在播放格式已变化，重新编译。");
            self.now_playing.take_format_string(&config.now_playing_format);
        }
        self.config = config;
    }

    /// 生成窗口标题。
    #[must_use]
    pub fn window_title(&self, metadata: &Metadata, display_string: &str, media_type: MediaType) -> String {
        self.window_title
            .parse_metadata(metadata, display_string, media_type)
    }

    /// 生成“正在播放”文本。
    #[must_use]
    pub fn now_playing(&self, metadata: &Metadata, display_string: &str, media_type: MediaType) -> String {
        self.now_playing
            .parse_metadata(metadata, display_string, media_type)
    }

    /// 生成 OSD 时间文本。
    #[must_use]
    pub fn osd_time(&self, context: &InlineContext) -> String {
        render_inline(&self.config.osd_time_format, context)
    }

    /// 生成截图文件名（不含扩展名）。
    #[must_use]
    pub fn screenshot_name(&self, context: &InlineContext) -> String {
        render_inline(&self.config.screenshot_format, context)
    }
}
