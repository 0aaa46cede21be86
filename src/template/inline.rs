//! 行内格式化器：单次扫描格式字符串并立即输出结果，不保留任何中间结构。
//!
//! 用于截图文件名、OSD 时间等只需要文件名和时间替换的场景。
//!
//! | 指令 | 含义 |
//! |---|---|
//! | `%f` | 文件名原文 |
//! | `%F` | 去掉目录和最后一个扩展名的文件名 |
//! | `%s{A}{B}` | 有字幕输出 A，字幕被禁用输出 B |
//! | `%d{A}{B}` | 音频被禁用输出 A，视频被禁用输出 B，都没有则不输出 |
//! | `%t{pattern}` | 当前时间，按 Qt 风格模式格式化 |
//! | `%a?` `%b?` `%w?` | 起始、结束、导航时间，`?` 为时间选择符 |
//! | `%%` | 字面量 `%` |
//!
//! 其他跟在 `%` 之后的字符原样输出。

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use tracing::trace;

use crate::{
    model::media::{DisabledTrack, SubtitleState},
    template::{
        cursor::FormatCursor,
        time::{TimeParts, format_qt_datetime},
    },
};

/// 行内格式化的上下文，每次调用时由调用方重新构建。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineContext {
    /// 原始文件名，可以带目录。
    pub file_name: String,
    /// 被禁用的轨道。
    pub disabled: DisabledTrack,
    /// 字幕状态。
    pub subtitles: SubtitleState,
    /// 导航时间（秒），对应 `%w`。
    pub time_nav: f64,
    /// 起始时间（秒），对应 `%a`。
    pub time_begin: f64,
    /// 结束时间（秒），对应 `%b`。
    pub time_end: f64,
}

impl InlineContext {
    /// 以文件名创建上下文，其余字段使用默认值。
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// 设置被禁用的轨道。
    #[must_use]
    pub fn disabled(mut self, disabled: DisabledTrack) -> Self {
        self.disabled = disabled;
        self
    }

    /// 设置字幕状态。
    #[must_use]
    pub fn subtitles(mut self, subtitles: SubtitleState) -> Self {
        self.subtitles = subtitles;
        self
    }

    /// 设置导航、起始、结束三个时间（秒）。
    #[must_use]
    pub fn times(mut self, nav: f64, begin: f64, end: f64) -> Self {
        self.time_nav = nav;
        self.time_begin = begin;
        self.time_end = end;
        self
    }
}

/// 使用本地当前时间渲染格式字符串。
#[must_use]
pub fn render_inline(format: &str, context: &InlineContext) -> String {
    render_inline_at(format, context, &Local::now())
}

/// 使用给定时刻渲染格式字符串，`%t{...}` 以 `now` 为当前时间。
///
/// 格式字符串不会导致失败：末尾孤立的 `%` 被忽略，未闭合的 `{` 截取到字符串末尾。
#[must_use]
pub fn render_inline_at<Tz>(format: &str, context: &InlineContext, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let nav = TimeParts::from_seconds(context.time_nav);
    let begin = TimeParts::from_seconds(context.time_begin);
    let end = TimeParts::from_seconds(context.time_end);

    let mut cursor = FormatCursor::new(format);
    let mut output = String::with_capacity(format.len());

    while let Some(c) = cursor.next_char() {
        if c != '%' {
            output.push(c);
            continue;
        }
        let Some(directive) = cursor.next_char() else {
            break;
        };
        match directive {
            'f' => output.push_str(&context.file_name),
            'F' => output.push_str(complete_base_name(&context.file_name)),
            's' => {
                let [present, disabled] = cursor.grab_groups::<2>();
                output.push_str(match context.subtitles {
                    SubtitleState::Present => &present,
                    SubtitleState::Disabled => &disabled,
                });
            }
            'd' => {
                let [audio, video] = cursor.grab_groups::<2>();
                match context.disabled {
                    DisabledTrack::Audio => output.push_str(&audio),
                    DisabledTrack::Video => output.push_str(&video),
                    DisabledTrack::None => {}
                }
            }
            't' => {
                let pattern = cursor.grab_group();
                output.push_str(&format_qt_datetime(now, &pattern));
            }
            'a' | 'b' | 'w' => {
                let parts = match directive {
                    'a' => &begin,
                    'b' => &end,
                    _ => &nav,
                };
                if let Some(selector) = cursor.next_char() {
                    output.push_str(&parts.format_selector(selector));
                }
            }
            // `%%` 和未知指令（包括尚未实现的 `%n`）都原样输出该字符
            other => output.push(other),
        }
    }

    trace!(format, output = %output, "行内格式化完成");
    output
}

/// 去掉目录和最后一个扩展名后的文件名，例如 `/x/archive.tar.gz` 得到 `archive.tar`。
fn complete_base_name(file_name: &str) -> &str {
    let name = file_name.rsplit('/').next().unwrap_or(file_name);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}
