//! 描述当前播放条目状态的小型枚举。

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{DisplayFormatError, Result};

/// 媒体的粗略分类。
///
/// 当元数据中缺少某个键时，显示树用它在音频分支与视频分支之间做选择。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum MediaType {
    /// 纯音频文件。
    Audio,
    /// 视频文件，也是未知类型时的默认值。
    #[default]
    Video,
}

/// 被禁用的轨道，供行内格式化器的 `%d{..}{..}` 指令使用。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum DisabledTrack {
    /// 没有轨道被禁用。
    #[default]
    None,
    /// 音频轨道被禁用。
    Audio,
    /// 视频轨道被禁用。
    Video,
}

/// 字幕状态，供行内格式化器的 `%s{..}{..}` 指令使用。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum SubtitleState {
    /// 有字幕并正在显示。
    #[default]
    Present,
    /// 字幕已被禁用。
    Disabled,
}

/// 从外部输入（命令行、JS 调用方）解析枚举名称，忽略首尾空白和大小写。
///
/// # 错误
/// 名称无法识别时返回 [`DisplayFormatError::InvalidValue`]，携带原始字符串。
pub fn parse_named<T: FromStr>(name: &str) -> Result<T> {
    name.trim()
        .parse::<T>()
        .map_err(|_| DisplayFormatError::InvalidValue(name.to_string()))
}
