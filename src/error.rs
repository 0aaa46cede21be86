//! 定义了整个 `display-format` 库的错误类型 `DisplayFormatError`。
//!
//! 模板引擎本身不会失败：格式错误的输入总是被尽力渲染。
//! 这里的错误只来自配置读写和外部输入的类型转换。

use std::io;
use thiserror::Error;

/// `display-format` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum DisplayFormatError {
    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 找不到用户配置目录
    #[error("无法找到用户配置目录")]
    ConfigDirNotFound,

    /// 无法识别的枚举取值，例如未知的媒体类型名称
    #[error("无效的取值: '{0}'")]
    InvalidValue(String),
}

/// `DisplayFormatError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, DisplayFormatError>;
