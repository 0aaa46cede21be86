//! 负责处理格式字符串的持久化配置。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{DisplayFormatError, Result};

/// 配置目录下的子目录名称。
const CONFIG_DIR_NAME: &str = "display-format";

/// 格式配置文件名。
const CONFIG_FILE_NAME: &str = "formats.json";

/// 用户可编辑的各处显示格式。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
    /// 窗口标题，显示树格式。
    pub window_title_format: String,
    /// “正在播放”文本，显示树格式。
    pub now_playing_format: String,
    /// OSD 上的播放时间，行内格式。
    pub osd_time_format: String,
    /// 截图文件名（不含扩展名），行内格式。
    pub screenshot_format: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            window_title_format: "%title{#}{$}{$}".to_string(),
            now_playing_format: "%title{#}{$}{$}%artist{ - #}{}{}".to_string(),
            osd_time_format: "%wp / %bp".to_string(),
            screenshot_format: "%F %t{yyyy-MM-dd HH-mm-ss} %wP".to_string(),
        }
    }
}

/// 获取应用配置目录下指定文件的完整路径。
///
/// # 参数
/// * `filename` - 目标配置文件的名称，例如 "formats.json"。
pub fn get_config_file_path(filename: &str) -> Result<PathBuf> {
    let mut config_dir = dirs::config_dir().ok_or(DisplayFormatError::ConfigDirNotFound)?;
    config_dir.push(CONFIG_DIR_NAME);
    fs::create_dir_all(&config_dir)?;
    config_dir.push(filename);
    Ok(config_dir)
}

/// 从用户配置目录加载格式配置。
pub fn load_format_config() -> Result<FormatConfig> {
    load_format_config_from(&get_config_file_path(CONFIG_FILE_NAME)?)
}

/// 从指定文件加载格式配置。文件中缺失的字段使用默认值。
pub fn load_format_config_from(path: &Path) -> Result<FormatConfig> {
    let content = fs::read_to_string(path)?;
    let config: FormatConfig = serde_json::from_str(&content)?;
    info!("已从 {} 加载格式配置。", path.display());
    Ok(config)
}

/// 将格式配置保存到用户配置目录。
pub fn save_format_config(config: &FormatConfig) -> Result<()> {
    save_format_config_to(config, &get_config_file_path(CONFIG_FILE_NAME)?)
}

/// 将格式配置序列化为 JSON 并保存到指定文件。
pub fn save_format_config_to(config: &FormatConfig, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    info!("格式配置已保存到 {}。", path.display());
    Ok(())
}

/// 从指定文件加载格式配置，文件不存在或无法解析时使用默认配置。
pub fn load_or_default_from(path: &Path) -> FormatConfig {
    match load_format_config_from(path) {
        Ok(config) => config,
        Err(DisplayFormatError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("格式配置文件不存在，将使用默认配置。");
            FormatConfig::default()
        }
        Err(e) => {
            warn!("加载格式配置失败，将使用默认配置: {}", e);
            FormatConfig::default()
        }
    }
}

/// 从用户配置目录加载格式配置，失败时使用默认配置。
pub fn load_or_default() -> FormatConfig {
    match get_config_file_path(CONFIG_FILE_NAME) {
        Ok(path) => load_or_default_from(&path),
        Err(e) => {
            warn!("无法定位格式配置文件，将使用默认配置: {}", e);
            FormatConfig::default()
        }
    }
}
