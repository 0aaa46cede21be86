//! 模板引擎的输入数据模型：元数据映射和媒体状态枚举。

pub mod media;
pub mod metadata;

pub use media::{DisabledTrack, MediaType, SubtitleState, parse_named};
pub use metadata::Metadata;
