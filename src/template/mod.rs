//! 模板引擎核心模块
//!
//! 包含两个共享分组规则的引擎：
//! - [`inline`]：单次扫描、立即输出的行内格式化器；
//! - [`compiler`] 与 [`node`]：先编译成显示树、再对元数据反复求值的显示树引擎。

pub(crate) mod cursor;
pub mod compiler;
pub mod inline;
pub mod node;
pub mod time;

pub use compiler::{DisplayParser, DisplayTree};
pub use inline::{InlineContext, render_inline, render_inline_at};
pub use node::{DisplayChain, DisplayNode, TrieNode};
pub use time::{TimeParts, format_qt_datetime, format_timestamp};
