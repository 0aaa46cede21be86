//! 显示树编译器。
//!
//! 格式字符串只在配置变化时编译一次，之后每次元数据更新（例如切换曲目）都对同一棵树求值。
//!
//! # 语法
//!
//! - `%%` 输出字面量 `%`，但只消耗第一个 `%`：第二个 `%` 仍会作为指令开头，
//!   所以 `%%title{#}{}{}` 输出 `%` 加标题，`%%%%` 输出 `%%%`。
//! - `%key{T}{A}{V}` 是条件节点：`key` 是 `%` 与下一个 `{` 之间的全部文本，
//!   随后的三个分组分别是标签分支、音频分支和视频分支。
//! - 其余字符都是字面量文本。
//!
//! 分组内部使用另一套规则：`#` 引用条件节点的键对应的元数据值，`$` 引用显示名称，
//! `##` 和 `$$` 分别输出字面量 `#` 和 `$`。
//!
//! 编译永远不会失败。后面没有 `{` 的 `%`，或键为空的 `%{`，只丢弃这个 `%`；
//! 缺失的分组编译为空分支；未闭合的 `{` 截取到字符串末尾。

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    model::{media::MediaType, metadata::Metadata},
    template::{
        cursor::FormatCursor,
        node::{DisplayChain, DisplayNode, MetadataView, TrieNode},
    },
};

/// 一棵编译好的显示树。编译后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTree {
    source: String,
    root: DisplayChain,
}

impl Default for DisplayTree {
    fn default() -> Self {
        Self::compile("")
    }
}

impl DisplayTree {
    /// 编译一个格式字符串。
    #[must_use]
    pub fn compile(format: &str) -> Self {
        let tree = Self {
            source: format.to_string(),
            root: compile_chain(format),
        };
        debug!(
            format,
            node_count = tree.node_count(),
            "显示树编译完成"
        );
        tree
    }

    /// 编译时使用的格式字符串。
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 根节点链。
    #[must_use]
    pub fn root(&self) -> &DisplayChain {
        &self.root
    }

    /// 树中的节点总数，包括所有分支。
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// 对元数据求值。
    ///
    /// # 参数
    /// * `metadata` - 当前条目的元数据。为空时不遍历树，直接返回 `display_string`。
    /// * `display_string` - 显示名称（通常来自 URL 或用户可见的标题），
    ///   也用作缺失的 `title`。
    /// * `media_type` - 元数据键缺失时用来选择音频或视频分支。
    #[must_use]
    pub fn evaluate(&self, metadata: &Metadata, display_string: &str, media_type: MediaType) -> String {
        if metadata.is_empty() {
            return display_string.to_string();
        }
        let view = MetadataView::new(metadata, display_string, media_type);
        let mut output = String::new();
        self.root.write_to(&view, &mut output);
        trace!(format = %self.source, output = %output, "显示树求值完成");
        output
    }
}

fn flush_text(nodes: &mut Vec<DisplayNode>, gathered: &mut String) {
    if gathered.is_empty() {
        return;
    }
    nodes.push(DisplayNode::PlainText(std::mem::take(gathered)));
}

/// 编译顶层格式字符串。
fn compile_chain(format: &str) -> DisplayChain {
    let mut cursor = FormatCursor::new(format);
    let mut nodes = Vec::new();
    let mut gathered = String::new();

    while let Some(c) = cursor.next_char() {
        if c != '%' {
            gathered.push(c);
            continue;
        }
        // 第二个 `%` 不消耗，下一轮仍按指令开头处理
        if cursor.peek() == Some('%') {
            gathered.push('%');
            continue;
        }

        flush_text(&mut nodes, &mut gathered);
        let key = match cursor.grab_until('{') {
            Some(key) if !key.is_empty() => key,
            _ => continue,
        };
        let [tag, audio, video] = cursor.grab_groups::<3>();
        nodes.push(DisplayNode::Trie(Box::new(TrieNode {
            key: key.to_string(),
            tag: compile_group(&tag, key),
            audio: compile_group(&audio, key),
            video: compile_group(&video, key),
        })));
    }
    flush_text(&mut nodes, &mut gathered);

    DisplayChain::from_nodes(nodes)
}

/// 编译条件节点的一个分组，`#` 引用的键就是条件节点的键。
fn compile_group(text: &str, key: &str) -> DisplayChain {
    let mut cursor = FormatCursor::new(text);
    let mut nodes = Vec::new();
    let mut gathered = String::new();

    while let Some(c) = cursor.next_char() {
        match c {
            '#' | '$' => {
                if cursor.eat(c) {
                    gathered.push(c);
                    continue;
                }
                flush_text(&mut nodes, &mut gathered);
                nodes.push(if c == '#' {
                    DisplayNode::Property(key.to_string())
                } else {
                    DisplayNode::DisplayName
                });
            }
            _ => gathered.push(c),
        }
    }
    flush_text(&mut nodes, &mut gathered);

    DisplayChain::from_nodes(nodes)
}

/// 持有“当前显示树”的解析器，可以在线程间共享。
///
/// 重新编译时先在锁外编译新树，再在写锁内整体替换。
/// 求值时在读锁内取得当前树的快照，然后在锁外遍历，
/// 因此并发的重新编译不会让正在进行的求值看到半棵树。
#[derive(Debug, Default)]
pub struct DisplayParser {
    tree: RwLock<Arc<DisplayTree>>,
}

impl DisplayParser {
    /// 创建一个空解析器。在设置格式字符串之前，非空元数据的求值结果为空字符串。
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定格式字符串创建解析器。
    #[must_use]
    pub fn with_format(format: &str) -> Self {
        Self {
            tree: RwLock::new(Arc::new(DisplayTree::compile(format))),
        }
    }

    /// 编译新的格式字符串并替换当前树，旧树在最后一个快照释放后销毁。
    pub fn take_format_string(&self, format: &str) {
        let tree = Arc::new(DisplayTree::compile(format));
        *self.tree.write().unwrap_or_else(PoisonError::into_inner) = tree;
    }

    /// 当前树的快照。
    #[must_use]
    pub fn snapshot(&self) -> Arc<DisplayTree> {
        Arc::clone(&self.tree.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// 对当前树求值，语义与 [`DisplayTree::evaluate`] 相同。
    #[must_use]
    pub fn parse_metadata(&self, metadata: &Metadata, display_string: &str, media_type: MediaType) -> String {
        self.snapshot().evaluate(metadata, display_string, media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> DisplayNode {
        DisplayNode::PlainText(s.to_string())
    }

    fn trie(tree: &DisplayTree, index: usize) -> &TrieNode {
        match &tree.root().nodes()[index] {
            DisplayNode::Trie(trie) => trie,
            other => panic!("第 {index} 个节点应为条件节点，实际为 {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_is_one_node() {
        let tree = DisplayTree::compile("Now Playing");
        assert_eq!(tree.root().nodes(), &[text("Now Playing")]);
    }

    #[test]
    fn test_empty_format_is_blank() {
        let tree = DisplayTree::compile("");
        assert!(tree.root().is_blank());
        assert_eq!(tree, DisplayTree::default());
    }

    #[test]
    fn test_trie_structure() {
        let tree = DisplayTree::compile("[%artist{#: }{Audio$}{}]");
        let nodes = tree.root().nodes();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], text("["));
        assert_eq!(nodes[2], text("]"));

        let artist = trie(&tree, 1);
        assert_eq!(artist.key, "artist");
        assert_eq!(
            artist.tag.nodes(),
            &[DisplayNode::Property("artist".to_string()), text(": ")]
        );
        assert_eq!(artist.audio.nodes(), &[text("Audio"), DisplayNode::DisplayName]);
        assert!(artist.video.is_blank());
    }

    #[test]
    fn test_doubled_markers_are_literal() {
        let tree = DisplayTree::compile("%%%k{##$$}{}{}");
        let nodes = tree.root().nodes();
        assert_eq!(nodes[0], text("%%"));
        assert_eq!(trie(&tree, 1).tag.nodes(), &[text("#$")]);
    }

    #[test]
    fn test_double_percent_rereads_second_percent() {
        let tree = DisplayTree::compile("%%title{#}{}{}");
        assert_eq!(tree.root().nodes()[0], text("%"));
        assert_eq!(trie(&tree, 1).key, "title");

        let run = DisplayTree::compile("%%%%");
        assert_eq!(run.root().nodes(), &[text("%%%")]);
    }

    #[test]
    fn test_percent_without_brace_is_dropped() {
        let tree = DisplayTree::compile("50% off");
        assert_eq!(tree.root().nodes(), &[text("50"), text(" off")]);
    }

    #[test]
    fn test_empty_key_keeps_brace_as_text() {
        let tree = DisplayTree::compile("%{a}");
        assert_eq!(tree.root().nodes(), &[text("{a}")]);
    }

    #[test]
    fn test_key_runs_to_next_brace() {
        let tree = DisplayTree::compile("%album artist{#}");
        let node = trie(&tree, 0);
        assert_eq!(node.key, "album artist");
        assert_eq!(node.tag.nodes(), &[DisplayNode::Property("album artist".to_string())]);
        assert!(node.audio.is_blank());
        assert!(node.video.is_blank());
    }

    #[test]
    fn test_unclosed_group_swallows_rest() {
        let tree = DisplayTree::compile("%title{# - tail");
        assert_eq!(tree.root().nodes().len(), 1);
        assert_eq!(
            trie(&tree, 0).tag.nodes(),
            &[DisplayNode::Property("title".to_string()), text(" - tail")]
        );
    }

    #[test]
    fn test_recompile_is_structurally_equal() {
        let format = "%title{#}{$}{$} %artist{- #}{}{}";
        assert_eq!(DisplayTree::compile(format), DisplayTree::compile(format));
    }

    #[test]
    fn test_parser_swaps_tree() {
        let parser = DisplayParser::with_format("old");
        let before = parser.snapshot();
        parser.take_format_string("new");

        let metadata = Metadata::new().with("title", "t");
        assert_eq!(parser.parse_metadata(&metadata, "d", MediaType::Video), "new");
        assert_eq!(before.evaluate(&metadata, "d", MediaType::Video), "old");
        assert_eq!(parser.snapshot().source(), "new");
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DisplayParser>();
    }
}
