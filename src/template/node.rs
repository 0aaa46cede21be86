//! 显示树的节点模型与求值。
//!
//! 一棵显示树由若干节点链组成。链按格式字符串中的顺序持有节点，
//! 条件节点（`Trie`）再各自持有三条分支链。所有权严格呈树状，没有共享和环。

use serde::Serialize;

use crate::model::{media::MediaType, metadata::Metadata};

/// 求值时总是可见的键。元数据里没有它时，用显示名称代替。
pub(crate) const TITLE_KEY: &str = "title";

/// 显示树中的一个节点。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DisplayNode {
    /// 空节点，输出空字符串。
    Empty,
    /// 字面量文本。
    PlainText(String),
    /// 元数据引用：存在该键时输出它的值，否则什么也不输出。
    Property(String),
    /// 输出调用方提供的显示名称。
    DisplayName,
    /// 三路条件分支。
    Trie(Box<TrieNode>),
}

/// 条件节点：按元数据键是否存在以及媒体类型，选择三条分支之一。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrieNode {
    /// 用于判断的元数据键。
    pub key: String,
    /// 元数据中存在 `key` 时使用的分支。
    pub tag: DisplayChain,
    /// 键不存在且为音频时使用的分支。
    pub audio: DisplayChain,
    /// 键不存在且不是音频时使用的分支。
    pub video: DisplayChain,
}

/// 按顺序排列的节点链，第 `i` 个节点的后继就是第 `i + 1` 个节点。
///
/// 链永远不为空，没有内容的链只包含一个 [`DisplayNode::Empty`]。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayChain {
    nodes: Vec<DisplayNode>,
}

impl Default for DisplayChain {
    fn default() -> Self {
        Self {
            nodes: vec![DisplayNode::Empty],
        }
    }
}

impl DisplayChain {
    /// 由节点列表构建链，空列表得到只含 `Empty` 的链。
    #[must_use]
    pub fn from_nodes(nodes: Vec<DisplayNode>) -> Self {
        if nodes.is_empty() {
            Self::default()
        } else {
            Self { nodes }
        }
    }

    /// 链中的节点。
    #[must_use]
    pub fn nodes(&self) -> &[DisplayNode] {
        &self.nodes
    }

    /// 链是否只包含空节点。
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.nodes.iter().all(|node| matches!(node, DisplayNode::Empty))
    }

    /// 链及其所有分支中的节点总数。
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                DisplayNode::Trie(trie) => {
                    1 + trie.tag.node_count() + trie.audio.node_count() + trie.video.node_count()
                }
                _ => 1,
            })
            .sum()
    }

    /// 按深度优先、从左到右的顺序求值，把结果追加到 `output`。
    pub(crate) fn write_to(&self, view: &MetadataView<'_>, output: &mut String) {
        for node in &self.nodes {
            node.write_to(view, output);
        }
    }
}

impl DisplayNode {
    fn write_to(&self, view: &MetadataView<'_>, output: &mut String) {
        match self {
            Self::Empty => {}
            Self::PlainText(text) => output.push_str(text),
            Self::Property(key) => {
                if let Some(value) = view.get(key) {
                    output.push_str(value);
                }
            }
            Self::DisplayName => output.push_str(view.display_string),
            Self::Trie(trie) => trie.select(view).write_to(view, output),
        }
    }
}

impl TrieNode {
    /// 选择分支。这是一个 if / else-if 链：键存在时无条件选择标签分支，
    /// 只有键缺失时才看媒体类型。
    fn select(&self, view: &MetadataView<'_>) -> &DisplayChain {
        if view.contains_key(&self.key) {
            &self.tag
        } else if view.media_type == MediaType::Audio {
            &self.audio
        } else {
            &self.video
        }
    }
}

/// 求值期间对元数据的只读视图。
///
/// 元数据缺少 `title` 时，视图中会出现一个值为显示名称的 `title`，
/// 调用方的映射本身不会被修改。
pub(crate) struct MetadataView<'a> {
    metadata: &'a Metadata,
    display_string: &'a str,
    media_type: MediaType,
}

impl<'a> MetadataView<'a> {
    pub(crate) fn new(metadata: &'a Metadata, display_string: &'a str, media_type: MediaType) -> Self {
        Self {
            metadata,
            display_string,
            media_type,
        }
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.metadata
            .get(key)
            .or_else(|| (key == TITLE_KEY).then_some(self.display_string))
    }

    fn contains_key(&self, key: &str) -> bool {
        key == TITLE_KEY || self.metadata.contains_key(key)
    }
}
