//! 当前播放条目的元数据映射。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 字符串键到字符串值的元数据映射，例如 `title`、`artist`、`album`。
///
/// 键区分大小写，按原样保存。显示树只关心“键是否存在”以及“值的文本形式”。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    data: HashMap<String, String>,
}

impl Metadata {
    /// 创建一个新的、空的 `Metadata` 实例。
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// 设置或覆盖一个键的值。
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    /// 链式版本的 [`Metadata::set`]。
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// 获取一个键的值。
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// 判断键是否存在。值为空字符串的键同样视为存在。
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// 移除一个键，返回它原来的值。
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.data.remove(key)
    }

    /// 映射中键的数量。
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 映射是否为空。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 清空所有元数据。
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// 遍历所有键值对，顺序不固定。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 从一个 JSON 对象构建元数据。
    ///
    /// 标量会被转换成文本：字符串原样保留，数字和布尔值使用其文本形式，
    /// `null` 变为空字符串。数组和对象没有文本形式，会得到空字符串，但键仍然存在。
    /// 如果传入的不是对象，则返回空映射。
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::new();
        };
        map.iter()
            .map(|(key, value)| (key.clone(), json_value_to_text(value)))
            .collect()
    }
}

fn json_value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for Metadata {
    fn from(data: HashMap<String, String>) -> Self {
        Self { data }
    }
}
