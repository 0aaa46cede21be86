//! 格式字符串的游标，负责提取 `{...}` 分组。
//!
//! 两个模板引擎共享同一套分组规则：
//! - 分组不支持嵌套，遇到的第一个 `}` 就结束分组；
//! - 只有 `{` 没有 `}` 时，分组一直截取到字符串末尾；
//! - 游标处不是 `{` 时得到空分组，游标不移动。
//!
//! 这些退化行为已经是用户格式字符串的一部分，不能当作错误修正。

/// 在格式字符串上前进的显式游标。
///
/// 位置以字节计，但总是落在字符边界上。
#[derive(Debug, Clone)]
pub(crate) struct FormatCursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> FormatCursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    fn rest(&self) -> &'a str {
        let source = self.source;
        &source[self.position..]
    }

    /// 查看下一个字符但不消耗它。
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// 消耗并返回下一个字符。
    pub(crate) fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// 如果下一个字符是 `expected`，消耗它并返回 `true`。
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// 提取一个 `{...}` 分组。
    ///
    /// # 返回
    /// 花括号之间的文本。游标处不是 `{` 时返回空字符串，游标保持不变。
    pub(crate) fn grab_group(&mut self) -> String {
        if !self.eat('{') {
            return String::new();
        }
        let rest = self.rest();
        match rest.find('}') {
            Some(end) => {
                self.position += end + 1;
                rest[..end].to_string()
            }
            None => {
                self.position = self.source.len();
                rest.to_string()
            }
        }
    }

    /// 连续提取 `N` 个分组，缺失的分组为空字符串。
    pub(crate) fn grab_groups<const N: usize>(&mut self) -> [String; N] {
        std::array::from_fn(|_| self.grab_group())
    }

    /// 提取从当前位置到下一个 `terminal` 之前的文本，游标停在 `terminal` 上。
    ///
    /// # 返回
    /// 如果后面再也没有 `terminal`，返回 `None`，游标不移动。
    pub(crate) fn grab_until(&mut self, terminal: char) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest.find(terminal)?;
        self.position += end;
        Some(&rest[..end])
    }
}
