//! 增量分段扫描器
//!
//! 从任意切分的文本流中提取 `[MARKER]...[/MARKER]` 包裹的段落内容。
//! 状态机只有两个状态（空闲 / 某段打开中），外加一个待定标记缓冲：
//! 遇到 `[` 而右括号尚未到达时，从 `[` 开始的尾巴挂起，
//! 不进入任何段落内容，等后续分片补齐后再判定。
//!
//! # 不变式
//!
//! - 每个段落的上报内容单调增长：旧内容永远是新内容的前缀
//! - 待定标记片段绝不混入上报内容（补齐后要么是标记、要么整体按字面落段）
//! - 已识别的标记本身绝不出现在段落内容里
//! - 完整出现但不属于注册表的方括号片段按字面内容处理

use super::sections::{SectionRegistry, SectionSpec};

/// 扫描状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// 尚未进入任何段落
    Idle,
    /// 第 n 个段落打开中
    Open(usize),
}

/// 增量分段扫描器
#[derive(Debug)]
pub struct SectionScanner {
    registry: &'static SectionRegistry,
    state: ScanState,
    /// 未决尾巴：为空，或以一个右括号尚未到达的 `[` 开头
    pending: String,
    /// 每个段落的原始内容（未 trim），None 表示起始标记还没出现
    contents: Vec<Option<String>>,
    /// 段落是否已终止（终止后内容不再增长）
    closed: Vec<bool>,
    finished: bool,
}

impl SectionScanner {
    pub fn new(registry: &'static SectionRegistry) -> Self {
        Self {
            registry,
            state: ScanState::Idle,
            pending: String::new(),
            contents: vec![None; registry.specs.len()],
            closed: vec![false; registry.specs.len()],
            finished: false,
        }
    }

    /// 喂入一个新分片
    pub fn push(&mut self, chunk: &str) {
        debug_assert!(!self.finished, "push after finish");
        self.pending.push_str(chunk);
        self.scan();
    }

    /// 流结束：把残留的未决标记片段按字面落入打开中的段落
    ///
    /// 残缺标记无法再补齐，与其丢弃不如保留原文。
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if !self.pending.is_empty() {
            let tail = std::mem::take(&mut self.pending);
            self.append_literal(&tail);
        }
    }

    /// 是否存在未决的标记边界
    pub fn has_pending_marker(&self) -> bool {
        !self.pending.is_empty()
    }

    /// 未决边界所属的段名（仅当某段打开中且存在未决尾巴）
    pub fn pending_owner(&self) -> Option<&'static str> {
        match (self.state, self.pending.is_empty()) {
            (ScanState::Open(idx), false) => Some(self.registry.specs[idx].name),
            _ => None,
        }
    }

    /// 当前各段落的最优已知视图
    ///
    /// 只包含起始标记已出现的段落；内容做首尾空白 trim。
    pub fn sections(&self) -> Vec<SectionView<'_>> {
        self.registry
            .specs
            .iter()
            .enumerate()
            .filter_map(|(idx, spec)| {
                self.contents[idx].as_deref().map(|raw| SectionView {
                    spec,
                    content: raw.trim(),
                    closed: self.closed[idx],
                })
            })
            .collect()
    }

    /// 按段名取单个段落的视图
    pub fn section(&self, name: &str) -> Option<SectionView<'_>> {
        let idx = self.registry.index_of(name)?;
        self.contents[idx].as_deref().map(|raw| SectionView {
            spec: &self.registry.specs[idx],
            content: raw.trim(),
            closed: self.closed[idx],
        })
    }

    fn scan(&mut self) {
        loop {
            match self.pending.find('[') {
                None => {
                    // 纯文本，整体落段
                    let text = std::mem::take(&mut self.pending);
                    self.append_literal(&text);
                    return;
                }
                Some(0) => match self.pending.find(']') {
                    None => return, // 标记未补齐，挂起
                    Some(r) => {
                        let token: String = self.pending.drain(..=r).collect();
                        if !self.try_marker(&token) {
                            // 非标记：只有开头的 `[` 确定是字面内容，
                            // 其余放回重扫（里面可能藏着真正的标记）
                            self.append_literal("[");
                            self.pending.insert_str(0, &token[1..]);
                        }
                    }
                },
                Some(l) => {
                    // `[` 之前的部分必然是字面内容
                    let text: String = self.pending.drain(..l).collect();
                    self.append_literal(&text);
                }
            }
        }
    }

    /// 判定一个完整的方括号片段，命中标记返回 true
    ///
    /// 优先级：某段起始标记 > 当前段终止标记。
    /// 起始标记同时终止当前打开的段落（兄弟段兜底闭合）。
    fn try_marker(&mut self, token: &str) -> bool {
        let upper = token.to_ascii_uppercase();

        if let Some(idx) = self
            .registry
            .specs
            .iter()
            .position(|s| s.start == upper)
        {
            if let ScanState::Open(cur) = self.state {
                self.closed[cur] = true;
            }
            // 重复出现的起始标记以首次为准，避免内容回退
            if self.contents[idx].is_none() {
                self.contents[idx] = Some(String::new());
                self.state = ScanState::Open(idx);
            } else {
                self.state = ScanState::Idle;
            }
            return true;
        }

        if let ScanState::Open(cur) = self.state {
            let spec = &self.registry.specs[cur];
            if spec.ends.iter().any(|e| **e == upper) {
                self.closed[cur] = true;
                self.state = ScanState::Idle;
                return true;
            }
        }

        false
    }

    fn append_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let ScanState::Open(idx) = self.state {
            if let Some(content) = self.contents[idx].as_mut() {
                content.push_str(text);
            }
        }
        // 空闲状态下的文本（段落之间的空隙）直接忽略
    }
}

/// 单个段落的只读视图
#[derive(Debug, Clone, Copy)]
pub struct SectionView<'a> {
    pub spec: &'static SectionSpec,
    /// trim 后的当前内容
    pub content: &'a str,
    /// 终止标记是否已出现
    pub closed: bool,
}
