//! 增量去重跟踪器
//!
//! 记录每个段落已经推送给客户端的内容，把扫描器的全量视图
//! 折算成一次性的增量事件：
//!
//! - 正文段：只推送未发送的后缀
//! - 标题段：段落闭合后一次性推送完整值（恰好一次）
//! - 未决标记边界所属的段落暂缓推送，待边界判定后补发
//! - 增量中含有字面 `[` / `]` 时暂缓推送（方括号内容只进最终结果，
//!   不走增量通道，避免客户端把它误当标记渲染）

use super::scanner::SectionView;
use super::sections::SectionKind;
use std::collections::HashMap;

/// 单次推进产生的推送
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// 正文段的未发送后缀
    Delta { text: String },
    /// 标题段的完整值
    Full { text: String },
}

/// 增量去重跟踪器（每个请求一个实例）
#[derive(Debug, Default)]
pub struct DeltaTracker {
    /// 段名 → 已发送内容（始终是该段当前内容的前缀）
    sent: HashMap<&'static str, String>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 对照某段落的最新视图推进发送状态
    ///
    /// `boundary_pending` 为真表示该段落拥有一个未决标记边界，
    /// 本轮一律不推送（内容保留在视图里，下一轮照常补发）。
    pub fn advance(&mut self, view: &SectionView<'_>, boundary_pending: bool) -> Option<Emission> {
        if boundary_pending {
            return None;
        }

        let sent = self.sent.entry(view.spec.name).or_default();

        match view.spec.kind {
            SectionKind::Header => {
                // 标题段等闭合后整体推送一次
                if !view.closed || view.content.is_empty() || sent.as_str() == view.content {
                    return None;
                }
                *sent = view.content.to_string();
                Some(Emission::Full {
                    text: view.content.to_string(),
                })
            }
            SectionKind::Body => {
                if view.content.len() <= sent.len() {
                    return None;
                }
                let delta = &view.content[sent.len()..];
                // 字面方括号不走增量通道
                if delta.contains('[') || delta.contains(']') {
                    return None;
                }
                sent.push_str(delta);
                Some(Emission::Delta {
                    text: delta.to_string(),
                })
            }
        }
    }

    /// 某段已发送的内容（测试与回放校验用）
    pub fn sent(&self, name: &str) -> &str {
        self.sent.get(name).map(String::as_str).unwrap_or("")
    }
}
