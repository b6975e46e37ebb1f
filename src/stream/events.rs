//! 流式事件类型
//!
//! 定义下发给客户端的事件中间表示：解析管线（scanner / tracker /
//! assembler）产出 `StudyEvent`，服务层统一经 `to_sse()` 渲染成
//! `data: <json>\n\n` 帧。
//!
//! # 事件顺序约定
//!
//! 一次请求 = 若干增量事件 + 恰好一个终止事件（`complete` 或 `error`）。

use serde::{Deserialize, Serialize};

/// 下发事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StudyEvent {
    /// 正文段增量
    SectionUpdate {
        /// 段名（PascalCase，与最终结构字段一致）
        section: String,
        /// 未发送的后缀
        content: String,
        /// 该段是否已终止
        is_complete: bool,
    },

    /// 标题段完整值（每个标题段恰好一次）
    HeaderUpdate {
        section: String,
        content: String,
    },

    /// 严格 JSON 模式下的原始文本增量
    ContentChunk {
        content: String,
    },

    /// 终止事件：完整的结构化结果
    Complete {
        data: serde_json::Value,
    },

    /// 终止事件：失败原因
    Error {
        message: String,
    },
}

impl StudyEvent {
    /// 渲染为 SSE 帧
    pub fn to_sse(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => format!("data: {json}\n\n"),
            // StudyEvent 的序列化不会失败，兜底只为避免 panic
            Err(_) => "data: {\"type\":\"error\",\"message\":\"serialization failure\"}\n\n"
                .to_string(),
        }
    }

    /// 是否为终止事件
    pub fn is_terminal(&self) -> bool {
        matches!(self, StudyEvent::Complete { .. } | StudyEvent::Error { .. })
    }
}
