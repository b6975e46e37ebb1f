//! 上游 SSE 分片解析器
//!
//! 把 chat/completions 流式响应的字节分片还原成文本 token 与 usage。
//! 分片边界任意：内部按行缓冲，只解析完整行，残行留待下一分片。
//! 缓冲按字节存放，避免多字节字符被分片截断后损坏。

use crate::telemetry::TokenUsage;
use serde_json::Value;

/// 解析出的流元素
#[derive(Debug, Clone, PartialEq)]
pub enum SseItem {
    /// 一段文本增量
    Token(String),
    /// 末尾 usage 统计（需要 `stream_options.include_usage`）
    Usage(TokenUsage),
    /// 上游在流中报告的错误
    Error(String),
    /// `data: [DONE]`
    Done,
}

/// 增量 SSE 行解析器
#[derive(Debug, Default)]
pub struct SseChunkParser {
    buffer: Vec<u8>,
}

impl SseChunkParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 喂入一个字节分片，返回其中完整行解析出的元素
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseItem> {
        self.buffer.extend_from_slice(bytes);
        let mut items = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            let Some(payload) = line.strip_prefix("data:") else {
                continue; // 空行或注释行
            };
            let payload = payload.trim_start();

            if payload == "[DONE]" {
                items.push(SseItem::Done);
                continue;
            }

            let chunk: Value = match serde_json::from_str(payload) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!("[SSE] 无法解析的数据行: {e}");
                    continue;
                }
            };

            if let Some(message) = chunk
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
            {
                items.push(SseItem::Error(message.to_string()));
                continue;
            }

            if let Some(text) = chunk
                .pointer("/choices/0/delta/content")
                .and_then(Value::as_str)
            {
                if !text.is_empty() {
                    items.push(SseItem::Token(text.to_string()));
                }
            }

            if let Some(usage) = chunk.get("usage").filter(|u| !u.is_null()) {
                let read = |key: &str| {
                    usage.get(key).and_then(Value::as_u64).unwrap_or(0) as u32
                };
                items.push(SseItem::Usage(TokenUsage::from_openai(
                    read("prompt_tokens"),
                    read("completion_tokens"),
                    read("total_tokens"),
                )));
            }
        }

        items
    }
}
