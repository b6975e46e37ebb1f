//! 上游 Provider 层
//!
//! - `openai`: OpenAI 兼容 chat/completions 流式客户端
//! - `sse`: 上游 SSE 分片解析器

pub mod openai;
pub mod sse;

pub use openai::{OpenAiConfig, OpenAiProvider, ProviderError};
pub use sse::{SseChunkParser, SseItem};
