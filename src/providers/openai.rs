//! OpenAI 兼容上游客户端
//!
//! 负责向 `{base_url}/chat/completions` 发起流式请求，
//! 返回原始字节流；分片解析交给 `sse::SseChunkParser`。
//!
//! 取消语义：调用方丢弃返回的流即中断底层连接，上游生成随之停止。

use bytes::Bytes;
use futures::Stream;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// 上游调用错误
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("connection failed: {0}")]
    Network(String),
    #[error("upstream returned {status}: {body}")]
    Http { status: u16, body: String },
}

/// 上游连接配置
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// OpenAI 兼容 Provider
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct StreamOptions {
    include_usage: bool,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    stream_options: StreamOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a Value>,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(30)) // 连接超时 30 秒
            .timeout(std::time::Duration::from_secs(300)) // 总超时 5 分钟
            .pool_idle_timeout(std::time::Duration::from_secs(90)) // 连接池空闲超时
            .tcp_keepalive(std::time::Duration::from_secs(60)) // TCP keep-alive
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// 配置的模型名
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// 构建 chat/completions 端点 URL
    ///
    /// base_url 带不带 `/v1` 都能接受。
    fn build_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{base}/chat/completions")
        } else {
            format!("{base}/v1/chat/completions")
        }
    }

    /// 发起流式对话请求，返回响应字节流
    pub async fn chat_stream(
        &self,
        prompt: &str,
        response_format: Option<&Value>,
    ) -> Result<impl Stream<Item = Result<Bytes, reqwest::Error>>, ProviderError> {
        let url = self.build_url();
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: true,
            stream_options: StreamOptions {
                include_usage: true,
            },
            response_format,
        };

        tracing::debug!("[OPENAI] 请求上游: {} model={}", url, self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("[OPENAI] 上游返回错误状态 {}: {}", status, body);
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes_stream())
    }
}
