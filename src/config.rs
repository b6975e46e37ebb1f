//! 启动配置
//!
//! 进程启动时从环境变量读取一次（支持 `.env` 文件），
//! 之后配置不可变。只有 `OPENAI_API_KEY` 是必填项。

use anyhow::{bail, Result};
use std::path::PathBuf;

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 上游 API Key（必填）
    pub openai_api_key: String,
    /// 上游 base URL，带不带 `/v1` 均可
    pub openai_base_url: String,
    /// 使用的模型
    pub model: String,
    /// HTTP 监听地址
    pub listen_addr: String,
    /// 用量台账文件路径
    pub token_usage_log: PathBuf,
}

impl AppConfig {
    /// 从环境变量加载
    pub fn from_env() -> Result<Self> {
        // .env 不存在不算错误
        let _ = dotenvy::dotenv();

        let openai_api_key = match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => bail!("OPENAI_API_KEY is not set"),
        };

        Ok(Self {
            openai_api_key,
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            model: env_or("VERSECAST_MODEL", "gpt-4.1-2025-04-14"),
            listen_addr: env_or("VERSECAST_ADDR", "127.0.0.1:8000"),
            token_usage_log: PathBuf::from(env_or("TOKEN_USAGE_LOG", "token_usage_log.txt")),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
