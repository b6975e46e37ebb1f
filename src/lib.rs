//! versecast - 查经流式后端
//!
//! 把章节导读与 Strong's 词条分析请求转发给 OpenAI 兼容接口，
//! 一边流式转发模型输出，一边把自由文本增量重组成固定结构。
//!
//! # 分层
//!
//! - `stream`: 核心解析层（标记扫描 / 增量去重 / 结果组装）
//! - `providers`: 上游客户端与 SSE 分片解析
//! - `services`: 请求引擎与提示词
//! - `telemetry`: 用量与成本台账
//! - `server`: axum 路由与流式响应
//! - `models` / `config`: 数据结构与启动配置

pub mod config;
pub mod models;
pub mod providers;
pub mod server;
pub mod services;
pub mod stream;
pub mod telemetry;

pub use config::AppConfig;
pub use services::{StudyError, StudyRequest, StudyService};
