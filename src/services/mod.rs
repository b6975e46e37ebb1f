//! 服务层
//!
//! - `prompts`: 三个操作的提示词模板与严格 JSON Schema
//! - `study`: 请求引擎（上游流 → 解析 → 下发 → 记账）

pub mod prompts;
pub mod study;

pub use study::{StudyError, StudyRequest, StudyService};
