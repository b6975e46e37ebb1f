//! 用量与成本类型定义

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 每百万输入 token 的价格（美元）
pub const INPUT_PRICE_PER_MILLION: f64 = 0.15;
/// 每百万输出 token 的价格（美元）
pub const OUTPUT_PRICE_PER_MILLION: f64 = 0.60;

/// 一次请求消耗的 token 数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// 从上游 usage 对象的字段命名构造
    pub fn from_openai(prompt_tokens: u32, completion_tokens: u32, total_tokens: u32) -> Self {
        Self {
            input_tokens: prompt_tokens,
            output_tokens: completion_tokens,
            total_tokens,
        }
    }
}

/// 一次请求的成本拆分（美元，6 位小数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostData {
    pub input_cost_usd: f64,
    pub output_cost_usd: f64,
    pub total_cost_usd: f64,
}

/// 按固定单价折算成本
pub fn calculate_cost(usage: &TokenUsage) -> CostData {
    let round6 = |x: f64| (x * 1_000_000.0).round() / 1_000_000.0;
    let input = round6(usage.input_tokens as f64 / 1_000_000.0 * INPUT_PRICE_PER_MILLION);
    let output = round6(usage.output_tokens as f64 / 1_000_000.0 * OUTPUT_PRICE_PER_MILLION);
    CostData {
        input_cost_usd: input,
        output_cost_usd: output,
        total_cost_usd: round6(input + output),
    }
}

/// 用量台账的一条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLogEntry {
    /// ISO-8601 UTC 时间戳
    pub timestamp: String,
    /// 产生用量的操作名（如 "chapter_intro"）
    pub function: String,
    pub book: String,
    pub chapter: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    pub tokens: TokenUsage,
    pub cost: CostData,
}

impl UsageLogEntry {
    pub fn new(
        function: impl Into<String>,
        book: impl Into<String>,
        chapter: u32,
        verse: Option<u32>,
        word: Option<String>,
        tokens: TokenUsage,
        cost: CostData,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            function: function.into(),
            book: book.into(),
            chapter,
            verse,
            word,
            tokens,
            cost,
        }
    }
}
