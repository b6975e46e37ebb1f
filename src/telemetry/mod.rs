//! 用量与成本追踪
//!
//! 每个完成的请求记一条台账：token 用量 + 按固定单价折算的成本。
//! 台账通过 `UsageSink` 抽象落盘，错误路径不记账。

mod types;

pub use types::{
    calculate_cost, CostData, TokenUsage, UsageLogEntry, INPUT_PRICE_PER_MILLION,
    OUTPUT_PRICE_PER_MILLION,
};

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;


/// 用量台账（追加写）
pub trait UsageSink: Send + Sync {
    /// 追加一条记录
    fn record(&self, entry: &UsageLogEntry) -> std::io::Result<()>;
}

/// 文件台账：每条记录写一段 pretty JSON 加一行分隔线
#[derive(Debug, Clone)]
pub struct FileUsageSink {
    path: PathBuf,
}

impl FileUsageSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UsageSink for FileUsageSink {
    fn record(&self, entry: &UsageLogEntry) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{json}")?;
        writeln!(file, "{}", "-".repeat(50))?;
        Ok(())
    }
}

/// 丢弃台账（测试与禁用场景）
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUsageSink;

impl UsageSink for NullUsageSink {
    fn record(&self, _entry: &UsageLogEntry) -> std::io::Result<()> {
        Ok(())
    }
}
