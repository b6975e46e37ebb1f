//! 流式解析层
//!
//! 把上游模型的自由文本流重组为结构化的下发事件：
//!
//! ```text
//! 上游 token 流 ──> [SectionScanner] ──> 段落视图 ──> [DeltaTracker] ──> StudyEvent ──> SSE
//!                                                        流结束 ──> [assembler] ──> complete
//! ```
//!
//! # 模块结构
//!
//! - `sections`: 段落标记注册表（章节导读 / 原文分析）
//! - `scanner`: 增量分段扫描器（状态机 + 待定标记缓冲）
//! - `tracker`: 增量去重跟踪器（正文后缀 / 标题整值恰好一次）
//! - `assembler`: 最终结果组装（纯函数）+ 严格 JSON 解析
//! - `events`: 下发事件类型与 SSE 渲染

pub mod assembler;
pub mod events;
pub mod scanner;
pub mod sections;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use assembler::{
    assemble_chapter_intro, assemble_strongs_analysis, parse_strongs_info, MarkerCompat,
};
pub use events::StudyEvent;
pub use scanner::{SectionScanner, SectionView};
pub use sections::{SectionKind, SectionRegistry, SectionSpec, CHAPTER_INTRO, STRONGS_ANALYSIS};
pub use tracker::{DeltaTracker, Emission};
