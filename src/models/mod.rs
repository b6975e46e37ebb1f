//! 数据模型
//!
//! - `bible`: 章节导读结构
//! - `strongs`: Strong's 原文分析结构（标记模式 + 严格 JSON 模式）

pub mod bible;
pub mod strongs;

pub use bible::{ChapterIntro, ChapterParagraph};
pub use strongs::{
    BiblicalUsageExample, ContextualMeaningDetail, GeneralMeaning, OriginalLanguageInfo,
    StrongsAnalysis, StrongsInfo,
};
