//! 章节标记注册表
//!
//! 以编译期常量表的形式声明每种响应的分段标记：
//! 逻辑段名 → 起始标记 + 终止标记集合。
//!
//! # 设计原则
//!
//! - 标记匹配不区分大小写，表中统一存大写形式
//! - 终止标记集合包含自身闭合标记，正文段还包含后续兄弟段的起始标记
//!   （模型偶尔漏写闭合标记，用下一段的开头兜底）
//! - 注册表不可配置，未知段名属于编程错误而非运行时错误

/// 段落类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// 标题型段落：内容短，整体替换式推送（如主标题、时间线）
    Header,
    /// 正文型段落：长文本，增量追加式推送
    Body,
}

/// 单个段落的标记定义
#[derive(Debug)]
pub struct SectionSpec {
    /// 逻辑段名（同时是下发给前端的字段名）
    pub name: &'static str,
    /// 起始标记
    pub start: &'static str,
    /// 终止标记集合（按优先顺序）
    pub ends: &'static [&'static str],
    /// 段落类型
    pub kind: SectionKind,
    /// 展示用标题（仅正文段需要，用于最终结构化结果）
    pub title: Option<&'static str>,
}

impl SectionSpec {
    /// 判断该段是否为标题型段落
    pub fn is_header(&self) -> bool {
        self.kind == SectionKind::Header
    }
}

/// 段落注册表
#[derive(Debug)]
pub struct SectionRegistry {
    pub specs: &'static [SectionSpec],
}

impl SectionRegistry {
    /// 按段名查找定义
    ///
    /// 未知段名属于编程错误（注册表是编译期固定的），直接 panic。
    pub fn resolve(&self, name: &str) -> &'static SectionSpec {
        self.specs
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("unknown section name: {name}"))
    }

    /// 按段名查找下标
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.name == name)
    }
}

/// 章节导读的 6 个段落
pub static CHAPTER_INTRO: SectionRegistry = SectionRegistry {
    specs: &[
        SectionSpec {
            name: "MainHeading",
            start: "[MAIN_HEADING]",
            ends: &["[/MAIN_HEADING]"],
            kind: SectionKind::Header,
            title: None,
        },
        SectionSpec {
            name: "TimelineInfo",
            start: "[TIMELINE_INFO]",
            ends: &["[/TIMELINE_INFO]"],
            kind: SectionKind::Header,
            title: None,
        },
        SectionSpec {
            name: "CulturalContext",
            start: "[CULTURAL_CONTEXT]",
            ends: &[
                "[/CULTURAL_CONTEXT]",
                "[WHAT_MIGHT_SEEM_STRANGE]",
                "[KEY_INSIGHTS]",
                "[WHY_THIS_MATTERS_TODAY]",
            ],
            kind: SectionKind::Body,
            title: Some("Cultural Context"),
        },
        SectionSpec {
            name: "WhatMightSeemStrange",
            start: "[WHAT_MIGHT_SEEM_STRANGE]",
            ends: &[
                "[/WHAT_MIGHT_SEEM_STRANGE]",
                "[KEY_INSIGHTS]",
                "[WHY_THIS_MATTERS_TODAY]",
            ],
            kind: SectionKind::Body,
            title: Some("What Might Seem Strange"),
        },
        SectionSpec {
            name: "KeyInsights",
            start: "[KEY_INSIGHTS]",
            ends: &["[/KEY_INSIGHTS]", "[WHY_THIS_MATTERS_TODAY]"],
            kind: SectionKind::Body,
            title: Some("Key Insights to Watch For"),
        },
        SectionSpec {
            name: "WhyThisMattersToday",
            start: "[WHY_THIS_MATTERS_TODAY]",
            ends: &["[/WHY_THIS_MATTERS_TODAY]"],
            kind: SectionKind::Body,
            title: Some("Why This Matters Today"),
        },
    ],
};

/// Strong's 原文分析的 8 个段落
///
/// 全部按正文段处理：前端对这些字段统一走增量追加渲染。
pub static STRONGS_ANALYSIS: SectionRegistry = SectionRegistry {
    specs: &[
        SectionSpec {
            name: "WordHeader",
            start: "[WORD_HEADER]",
            ends: &["[/WORD_HEADER]"],
            kind: SectionKind::Body,
            title: None,
        },
        SectionSpec {
            name: "LanguageInfo",
            start: "[LANGUAGE_INFO]",
            ends: &["[/LANGUAGE_INFO]"],
            kind: SectionKind::Body,
            title: None,
        },
        SectionSpec {
            name: "OriginalText",
            start: "[ORIGINAL_TEXT]",
            ends: &["[/ORIGINAL_TEXT]"],
            kind: SectionKind::Body,
            title: None,
        },
        SectionSpec {
            name: "Pronunciation",
            start: "[PRONUNCIATION]",
            ends: &["[/PRONUNCIATION]"],
            kind: SectionKind::Body,
            title: None,
        },
        SectionSpec {
            name: "RootMeanings",
            start: "[ROOT_MEANINGS]",
            ends: &[
                "[/ROOT_MEANINGS]",
                "[CONTEXTUAL_MEANING]",
                "[OTHER_USES]",
                "[CULTURAL_SIGNIFICANCE]",
            ],
            kind: SectionKind::Body,
            title: None,
        },
        SectionSpec {
            name: "ContextualMeaning",
            start: "[CONTEXTUAL_MEANING]",
            ends: &[
                "[/CONTEXTUAL_MEANING]",
                "[OTHER_USES]",
                "[CULTURAL_SIGNIFICANCE]",
            ],
            kind: SectionKind::Body,
            title: None,
        },
        SectionSpec {
            name: "OtherUses",
            start: "[OTHER_USES]",
            ends: &["[/OTHER_USES]", "[CULTURAL_SIGNIFICANCE]"],
            kind: SectionKind::Body,
            title: None,
        },
        SectionSpec {
            name: "CulturalSignificance",
            start: "[CULTURAL_SIGNIFICANCE]",
            ends: &["[/CULTURAL_SIGNIFICANCE]"],
            kind: SectionKind::Body,
            title: None,
        },
    ],
};
