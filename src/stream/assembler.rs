//! 最终结果组装
//!
//! 流结束后把扫描器的段落视图折叠成结构化结果。组装是纯函数：
//! 同一份段落视图反复组装得到同一个结果。
//!
//! 严格 JSON 模式不走扫描器，累积的原始文本整体按 JSON 解析。

use super::scanner::SectionScanner;
use super::sections::CHAPTER_INTRO;
use crate::models::{ChapterIntro, ChapterParagraph, StrongsAnalysis, StrongsInfo};

/// 字面方括号内容的兼容策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerCompat {
    /// 保留字面方括号内容（默认）
    #[default]
    Keep,
    /// 丢弃最终内容仍含方括号的段落（旧版兼容行为）
    DropBracketed,
}

fn section_content(scanner: &SectionScanner, name: &str, compat: MarkerCompat) -> String {
    let content = scanner
        .section(name)
        .map(|v| v.content.to_string())
        .unwrap_or_default();
    match compat {
        MarkerCompat::Keep => content,
        MarkerCompat::DropBracketed => {
            if content.contains('[') || content.contains(']') {
                String::new()
            } else {
                content
            }
        }
    }
}

/// 组装章节导读
///
/// 标题段可为空；正文段按注册表顺序收集，空段跳过。
pub fn assemble_chapter_intro(scanner: &SectionScanner, compat: MarkerCompat) -> ChapterIntro {
    let paras = CHAPTER_INTRO
        .specs
        .iter()
        .filter(|spec| !spec.is_header())
        .filter_map(|spec| {
            let content = section_content(scanner, spec.name, compat);
            if content.is_empty() {
                return None;
            }
            Some(ChapterParagraph {
                title: spec.title.unwrap_or(spec.name).to_string(),
                content,
            })
        })
        .collect();

    ChapterIntro {
        main_heading: section_content(scanner, "MainHeading", compat),
        timeline_info: section_content(scanner, "TimelineInfo", compat),
        paras,
    }
}

/// 组装 Strong's 原文分析（标记模式）
///
/// 8 个字段全部保留，缺段为空串。
pub fn assemble_strongs_analysis(scanner: &SectionScanner, compat: MarkerCompat) -> StrongsAnalysis {
    let field = |name: &str| section_content(scanner, name, compat);
    StrongsAnalysis {
        word_header: field("WordHeader"),
        language_info: field("LanguageInfo"),
        original_text: field("OriginalText"),
        pronunciation: field("Pronunciation"),
        root_meanings: field("RootMeanings"),
        contextual_meaning: field("ContextualMeaning"),
        other_uses: field("OtherUses"),
        cultural_significance: field("CulturalSignificance"),
    }
}

/// 严格 JSON 模式：整体解析累积文本
///
/// 语法错误与结构错误由调用方经 `serde_json::Error::classify()` 区分。
pub fn parse_strongs_info(raw: &str) -> Result<StrongsInfo, serde_json::Error> {
    serde_json::from_str(raw.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::sections::STRONGS_ANALYSIS as STRONGS_REGISTRY;

    fn chapter_scanner(text: &str) -> SectionScanner {
        let mut s = SectionScanner::new(&CHAPTER_INTRO);
        s.push(text);
        s.finish();
        s
    }

    #[test]
    fn test_assemble_chapter_intro_full() {
        let s = chapter_scanner(
            "[MAIN_HEADING]God Creates[/MAIN_HEADING]\
             [TIMELINE_INFO]c. 1400 BC[/TIMELINE_INFO]\
             [CULTURAL_CONTEXT]Ancient context.[/CULTURAL_CONTEXT]\
             [KEY_INSIGHTS]Watch the refrain.[/KEY_INSIGHTS]",
        );
        let intro = assemble_chapter_intro(&s, MarkerCompat::Keep);
        assert_eq!(intro.main_heading, "God Creates");
        assert_eq!(intro.timeline_info, "c. 1400 BC");
        assert_eq!(
            intro
                .paras
                .iter()
                .map(|p| p.title.as_str())
                .collect::<Vec<_>>(),
            vec!["Cultural Context", "Key Insights to Watch For"]
        );
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let s = chapter_scanner("[MAIN_HEADING]T[/MAIN_HEADING][KEY_INSIGHTS]K[/KEY_INSIGHTS]");
        let first = assemble_chapter_intro(&s, MarkerCompat::Keep);
        let second = assemble_chapter_intro(&s, MarkerCompat::Keep);
        assert_eq!(first, second);
    }

    #[test]
    fn test_absent_sections_tolerated() {
        let s = chapter_scanner("[CULTURAL_CONTEXT]Only this.[/CULTURAL_CONTEXT]");
        let intro = assemble_chapter_intro(&s, MarkerCompat::Keep);
        assert_eq!(intro.main_heading, "");
        assert_eq!(intro.timeline_info, "");
        assert_eq!(intro.paras.len(), 1);
    }

    #[test]
    fn test_drop_bracketed_compat_mode() {
        let s = chapter_scanner(
            "[CULTURAL_CONTEXT]see [Genesis 12] here[/CULTURAL_CONTEXT]\
             [KEY_INSIGHTS]clean text[/KEY_INSIGHTS]",
        );
        let kept = assemble_chapter_intro(&s, MarkerCompat::Keep);
        assert_eq!(kept.paras.len(), 2);
        assert_eq!(kept.paras[0].content, "see [Genesis 12] here");

        let dropped = assemble_chapter_intro(&s, MarkerCompat::DropBracketed);
        assert_eq!(dropped.paras.len(), 1);
        assert_eq!(dropped.paras[0].content, "clean text");
    }

    #[test]
    fn test_assemble_strongs_analysis_defaults_absent_to_empty() {
        let mut s = SectionScanner::new(&STRONGS_REGISTRY);
        s.push("[WORD_HEADER]AGAPE (love)[/WORD_HEADER][ROOT_MEANINGS]1. LOVE[/ROOT_MEANINGS]");
        s.finish();
        let analysis = assemble_strongs_analysis(&s, MarkerCompat::Keep);
        assert_eq!(analysis.word_header, "AGAPE (love)");
        assert_eq!(analysis.root_meanings, "1. LOVE");
        assert_eq!(analysis.language_info, "");
        assert_eq!(analysis.cultural_significance, "");
    }

    #[test]
    fn test_parse_strongs_info_error_classes() {
        let syntax = parse_strongs_info("{not json").unwrap_err();
        assert!(syntax.is_syntax() || syntax.is_eof());

        let data = parse_strongs_info("{\"word_header\": \"X\"}").unwrap_err();
        assert!(data.is_data());
    }
}
