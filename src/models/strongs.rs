//! Strong's 原文分析数据模型
//!
//! 两个变体：
//! - `StrongsAnalysis`：标记解析模式的结果，8 个纯文本字段
//! - `StrongsInfo`：严格 JSON Schema 模式的结果，嵌套结构

use serde::{Deserialize, Serialize};

/// 标记解析模式的原文分析结果
///
/// 缺段用空串表示，不视为错误。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StrongsAnalysis {
    pub word_header: String,
    pub language_info: String,
    pub original_text: String,
    pub pronunciation: String,
    pub root_meanings: String,
    pub contextual_meaning: String,
    pub other_uses: String,
    pub cultural_significance: String,
}

/// 严格 JSON 模式的原文词条信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongsInfo {
    pub word_header: String,
    pub original_language_info: OriginalLanguageInfo,
    pub general_meanings: Vec<GeneralMeaning>,
    pub contextual_meaning: ContextualMeaningDetail,
    pub biblical_usage_examples: Vec<BiblicalUsageExample>,
    pub cultural_significance: String,
}

/// 原文语言元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalLanguageInfo {
    /// Strong's 编号，如 "H7225" / "G26"
    pub strongs_number: String,
    pub original_language: String,
    /// 原文字形（希伯来文 / 希腊文）
    pub original_script: String,
    pub transliteration: String,
    pub pronunciation: String,
    pub pronunciation_guide: String,
}

/// 一条通用词义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralMeaning {
    pub meaning: String,
    pub explanation: String,
    pub usage_context: String,
}

/// 该词在所查经文中的语境释义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualMeaningDetail {
    pub verse_reference: String,
    pub verse_text: String,
    pub word_in_context: String,
    pub contextual_explanation: String,
    pub why_this_translation: String,
    pub deeper_insight: String,
}

/// 该词在其他经文中的用例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiblicalUsageExample {
    pub verse_reference: String,
    pub verse_text: String,
    pub translated_as: String,
    pub meaning_used: String,
    pub significance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strongs_analysis_serializes_pascal_case() {
        let analysis = StrongsAnalysis {
            word_header: "AGAPE (love)".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["WordHeader"], "AGAPE (love)");
        assert_eq!(value["RootMeanings"], "");
    }

    #[test]
    fn test_strongs_info_deserializes_nested_document() {
        let raw = r#"{
            "word_header": "BERESHIT (beginning)",
            "original_language_info": {
                "strongs_number": "H7225",
                "original_language": "Hebrew",
                "original_script": "רֵאשִׁית",
                "transliteration": "reshit",
                "pronunciation": "ray-sheeth",
                "pronunciation_guide": "ray-SHEETH"
            },
            "general_meanings": [
                {"meaning": "beginning", "explanation": "first in time", "usage_context": "temporal"}
            ],
            "contextual_meaning": {
                "verse_reference": "Genesis 1:1",
                "verse_text": "In the beginning...",
                "word_in_context": "beginning",
                "contextual_explanation": "opens the creation account",
                "why_this_translation": "temporal sense fits",
                "deeper_insight": "firstfruits imagery"
            },
            "biblical_usage_examples": [],
            "cultural_significance": "Carries firstfruits connotations."
        }"#;
        let info: StrongsInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.original_language_info.strongs_number, "H7225");
        assert_eq!(info.general_meanings.len(), 1);
    }

    #[test]
    fn test_strongs_info_missing_field_is_data_error() {
        let raw = r#"{"word_header": "X"}"#;
        let err = serde_json::from_str::<StrongsInfo>(raw).unwrap_err();
        assert!(err.is_data());
    }
}
