//! 章节导读数据模型

use serde::{Deserialize, Serialize};

/// 章节导读的一个正文段落
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterParagraph {
    /// 展示标题（固定文案，见标记注册表）
    pub title: String,
    /// 段落正文
    pub content: String,
}

/// 章节导读的最终结构化结果
///
/// 字段名按 PascalCase 序列化，与流式事件里的段名一致，
/// 客户端可以用同一套键做增量渲染和最终替换。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChapterIntro {
    /// 主标题（可为空，缺段不致命）
    pub main_heading: String,
    /// 时间线信息（可为空）
    pub timeline_info: String,
    /// 正文段落，固定顺序，空段跳过
    pub paras: Vec<ChapterParagraph>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_intro_serializes_pascal_case() {
        let intro = ChapterIntro {
            main_heading: "God Creates".to_string(),
            timeline_info: "c. 1400 BC".to_string(),
            paras: vec![ChapterParagraph {
                title: "Cultural Context".to_string(),
                content: "In the ancient world".to_string(),
            }],
        };
        let value = serde_json::to_value(&intro).unwrap();
        assert_eq!(value["MainHeading"], "God Creates");
        assert_eq!(value["TimelineInfo"], "c. 1400 BC");
        assert_eq!(value["Paras"][0]["title"], "Cultural Context");
    }
}
