//! 提示词模板
//!
//! 三个操作各一个模板：章节导读与经文词条分析要求模型按
//! `[MARKER]` 分段输出，词条速查（严格 JSON 模式）配合
//! `response_format: json_schema` 返回单个 JSON 文档。

use serde_json::{json, Value};

/// 章节导读提示词
pub fn chapter_intro_prompt(book: &str, chapter: u32) -> String {
    format!(
        r#"
You are a faithful Bible teacher who loves helping people understand God’s Word. Your goal is to help someone explore the rich meaning of **{book} {chapter}** in a simple, clear, and respectful way. Use warm, loving language like a kind pastor or guide. Focus on helping the reader feel the setting, understand what’s happening, and discover what God is showing through this chapter.

Please follow the exact format below, keeping all the section markers.

Use **simple English** that anyone can understand.

Your writing should also include:
- **Setting** – Where are we? What does it feel like to be there?
- **Foreshadowing** – Does anything hint at what’s coming later in the Bible?
- **Mood & Atmosphere** – What’s the emotional tone? Tense? Joyful? Heavy?
- **Sensory Details** – What might people have seen, smelled, heard, touched, or tasted? Help the reader imagine the world of the Bible.

In the section on difficult verses, gently explain what’s hard to understand but always show how God is good and His Word is trustworthy.

In the timeline section, only give the **date range** like "c. 1440–1400 BCE" — no extra explanation.

---

Format to follow:

[MAIN_HEADING]
A short, inviting title (6–10 words) that captures the heart of the chapter. If the chapter has hard parts, use a heading that helps the reader stay hopeful and curious, like "God's Love in Tough Commands" or "Finding Grace in Ancient Laws."
[/MAIN_HEADING]

[TIMELINE_INFO]
Just the historical date range (like: "c. 1440–1400 BCE")
[/TIMELINE_INFO]

[CULTURAL_CONTEXT]
Describe the world and culture of that time. What were people’s lives like? What kind of society did they live in? How does this help us understand what’s happening in the chapter? Share sights, sounds, and other sensory details that bring it to life. Help us see how God was working in that time and place.

[/CULTURAL_CONTEXT]

[WHAT_MIGHT_SEEM_STRANGE]
Talk about anything that feels odd, harsh, or confusing to today’s readers. This might include ancient customs, laws, or violence. Gently explain why those parts are there, how they made sense in that time, and what they show us about God's patience, justice, or love. Show that even hard verses have a purpose in God’s bigger story.

[/WHAT_MIGHT_SEEM_STRANGE]

[KEY_INSIGHTS]
Point out 2–3 big spiritual truths or lessons that stand out in the chapter. What does this show us about God’s heart, His plan, or how He helps people? Include anything that points ahead to Jesus or the New Testament. Make the reader feel excited to know God more.

[/KEY_INSIGHTS]

[WHY_THIS_MATTERS_TODAY]
Connect this chapter to our lives now. How does it help us trust God more, love others better, or live faithfully? Give one or two takeaways that help believers walk with God today. End with an invitation to reflect or pray.

[/WHY_THIS_MATTERS_TODAY]
"#
    )
}

/// 经文词条分析提示词（标记模式）
pub fn strongs_analysis_prompt(book: &str, chapter: u32, verse: u32, word: &str) -> String {
    format!(
        r#"
You are a biblical scholar and linguist providing comprehensive analysis of the word "{word}" as it appears in {book} {chapter}:{verse}.

First, identify the correct Strong's number for the word "{word}" in this specific verse context. Then provide thorough, academic yet accessible insights into this biblical word and its Strong's number.

Please structure your response EXACTLY as follows, with clear section markers:

[WORD_HEADER]
The English word this Strong's number represents in the given verse, followed by a pipe separator, then the Strong's number (e.g., "love|G25"). Only include the primary English word used in this specific verse.
[/WORD_HEADER]

[LANGUAGE_INFO]
The original language (Hebrew, Greek, Aramaic) this word comes from.
[/LANGUAGE_INFO]

[ORIGINAL_TEXT]
The original language text/spelling of this word exactly as it appears in ancient manuscripts.
[/ORIGINAL_TEXT]

[PRONUNCIATION]
The phonetic pronunciation guide for this word (e.g., "ah-gap-ah'-o").
[/PRONUNCIATION]

[ROOT_MEANINGS]
Provide a comprehensive list of ALL the synonyms and root meanings for this Strong's number, formatted as a pipe-separated list. Include 8-12 different synonyms/meanings that capture the full semantic range of this word. For example: "love|affection|devotion|care|cherish|treasure|esteem|value|adore|embrace|favor|compassion". Focus on providing distinct but related meanings that show the word's richness.
[/ROOT_MEANINGS]

[CONTEXTUAL_MEANING]
For this specific verse ({book} {chapter}:{verse}), provide:

**Best-fit meaning:** [Select the most appropriate synonym from your Root Meanings list above]

**Full verse text:** [Provide the complete verse text from {book} {chapter}:{verse} with the word "{word}" written in ALL CAPITALS for highlighting]

**Rewritten verse:** [Provide the same complete verse text, but replace the word "{word}" with your selected best-fit meaning in parentheses, like "LOVED (cherished)"]

**Context commentary:** [In 2-3 sentences, explain why this particular meaning fits best in this specific context and what it reveals about the passage's meaning]
[/CONTEXTUAL_MEANING]

[OTHER_USES]
Provide 6-8 other significant biblical verses where this exact Strong's number appears. For each, format as:

**Reference:** [Book Chapter:Verse]
**Full Verse:** [Complete verse text with the translated word in CAPITALS]
**Sense Used:** [Brief explanation of how the word functions in this context]
**Best Synonym:** [Which synonym from the Root Meanings list fits best here]

Example format:
**Reference:** John 3:16
**Full Verse:** For God so LOVED the world that he gave his one and only Son, that whoever believes in him shall not perish but have eternal life.
**Sense Used:** Describes God's deep, sacrificial affection for humanity
**Best Synonym:** cherish

Ensure each example shows a different nuance or usage of the word across Scripture.
[/OTHER_USES]

[CULTURAL_SIGNIFICANCE]
Explain the cultural, historical, and theological significance of this word in biblical times and its importance for understanding Scripture. Discuss how ancient audiences would have understood this word, any cultural nuances, and why it matters for biblical interpretation today. This should be 3-4 sentences providing rich cultural context.
[/CULTURAL_SIGNIFICANCE]

Word to analyze: "{word}"
Reference: {book} {chapter}:{verse}

Provide scholarly analysis that helps readers understand both the linguistic precision and spiritual depth of God's Word through careful word study.
"#
    )
}

/// 词条速查提示词（严格 JSON 模式）
pub fn strongs_info_prompt(book: &str, chapter: u32, word: &str) -> String {
    format!(
        r#"
You are a biblical scholar and linguist. Identify the Strong's number for the word "{word}" as it is used in {book} {chapter}, then compile a thorough word study for that entry.

Return a single JSON document matching the provided schema:

- word_header: the English word followed by a pipe and the Strong's number (e.g., "love|G25").
- original_language_info: the Strong's number, source language, original script, transliteration, pronunciation, and a simple pronunciation guide.
- general_meanings: 3-5 distinct senses of the word, each with a short explanation and the kind of context it appears in.
- contextual_meaning: how the word functions in {book} {chapter} specifically, with the verse text, the chosen rendering, why that translation fits, and one deeper insight.
- biblical_usage_examples: 4-6 other verses using this exact Strong's number, each with the verse text, how it is translated there, which sense is in play, and why it matters.
- cultural_significance: 3-4 sentences on how ancient audiences would have heard this word and why it matters for interpretation today.

Be scholarly but accessible, and keep every field filled in.

Word to analyze: "{word}"
Reference: {book} {chapter}
"#
    )
}

/// 词条速查的严格 JSON Schema
pub fn strongs_info_schema() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "strongs_word_info",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "word_header": { "type": "string" },
                    "original_language_info": {
                        "type": "object",
                        "properties": {
                            "strongs_number": { "type": "string" },
                            "original_language": { "type": "string" },
                            "original_script": { "type": "string" },
                            "transliteration": { "type": "string" },
                            "pronunciation": { "type": "string" },
                            "pronunciation_guide": { "type": "string" }
                        },
                        "required": [
                            "strongs_number", "original_language", "original_script",
                            "transliteration", "pronunciation", "pronunciation_guide"
                        ],
                        "additionalProperties": false
                    },
                    "general_meanings": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "meaning": { "type": "string" },
                                "explanation": { "type": "string" },
                                "usage_context": { "type": "string" }
                            },
                            "required": ["meaning", "explanation", "usage_context"],
                            "additionalProperties": false
                        }
                    },
                    "contextual_meaning": {
                        "type": "object",
                        "properties": {
                            "verse_reference": { "type": "string" },
                            "verse_text": { "type": "string" },
                            "word_in_context": { "type": "string" },
                            "contextual_explanation": { "type": "string" },
                            "why_this_translation": { "type": "string" },
                            "deeper_insight": { "type": "string" }
                        },
                        "required": [
                            "verse_reference", "verse_text", "word_in_context",
                            "contextual_explanation", "why_this_translation", "deeper_insight"
                        ],
                        "additionalProperties": false
                    },
                    "biblical_usage_examples": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "verse_reference": { "type": "string" },
                                "verse_text": { "type": "string" },
                                "translated_as": { "type": "string" },
                                "meaning_used": { "type": "string" },
                                "significance": { "type": "string" }
                            },
                            "required": [
                                "verse_reference", "verse_text", "translated_as",
                                "meaning_used", "significance"
                            ],
                            "additionalProperties": false
                        }
                    },
                    "cultural_significance": { "type": "string" }
                },
                "required": [
                    "word_header", "original_language_info", "general_meanings",
                    "contextual_meaning", "biblical_usage_examples", "cultural_significance"
                ],
                "additionalProperties": false
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::sections::{CHAPTER_INTRO, STRONGS_ANALYSIS};

    #[test]
    fn test_chapter_prompt_interpolates_reference() {
        let prompt = chapter_intro_prompt("Genesis", 1);
        assert!(prompt.contains("**Genesis 1**"));
        for spec in CHAPTER_INTRO.specs {
            assert!(prompt.contains(spec.start), "prompt missing {}", spec.start);
        }
    }

    #[test]
    fn test_strongs_prompt_interpolates_word_and_reference() {
        let prompt = strongs_analysis_prompt("John", 3, 16, "loved");
        assert!(prompt.contains("the word \"loved\" as it appears in John 3:16"));
        for spec in STRONGS_ANALYSIS.specs {
            assert!(prompt.contains(spec.start), "prompt missing {}", spec.start);
        }
    }

    #[test]
    fn test_strongs_info_schema_is_strict() {
        let schema = strongs_info_schema();
        assert_eq!(schema["type"], "json_schema");
        assert_eq!(schema["json_schema"]["strict"], true);
        assert_eq!(
            schema["json_schema"]["schema"]["additionalProperties"],
            false
        );

        let info_prompt = strongs_info_prompt("John", 3, "loved");
        assert!(info_prompt.contains("\"loved\""));
        assert!(info_prompt.contains("John 3"));
    }
}
