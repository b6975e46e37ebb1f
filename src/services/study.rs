//! 查经请求引擎
//!
//! 每个请求一条流水线：构建提示词 → 打开上游流 → 逐 token
//! 扫描 / 去重 / 下发 → 流结束后组装、记账并发出终止事件。
//!
//! 所有失败都在流边界收口为一个终止 `error` 事件，流本身不报错、
//! 不 panic。调用方丢弃流即取消：上游连接随之断开。

use crate::providers::{OpenAiProvider, SseChunkParser, SseItem};
use crate::stream::sections::SectionRegistry;
use crate::stream::{
    assemble_chapter_intro, assemble_strongs_analysis, parse_strongs_info, DeltaTracker, Emission,
    MarkerCompat, SectionScanner, StudyEvent, CHAPTER_INTRO, STRONGS_ANALYSIS,
};
use crate::telemetry::{calculate_cost, TokenUsage, UsageLogEntry, UsageSink};
use futures::{Stream, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::prompts;

/// 请求级错误，Display 即下发给客户端的 message
#[derive(Debug, Error)]
pub enum StudyError {
    /// 上游调用失败（连接、HTTP 状态、流中断）
    #[error("API error: {0}")]
    Upstream(String),
    /// 最终结果不符合预期结构
    #[error("Validation error: {0}")]
    Validation(String),
    /// 严格 JSON 模式下的语法错误
    #[error("Parsing error: {0}")]
    Parsing(String),
}

/// 一次查经请求
#[derive(Debug, Clone)]
pub enum StudyRequest {
    /// 章节导读（标记模式）
    ChapterIntro { book: String, chapter: u32 },
    /// 经文词条分析（标记模式）
    StrongsAnalysis {
        book: String,
        chapter: u32,
        verse: u32,
        word: String,
    },
    /// 词条速查（严格 JSON 模式）
    StrongsInfo {
        book: String,
        chapter: u32,
        word: String,
    },
}

impl StudyRequest {
    /// 记账用的操作名
    pub fn function(&self) -> &'static str {
        match self {
            StudyRequest::ChapterIntro { .. } => "chapter_intro",
            StudyRequest::StrongsAnalysis { .. } => "strongs_analysis",
            StudyRequest::StrongsInfo { .. } => "strongs_info",
        }
    }

    /// 日志用的经文引用
    pub fn reference(&self) -> String {
        match self {
            StudyRequest::ChapterIntro { book, chapter } => format!("{book} {chapter}"),
            StudyRequest::StrongsAnalysis {
                book,
                chapter,
                verse,
                word,
            } => format!("{book} {chapter}:{verse} ({word})"),
            StudyRequest::StrongsInfo { book, chapter, word } => {
                format!("{book} {chapter} ({word})")
            }
        }
    }

    fn prompt(&self) -> String {
        match self {
            StudyRequest::ChapterIntro { book, chapter } => {
                prompts::chapter_intro_prompt(book, *chapter)
            }
            StudyRequest::StrongsAnalysis {
                book,
                chapter,
                verse,
                word,
            } => prompts::strongs_analysis_prompt(book, *chapter, *verse, word),
            StudyRequest::StrongsInfo { book, chapter, word } => {
                prompts::strongs_info_prompt(book, *chapter, word)
            }
        }
    }

    /// 标记模式的段落注册表；严格 JSON 模式返回 None
    fn registry(&self) -> Option<&'static SectionRegistry> {
        match self {
            StudyRequest::ChapterIntro { .. } => Some(&CHAPTER_INTRO),
            StudyRequest::StrongsAnalysis { .. } => Some(&STRONGS_ANALYSIS),
            StudyRequest::StrongsInfo { .. } => None,
        }
    }

    fn response_format(&self) -> Option<Value> {
        match self {
            StudyRequest::StrongsInfo { .. } => Some(prompts::strongs_info_schema()),
            _ => None,
        }
    }

    fn log_entry(&self, tokens: TokenUsage) -> UsageLogEntry {
        let cost = calculate_cost(&tokens);
        match self {
            StudyRequest::ChapterIntro { book, chapter } => {
                UsageLogEntry::new(self.function(), book, *chapter, None, None, tokens, cost)
            }
            StudyRequest::StrongsAnalysis {
                book,
                chapter,
                verse,
                word,
            } => UsageLogEntry::new(
                self.function(),
                book,
                *chapter,
                Some(*verse),
                Some(word.clone()),
                tokens,
                cost,
            ),
            StudyRequest::StrongsInfo { book, chapter, word } => UsageLogEntry::new(
                self.function(),
                book,
                *chapter,
                None,
                Some(word.clone()),
                tokens,
                cost,
            ),
        }
    }
}

/// 查经服务
#[derive(Clone)]
pub struct StudyService {
    provider: OpenAiProvider,
    usage_sink: Arc<dyn UsageSink>,
    compat: MarkerCompat,
}

impl StudyService {
    pub fn new(provider: OpenAiProvider, usage_sink: Arc<dyn UsageSink>) -> Self {
        Self {
            provider,
            usage_sink,
            compat: MarkerCompat::Keep,
        }
    }

    /// 覆盖字面方括号的兼容策略
    pub fn with_compat(mut self, compat: MarkerCompat) -> Self {
        self.compat = compat;
        self
    }

    /// 处理一次请求，返回已渲染好的 SSE 帧流
    ///
    /// 恰好以一个终止帧（`complete` 或 `error`）结尾。
    pub fn stream(&self, request: StudyRequest) -> impl Stream<Item = String> + Send + 'static {
        let service = self.clone();
        async_stream::stream! {
            let request_id = uuid::Uuid::new_v4().simple().to_string();
            tracing::info!(
                "[STUDY] {} 开始: {} id={request_id}",
                request.function(),
                request.reference()
            );

            let prompt = request.prompt();
            let response_format = request.response_format();
            let upstream = match service
                .provider
                .chat_stream(&prompt, response_format.as_ref())
                .await
            {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!("[STUDY] 上游请求失败: {e}");
                    yield StudyEvent::Error {
                        message: StudyError::Upstream(e.to_string()).to_string(),
                    }
                    .to_sse();
                    return;
                }
            };
            futures::pin_mut!(upstream);

            let mut parser = SseChunkParser::new();
            let mut scanner = request.registry().map(SectionScanner::new);
            let mut tracker = DeltaTracker::new();
            let mut raw = String::new();
            let mut usage: Option<TokenUsage> = None;

            while let Some(chunk) = upstream.next().await {
                let bytes = match chunk {
                    Ok(b) => b,
                    Err(e) => {
                        tracing::error!("[STUDY] 流中断: {e}");
                        yield StudyEvent::Error {
                            message: StudyError::Upstream(e.to_string()).to_string(),
                        }
                        .to_sse();
                        return;
                    }
                };
                for item in parser.feed(&bytes) {
                    match item {
                        SseItem::Token(text) => {
                            raw.push_str(&text);
                            match scanner.as_mut() {
                                Some(scanner) => {
                                    scanner.push(&text);
                                    for frame in drain_emissions(scanner, &mut tracker) {
                                        yield frame;
                                    }
                                }
                                // 严格 JSON 模式：原始 token 直接透传
                                None => {
                                    yield StudyEvent::ContentChunk { content: text }.to_sse();
                                }
                            }
                        }
                        SseItem::Usage(u) => usage = Some(u),
                        SseItem::Error(message) => {
                            tracing::error!("[STUDY] 上游流内错误: {message}");
                            yield StudyEvent::Error {
                                message: StudyError::Upstream(message).to_string(),
                            }
                            .to_sse();
                            return;
                        }
                        SseItem::Done => {}
                    }
                }
            }

            // 流结束：补发残留增量，组装最终结果
            if let Some(scanner) = scanner.as_mut() {
                scanner.finish();
                for frame in drain_emissions(scanner, &mut tracker) {
                    yield frame;
                }
            }

            let data = match assemble(&request, scanner.as_ref(), &raw, service.compat) {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!("[STUDY] 组装失败: {e}");
                    yield StudyEvent::Error { message: e.to_string() }.to_sse();
                    return;
                }
            };

            // 记账恰好一次，只在成功路径上
            if let Some(tokens) = usage {
                let entry = request.log_entry(tokens);
                match service.usage_sink.record(&entry) {
                    Ok(()) => tracing::info!(
                        "[USAGE] {} tokens={} cost=${:.6}",
                        entry.function,
                        entry.tokens.total_tokens,
                        entry.cost.total_cost_usd
                    ),
                    Err(e) => tracing::error!("[USAGE] 记账失败: {e}"),
                }
            }

            tracing::info!(
                "[STUDY] {} 完成: {} id={request_id}",
                request.function(),
                request.reference()
            );
            yield StudyEvent::Complete { data }.to_sse();
        }
    }
}

/// 把扫描器的最新视图折算成待下发的 SSE 帧
fn drain_emissions(scanner: &SectionScanner, tracker: &mut DeltaTracker) -> Vec<String> {
    let pending_owner = scanner.pending_owner();
    scanner
        .sections()
        .iter()
        .filter_map(|view| {
            let held = pending_owner == Some(view.spec.name);
            tracker.advance(view, held).map(|emission| match emission {
                Emission::Delta { text } => StudyEvent::SectionUpdate {
                    section: view.spec.name.to_string(),
                    content: text,
                    is_complete: view.closed,
                }
                .to_sse(),
                Emission::Full { text } => StudyEvent::HeaderUpdate {
                    section: view.spec.name.to_string(),
                    content: text,
                }
                .to_sse(),
            })
        })
        .collect()
}

fn assemble(
    request: &StudyRequest,
    scanner: Option<&SectionScanner>,
    raw: &str,
    compat: MarkerCompat,
) -> Result<Value, StudyError> {
    let to_value = |v: Result<Value, serde_json::Error>| {
        v.map_err(|e| StudyError::Validation(e.to_string()))
    };
    match (request, scanner) {
        (StudyRequest::ChapterIntro { .. }, Some(scanner)) => {
            to_value(serde_json::to_value(assemble_chapter_intro(scanner, compat)))
        }
        (StudyRequest::StrongsAnalysis { .. }, Some(scanner)) => to_value(serde_json::to_value(
            assemble_strongs_analysis(scanner, compat),
        )),
        (StudyRequest::StrongsInfo { .. }, _) => {
            let info = parse_strongs_info(raw).map_err(|e| {
                if e.is_data() {
                    StudyError::Validation(e.to_string())
                } else {
                    StudyError::Parsing(e.to_string())
                }
            })?;
            to_value(serde_json::to_value(info))
        }
        // registry() 与请求类型一一对应，走不到这里
        _ => Err(StudyError::Validation("missing section scanner".to_string())),
    }
}
