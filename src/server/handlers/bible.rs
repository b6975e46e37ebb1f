//! 查经流式接口
//!
//! 每个接口都返回 `data: <json>\n\n` 帧的流式响应。
//! 客户端断开连接即丢弃响应流，上游请求随之取消。

use crate::server::AppState;
use crate::services::StudyRequest;
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::{Stream, StreamExt};
use std::convert::Infallible;

/// GET /api/v1/chapter-info/{book}/{chapter}
pub async fn chapter_info(
    State(state): State<AppState>,
    Path((book, chapter)): Path<(String, u32)>,
) -> Response {
    stream_response(state.service.stream(StudyRequest::ChapterIntro { book, chapter }))
}

/// GET /api/v1/strongs-analysis/{book}/{chapter}/{verse}/{word}
pub async fn strongs_analysis(
    State(state): State<AppState>,
    Path((book, chapter, verse, word)): Path<(String, u32, u32, String)>,
) -> Response {
    stream_response(state.service.stream(StudyRequest::StrongsAnalysis {
        book,
        chapter,
        verse,
        word,
    }))
}

/// GET /api/v1/strongs-info/{book}/{chapter}/{word}
pub async fn strongs_info(
    State(state): State<AppState>,
    Path((book, chapter, word)): Path<(String, u32, String)>,
) -> Response {
    stream_response(state.service.stream(StudyRequest::StrongsInfo {
        book,
        chapter,
        word,
    }))
}

fn stream_response(frames: impl Stream<Item = String> + Send + 'static) -> Response {
    let body_stream = frames.map(|frame| Ok::<_, Infallible>(Bytes::from(frame)));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .header("X-Accel-Buffering", "no")
        .body(Body::from_stream(body_stream))
        .unwrap_or_else(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": {"message": "Failed to build stream response"}})),
            )
                .into_response()
        })
}
