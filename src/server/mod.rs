//! HTTP 服务
//!
//! 路由布局：
//!
//! ```text
//! GET /                                                  服务横幅
//! GET /health                                            健康检查
//! GET /api/v1/chapter-info/{book}/{chapter}              章节导读（流式）
//! GET /api/v1/strongs-analysis/{book}/{chapter}/{verse}/{word}  词条分析（流式）
//! GET /api/v1/strongs-info/{book}/{chapter}/{word}       词条速查（流式）
//! ```

pub mod handlers;

use crate::services::StudyService;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// 共享应用状态
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StudyService>,
}

/// 组装路由
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/chapter-info/:book/:chapter", get(handlers::bible::chapter_info))
        .route(
            "/strongs-analysis/:book/:chapter/:verse/:word",
            get(handlers::bible::strongs_analysis),
        )
        .route(
            "/strongs-info/:book/:chapter/:word",
            get(handlers::bible::strongs_info),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Bible Study API is running"
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "versecast"
    }))
}
