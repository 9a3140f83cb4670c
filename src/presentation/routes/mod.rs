// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::application::use_cases::audit_use_case::AuditUseCase;
use crate::domain::services::history_service::HistoryService;
use crate::presentation::handlers::{audit_handler, history_handler, options_handler};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由；处理器依赖的服务通过 [`Extension`] 注入
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/v1/options", get(options_handler::options));

    let audit_routes = Router::new()
        .route("/v1/audit", post(audit_handler::run_audit))
        .route(
            "/v1/history",
            get(history_handler::list_history).delete(history_handler::clear_history),
        )
        .route("/v1/history/export", get(history_handler::export_history));

    Router::new().merge(public_routes).merge(audit_routes)
}

/// 创建注入了服务和请求追踪的完整应用
pub fn app(audit_use_case: Arc<AuditUseCase>, history_service: Arc<HistoryService>) -> Router {
    routes()
        .layer(Extension(audit_use_case))
        .layer(Extension(history_service))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
