// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json};
use std::sync::Arc;

use crate::{
    application::{dto::audit_request::AuditRequestDto, use_cases::audit_use_case::AuditUseCase},
    domain::models::audit::DualAuditOutcome,
    presentation::errors::AppError,
};

/// 处理排名审计请求
///
/// # 参数
///
/// * `use_case` - 审计用例实例
/// * `payload` - 审计请求数据
///
/// # 错误
///
/// 可能在以下情况下返回错误响应：
/// - 请求参数验证失败
/// - oracle 凭证失效或配额耗尽
/// - oracle 响应无法解析
pub async fn run_audit(
    Extension(use_case): Extension<Arc<AuditUseCase>>,
    Json(payload): Json<AuditRequestDto>,
) -> Result<Json<DualAuditOutcome>, AppError> {
    let outcome = use_case.execute(payload).await?;
    Ok(Json(outcome))
}
