// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::{header, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    domain::{
        models::history::HistoryRecord,
        services::history_service::{export_csv, export_file_name, HistoryService},
    },
    presentation::errors::AppError,
};

/// 列出审计历史（最新在前）
pub async fn list_history(
    Extension(history): Extension<Arc<HistoryService>>,
) -> Result<Json<Vec<HistoryRecord>>, AppError> {
    Ok(Json(history.list().await?))
}

/// 清空审计历史
pub async fn clear_history(
    Extension(history): Extension<Arc<HistoryService>>,
) -> Result<StatusCode, AppError> {
    history.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 以 CSV 附件形式导出审计历史
pub async fn export_history(
    Extension(history): Extension<Arc<HistoryService>>,
) -> Result<impl IntoResponse, AppError> {
    let records = history.list().await?;
    let file_name = export_file_name(Utc::now().date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        export_csv(&records),
    ))
}
