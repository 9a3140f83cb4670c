// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domain::repositories::history_repository::RepositoryError;
use crate::utils::errors::{AuditError, AuditErrorKind};

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 错误对应的状态码和机器可读的错误码
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        if let Some(audit_error) = self.0.downcast_ref::<AuditError>() {
            return match audit_error.kind() {
                AuditErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                AuditErrorKind::CredentialInvalidated => {
                    (StatusCode::UNAUTHORIZED, "CREDENTIAL_INVALIDATED")
                }
                AuditErrorKind::SearchGroundingQuotaExhausted => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "SEARCH_GROUNDING_QUOTA_EXCEEDED",
                ),
                AuditErrorKind::TransientQuota => (StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXHAUSTED"),
                AuditErrorKind::MalformedResponse => (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE"),
                AuditErrorKind::Upstream => (StatusCode::BAD_GATEWAY, "ORACLE_ERROR"),
            };
        }

        match self.0.downcast_ref::<RepositoryError>() {
            Some(_) => (StatusCode::INTERNAL_SERVER_ERROR, "HISTORY_STORAGE_ERROR"),
            None => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let error_message = self.0.to_string();

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, error_message);
        }

        let body = Json(json!({ "error": error_message, "code": code }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
