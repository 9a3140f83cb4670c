// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::models::audit::ModelError;
use crate::domain::oracle::search_oracle::OracleError;
use crate::utils::retry_policy::{classify, ErrorClass};

/// 审计错误类型
///
/// 除了单条结果缺字段（直接丢弃，不上报）之外，所有错误都会让整次审计失败。
#[derive(Error, Debug, Clone)]
pub enum AuditError {
    #[error("Search grounding quota reached for this API key.")]
    SearchGroundingQuotaExhausted,

    #[error("Oracle credential is no longer valid: {0}")]
    CredentialInvalidated(String),

    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),

    #[error("Oracle error: {0}")]
    Oracle(OracleError),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// 错误分类，供表示层选择状态码和提示文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditErrorKind {
    TransientQuota,
    SearchGroundingQuotaExhausted,
    CredentialInvalidated,
    MalformedResponse,
    Validation,
    Upstream,
}

impl AuditError {
    pub fn kind(&self) -> AuditErrorKind {
        match self {
            AuditError::SearchGroundingQuotaExhausted => {
                AuditErrorKind::SearchGroundingQuotaExhausted
            }
            AuditError::CredentialInvalidated(_) => AuditErrorKind::CredentialInvalidated,
            AuditError::MalformedResponse(_) => AuditErrorKind::MalformedResponse,
            AuditError::Validation(_) => AuditErrorKind::Validation,
            AuditError::Oracle(e) => match classify(&e.to_string()) {
                ErrorClass::Retryable => AuditErrorKind::TransientQuota,
                ErrorClass::NonRetryableQuota => AuditErrorKind::SearchGroundingQuotaExhausted,
                ErrorClass::Fatal => AuditErrorKind::Upstream,
            },
        }
    }

    /// 该错误在重试状态机中的分类
    ///
    /// 只有 oracle 传输层错误按消息内容分类，其余类型固定为致命错误。
    pub fn class(&self) -> ErrorClass {
        match self {
            AuditError::Oracle(e) => classify(&e.to_string()),
            AuditError::SearchGroundingQuotaExhausted => ErrorClass::NonRetryableQuota,
            _ => ErrorClass::Fatal,
        }
    }
}

impl From<OracleError> for AuditError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::CredentialInvalidated(msg) => AuditError::CredentialInvalidated(msg),
            other => AuditError::Oracle(other),
        }
    }
}

impl From<ModelError> for AuditError {
    fn from(err: ModelError) -> Self {
        AuditError::Validation(err.to_string())
    }
}
