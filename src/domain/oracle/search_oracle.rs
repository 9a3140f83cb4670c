// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum OracleError {
    #[error("Oracle API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Requested entity was not found: {0}")]
    CredentialInvalidated(String),
    #[error("Oracle API key not configured")]
    MissingCredential,
}

/// Oracle 的原始响应
///
/// `text` 是唯一带结构约定的载荷；`grounding` 是未经校验的落地元数据，
/// 由响应解析器负责提取引用。
#[derive(Debug, Clone, Default)]
pub struct OracleResponse {
    pub text: Option<String>,
    pub grounding: Option<Value>,
}

impl OracleResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            grounding: None,
        }
    }
}

#[async_trait]
pub trait SearchOracle: Send + Sync {
    /// 以 JSON 输出模式 + 网页搜索工具发送一次生成请求
    async fn generate(&self, prompt: &str) -> Result<OracleResponse, OracleError>;

    /// Oracle 名称，用于日志和指标
    fn name(&self) -> &'static str;
}
