// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::settings::GeminiSettings;
use crate::domain::oracle::search_oracle::{OracleError, OracleResponse, SearchOracle};

/// 凭证失效时 API 返回的固定文案
const ENTITY_NOT_FOUND: &str = "requested entity was not found";

/// Gemini 搜索落地 oracle
///
/// # 配置
///
/// API 密钥优先取配置项 `gemini.api_key`，其次依次读取环境变量：
/// - `GEMINI_API_KEY`
/// - `API_KEY`
pub struct GeminiOracle {
    api_key: Option<String>,
    model: String,
    api_base_url: String,
    client: reqwest::Client,
}

impl GeminiOracle {
    pub fn new(settings: &GeminiSettings) -> Self {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env::var("GEMINI_API_KEY").ok())
            .or_else(|| env::var("API_KEY").ok());

        Self::new_with_config(
            api_key,
            settings.model.clone(),
            settings.api_base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn new_with_config(
        api_key: Option<String>,
        model: String,
        api_base_url: String,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key,
            model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ],
            "tools": [ { "google_search": {} } ],
            "generationConfig": { "responseMimeType": "application/json" }
        })
    }
}

#[async_trait]
impl SearchOracle for GeminiOracle {
    async fn generate(&self, prompt: &str) -> Result<OracleResponse, OracleError> {
        let api_key = self.api_key.as_ref().ok_or(OracleError::MissingCredential)?;

        let url = format!("{}/models/{}:generateContent", self.api_base_url, self.model);
        debug!("Calling oracle model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|e| OracleError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = api_error(status.as_u16(), &body);
            error!("Oracle API returned error: {}", err);
            return Err(err);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OracleError::Network(format!("Failed to read oracle response: {}", e)))?;

        Ok(extract_response(&body))
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// 把非 2xx 响应转换为 [`OracleError`]
///
/// 消息形如 `RESOURCE_EXHAUSTED: Quota exceeded ...`，保留状态名以便重试分类。
/// 只有 "Requested entity was not found" 文案表示凭证失效；模型名或地址写错
/// 导致的其他 404 仍是普通上游错误。
fn api_error(status: u16, body: &str) -> OracleError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(body)
        .trim()
        .to_string();
    let message = match error.and_then(|e| e.get("status")).and_then(Value::as_str) {
        Some(code) => format!("{}: {}", code, message),
        None => message,
    };

    if message.to_lowercase().contains(ENTITY_NOT_FOUND) {
        OracleError::CredentialInvalidated(message)
    } else {
        OracleError::Api { status, message }
    }
}

/// 拼接首个候选的全部文本片段，并取出落地元数据
fn extract_response(body: &Value) -> OracleResponse {
    let candidate = body.get("candidates").and_then(|c| c.get(0));

    let text = candidate
        .and_then(|c| c.pointer("/content/parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .filter(|t| !t.is_empty());

    OracleResponse {
        text,
        grounding: candidate.and_then(|c| c.get("groundingMetadata")).cloned(),
    }
}
