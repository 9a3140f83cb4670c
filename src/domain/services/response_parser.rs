// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::domain::models::audit::DeviceClass;
use crate::domain::models::search_result::{GroundingSource, RankedEntry};
use crate::domain::oracle::search_oracle::OracleResponse;
use crate::utils::errors::AuditError;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json|JSON)?").expect("valid code fence regex"));

/// 单条结果的缺陷，只记录日志，不会让整个响应失败
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseDefect {
    #[error("entry is not an object")]
    NotAnObject,
    #[error("entry has no positive integer rank")]
    MissingRank,
    #[error("entry has no url")]
    MissingUrl,
    #[error("entry has no title")]
    MissingTitle,
}

/// 解析后、校正前的响应
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub target_rank: Option<u32>,
    pub results: Vec<RankedEntry>,
    pub summary: String,
    pub sources: Vec<GroundingSource>,
}

/// 去掉载荷中的 Markdown 代码块标记
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// 解析 oracle 响应
///
/// # 错误
/// * 文本不是 JSON、不是对象，或 `results` 不是数组时返回 [`AuditError::MalformedResponse`]
///
/// 空载荷按空对象处理；缺少必填字段的条目被静默丢弃。
pub fn parse_response(
    response: &OracleResponse,
    device: DeviceClass,
) -> Result<ParsedResponse, AuditError> {
    let payload = parse_payload(response.text.as_deref().unwrap_or_default())?;

    let target_rank = payload.get("targetRank").and_then(coerce_target_rank);
    let results = match payload.get("results") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => normalize_entries(items),
        Some(other) => {
            return Err(AuditError::MalformedResponse(format!(
                "`results` must be an array, got {}",
                json_type(other)
            )))
        }
    };
    let summary = payload
        .get("summary")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} audit sequence finished.", device.label()));

    Ok(ParsedResponse {
        target_rank,
        results,
        summary,
        sources: extract_sources(response.grounding.as_ref()),
    })
}

fn parse_payload(raw: &str) -> Result<Map<String, Value>, AuditError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| AuditError::MalformedResponse(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(AuditError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

fn normalize_entries(items: &[Value]) -> Vec<RankedEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match normalize_entry(item) {
            Ok(entry) => {
                if seen.insert((entry.rank, entry.url.clone())) {
                    entries.push(entry);
                }
            }
            Err(defect) => debug!("Dropping result entry #{}: {}", index, defect),
        }
    }

    entries
}

/// 把一条不可信的结果逐字段转换为 [`RankedEntry`]
pub fn normalize_entry(item: &Value) -> Result<RankedEntry, ParseDefect> {
    let obj = item.as_object().ok_or(ParseDefect::NotAnObject)?;

    let rank = obj
        .get("rank")
        .and_then(positive_integer)
        .ok_or(ParseDefect::MissingRank)?;
    let url = non_empty_str(obj.get("url")).ok_or(ParseDefect::MissingUrl)?;
    let title = non_empty_str(obj.get("title")).ok_or(ParseDefect::MissingTitle)?;
    let description = non_empty_str(obj.get("description"));

    Ok(RankedEntry::new(rank, url, title, description))
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn positive_integer(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok().filter(|&n| n > 0);
    }
    let f = value.as_f64()?;
    if f >= 1.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

fn coerce_target_rank(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => s.trim().parse::<u32>().ok().filter(|&n| n > 0),
        other => positive_integer(other),
    }
}

/// 提取 `groundingChunks[].web` 中的引用，缺失时返回空列表
pub fn extract_sources(grounding: Option<&Value>) -> Vec<GroundingSource> {
    let Some(chunks) = grounding
        .and_then(|g| g.get("groundingChunks"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    chunks
        .iter()
        .map(|chunk| {
            let web = chunk.get("web");
            let defaults = GroundingSource::default();
            GroundingSource {
                title: non_empty_str(web.and_then(|w| w.get("title"))).unwrap_or(defaults.title),
                uri: non_empty_str(web.and_then(|w| w.get("uri"))).unwrap_or(defaults.uri),
            }
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
