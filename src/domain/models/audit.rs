// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::search_result::{GroundingSource, RankedEntry};

/// "当前位置" 哨兵值，与前端下拉框中的第一项保持一致
pub const CURRENT_LOCATION: &str = "Native IP / Current Location";

/// 地点下拉框的可选项：当前位置哨兵值 + 美国 50 个州
pub const US_STATES: [&str; 51] = [
    CURRENT_LOCATION,
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
    "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
    "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio",
    "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota",
    "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington", "West Virginia",
    "Wisconsin", "Wyoming",
];

static SCHEME_AND_WWW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://)?(www\.)?").expect("valid scheme regex"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unsupported search engine: {0}")]
    UnsupportedEngine(String),
    #[error("Target website cannot be empty")]
    EmptyDomain,
}

/// 设备类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn label(&self) -> &'static str {
        match self {
            DeviceClass::Desktop => "Desktop",
            DeviceClass::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 支持的搜索引擎
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SearchEngineKind {
    #[default]
    Google,
    Bing,
    Yahoo,
    DuckDuckGo,
}

impl SearchEngineKind {
    pub const ALL: [SearchEngineKind; 4] = [
        SearchEngineKind::Google,
        SearchEngineKind::Bing,
        SearchEngineKind::Yahoo,
        SearchEngineKind::DuckDuckGo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchEngineKind::Google => "Google",
            SearchEngineKind::Bing => "Bing",
            SearchEngineKind::Yahoo => "Yahoo",
            SearchEngineKind::DuckDuckGo => "DuckDuckGo",
        }
    }
}

impl fmt::Display for SearchEngineKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchEngineKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(SearchEngineKind::Google),
            "bing" => Ok(SearchEngineKind::Bing),
            "yahoo" => Ok(SearchEngineKind::Yahoo),
            "duckduckgo" | "ddg" => Ok(SearchEngineKind::DuckDuckGo),
            _ => Err(ModelError::UnsupportedEngine(s.to_string())),
        }
    }
}

impl TryFrom<String> for SearchEngineKind {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SearchEngineKind> for String {
    fn from(engine: SearchEngineKind) -> Self {
        engine.as_str().to_string()
    }
}

/// 地理位置上下文
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    /// 使用本机 IP 或坐标
    #[default]
    CurrentLocation,
    /// 具名地点，例如 "Texas"
    Named(String),
}

impl Location {
    pub fn is_current(&self) -> bool {
        matches!(self, Location::CurrentLocation)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Location::CurrentLocation => CURRENT_LOCATION,
            Location::Named(name) => name,
        }
    }
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == CURRENT_LOCATION {
            Location::CurrentLocation
        } else {
            Location::Named(trimmed.to_string())
        }
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Location::from(value.to_string())
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.as_str().to_string()
    }
}

/// 经纬度坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// 归一化后的目标域名
///
/// 去掉协议头、`www.` 前缀以及路径，并统一为小写。一次审计只计算一次，
/// 排名校正和目标标记都使用同一个实例。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TargetDomain(String);

impl TargetDomain {
    pub fn parse(website: &str) -> Result<Self, ModelError> {
        let lowered = website.trim().to_lowercase();
        let stripped = SCHEME_AND_WWW.replace(&lowered, "");
        let host = stripped.split('/').next().unwrap_or_default().trim();
        if host.is_empty() {
            return Err(ModelError::EmptyDomain);
        }
        Ok(Self(host.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL（忽略大小写）是否包含目标域名
    pub fn matches(&self, url: &str) -> bool {
        url.to_lowercase().contains(&self.0)
    }
}

impl fmt::Display for TargetDomain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 一次审计请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    pub website: String,
    pub keywords: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub engine: SearchEngineKind,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl AuditRequest {
    pub fn new(
        website: impl Into<String>,
        keywords: impl Into<String>,
        location: Location,
        engine: SearchEngineKind,
    ) -> Self {
        Self {
            website: website.into(),
            keywords: keywords.into(),
            location,
            engine,
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: Option<Coordinates>) -> Self {
        self.coordinates = coordinates;
        self
    }
}

/// 查询范围策略
///
/// 默认策略在一次调用里请求完整的 1-100 名。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    pub strategy: String,
    pub start_rank: u32,
    pub end_rank: u32,
    pub label: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            strategy: "DEEP_DIVE".to_string(),
            start_rank: 1,
            end_rank: 100,
            label: "Full Extraction".to_string(),
        }
    }
}

/// 单个设备类型的审计结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditOutcome {
    pub device: DeviceClass,
    pub target_rank: Option<u32>,
    pub results: Vec<RankedEntry>,
    pub summary: String,
    pub sources: Vec<GroundingSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,
}

/// 桌面端 + 移动端的合并结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DualAuditOutcome {
    pub target: String,
    pub desktop: AuditOutcome,
    pub mobile: AuditOutcome,
}
