// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 缺少描述时使用的占位文本
pub const DESCRIPTION_PLACEHOLDER: &str = "Organic SEO result details...";

/// 一条自然搜索结果
///
/// 只在解析 oracle 响应时创建，之后只会被过滤或重新排序。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    /// 自然排名（从 1 开始，越小越好）
    pub rank: u32,
    pub url: String,
    pub title: String,
    pub description: String,
    /// 该结果的 URL 是否命中目标域名
    #[serde(default)]
    pub is_target: bool,
}

impl RankedEntry {
    pub fn new(rank: u32, url: String, title: String, description: Option<String>) -> Self {
        Self {
            rank,
            url,
            title,
            description: description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string()),
            is_target: false,
        }
    }
}

/// 搜索落地引用（grounding citation）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

impl Default for GroundingSource {
    fn default() -> Self {
        Self {
            title: "Source".to_string(),
            uri: "#".to_string(),
        }
    }
}
