// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::audit::{Location, SearchEngineKind};

/// 每个搜索结果页的条目数
const RESULTS_PER_PAGE: u32 = 10;

/// 排名所在的结果页（从 0 开始）
pub fn page_index(rank: Option<u32>) -> u32 {
    rank.map(|r| r.saturating_sub(1) / RESULTS_PER_PAGE)
        .unwrap_or(0)
}

/// 生成可直接打开的搜索链接
///
/// 只有 Google 会带上分页和 `near` 参数，其余引擎只拼接关键词。
pub fn build_search_url(
    keywords: &str,
    engine: SearchEngineKind,
    rank: Option<u32>,
    location: &Location,
) -> String {
    let query = urlencoding::encode(keywords);

    match engine {
        SearchEngineKind::Bing => format!("https://www.bing.com/search?q={}", query),
        SearchEngineKind::Yahoo => format!("https://search.yahoo.com/search?p={}", query),
        SearchEngineKind::DuckDuckGo => format!("https://duckduckgo.com/?q={}", query),
        SearchEngineKind::Google => {
            let mut url = format!("https://www.google.com/search?q={}&gl=us&pws=0", query);
            if let Location::Named(name) = location {
                url.push_str("&near=");
                url.push_str(&urlencoding::encode(name));
            }
            let page = page_index(rank);
            if page > 0 {
                url.push_str(&format!("&start={}", page * RESULTS_PER_PAGE));
            }
            url
        }
    }
}
