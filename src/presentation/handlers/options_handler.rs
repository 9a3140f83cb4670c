// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Json;
use serde_json::{json, Value};

use crate::domain::models::audit::{SearchEngineKind, CURRENT_LOCATION, US_STATES};

/// 表单可选项：支持的搜索引擎与地点
pub async fn options() -> Json<Value> {
    let engines: Vec<&str> = SearchEngineKind::ALL.iter().map(|e| e.as_str()).collect();

    Json(json!({
        "engines": engines,
        "locations": US_STATES.as_slice(),
        "currentLocation": CURRENT_LOCATION,
    }))
}
