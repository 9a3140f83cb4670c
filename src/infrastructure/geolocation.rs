// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::domain::models::audit::Coordinates;

/// 服务器出口 IP 的地理定位服务
///
/// 用于 "当前位置" 审计：请求方没有提供坐标时，用本机出口 IP 的坐标作为
/// 提示词中的位置上下文。定位失败不是错误，只是退回到通用的 IP 区域描述。
pub struct GeoLocationService {
    /// API端点 (默认为 ipapi.co)
    api_endpoint: String,
    /// HTTP客户端
    client: reqwest::Client,
}

impl Default for GeoLocationService {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoLocationService {
    /// 创建新的地理定位服务实例
    pub fn new() -> Self {
        Self::with_endpoint("https://ipapi.co".to_string())
    }

    /// 使用自定义API端点创建服务实例
    pub fn with_endpoint(api_endpoint: String) -> Self {
        Self {
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_default(),
        }
    }

    /// 获取本机出口 IP 的坐标
    ///
    /// # 返回值
    ///
    /// * `Ok(Coordinates)` - 坐标
    /// * `Err(anyhow::Error)` - 请求失败或响应中没有坐标
    pub async fn locate(&self) -> Result<Coordinates> {
        let url = format!("{}/json/", self.api_endpoint);
        debug!("Resolving server coordinates via {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", concat!("rankaudit/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| {
                error!("Failed to fetch geolocation: {}", e);
                anyhow::anyhow!("Failed to fetch geolocation: {}", e)
            })?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Geolocation API error: {}",
                response.status()
            ));
        }

        let api_response: IpApiResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse geolocation response: {}", e))?;

        if api_response.error.unwrap_or(false) {
            return Err(anyhow::anyhow!(
                "Geolocation API rejected the lookup: {}",
                api_response.reason.unwrap_or_default()
            ));
        }

        match (api_response.latitude, api_response.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(anyhow::anyhow!("Geolocation response has no coordinates")),
        }
    }

    /// 获取坐标，失败时记录日志并返回 `None`
    pub async fn current_coordinates(&self) -> Option<Coordinates> {
        match self.locate().await {
            Ok(coordinates) => Some(coordinates),
            Err(e) => {
                warn!("Falling back to IP region context: {}", e);
                None
            }
        }
    }
}

/// IP API 响应结构
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    error: Option<bool>,
    reason: Option<String>,
}
