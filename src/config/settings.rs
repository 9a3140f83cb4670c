// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::models::audit::WorkerConfig;
use crate::utils::retry_policy::RetryPolicy;

/// 应用程序配置设置
///
/// 包含服务器、oracle、审计策略、历史存储、地理定位和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// Gemini oracle 配置
    pub gemini: GeminiSettings,
    /// 审计策略配置
    pub audit: AuditSettings,
    /// 历史存储配置
    pub history: HistorySettings,
    /// 地理定位配置
    pub geolocation: GeolocationSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// Gemini 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// API密钥，未配置时读取 `GEMINI_API_KEY` / `API_KEY`
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// API基础URL
    pub api_base_url: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
}

/// 审计策略配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSettings {
    /// 每个 worker 的最大尝试次数（包含第一次调用）
    pub max_attempts: u32,
    /// 初始退避时间（毫秒）
    pub initial_delay_ms: u64,
    /// 策略名称
    pub strategy: String,
    /// 请求的起始排名
    pub start_rank: u32,
    /// 请求的结束排名
    pub end_rank: u32,
    /// 策略描述
    pub label: String,
}

impl AuditSettings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_delay_ms),
        )
    }

    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            strategy: self.strategy.clone(),
            start_rank: self.start_rank,
            end_rank: self.end_rank,
            label: self.label.clone(),
        }
    }
}

/// 历史存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HistorySettings {
    /// 存储类型 (file, memory)
    pub storage_type: String,
    /// 历史文件路径 (当 type=file 时使用)
    pub path: String,
    /// 最多保留的记录数
    pub capacity: usize,
}

/// 地理定位配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationSettings {
    /// 是否为 "当前位置" 审计解析服务器坐标
    pub enabled: bool,
    /// IP 定位 API 端点
    pub endpoint: String,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus exporter
    pub enabled: bool,
    /// exporter 监听地址
    pub address: String,
}

impl MetricsSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.address
            .parse()
            .map_err(|e| ConfigError::Message(format!("Invalid metrics.address: {}", e)))
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载且通过校验的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("RANKAUDIT").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 只包含默认值的配置构建器
    pub fn with_defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Default server settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default Gemini settings
            .set_default("gemini.model", "gemini-3-flash-preview")?
            .set_default(
                "gemini.api_base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini.timeout_secs", 120)?
            // Default audit strategy
            .set_default("audit.max_attempts", 2)?
            .set_default("audit.initial_delay_ms", 3000)?
            .set_default("audit.strategy", "DEEP_DIVE")?
            .set_default("audit.start_rank", 1)?
            .set_default("audit.end_rank", 100)?
            .set_default("audit.label", "Full Extraction")?
            // Default history settings
            .set_default("history.storage_type", "file")?
            .set_default("history.path", "./storage/history.json")?
            .set_default("history.capacity", 50)?
            // Default geolocation settings
            .set_default("geolocation.enabled", false)?
            .set_default("geolocation.endpoint", "https://ipapi.co")?
            // Default metrics settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.address", "0.0.0.0:9000")
    }

    /// 校验配置之间的约束
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.audit.start_rank < 1 {
            return Err(ConfigError::Message(
                "audit.start_rank must be at least 1".to_string(),
            ));
        }
        if self.audit.end_rank < self.audit.start_rank {
            return Err(ConfigError::Message(format!(
                "audit.end_rank ({}) must not be below audit.start_rank ({})",
                self.audit.end_rank, self.audit.start_rank
            )));
        }
        if self.history.capacity < 1 {
            return Err(ConfigError::Message(
                "history.capacity must be at least 1".to_string(),
            ));
        }
        if !matches!(self.history.storage_type.as_str(), "file" | "memory") {
            return Err(ConfigError::Message(format!(
                "Unsupported history.storage_type: {}",
                self.history.storage_type
            )));
        }
        if self.metrics.enabled {
            self.metrics.socket_addr()?;
        }
        Ok(())
    }
}
