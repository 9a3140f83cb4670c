// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::utils::errors::AuditError;

/// 可重试的配额/限流关键字
const RETRYABLE_PATTERNS: [&str; 4] = [
    "quota",
    "429",
    "resource_exhausted",
    "search_grounding_request_per_project",
];

/// 搜索落地配额关键字，这类配额在会话时间尺度内不会恢复
const SEARCH_GROUNDING_PATTERN: &str = "search_grounding";

/// 错误分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// 普通配额/限流，按指数退避重试
    Retryable,
    /// 搜索落地配额耗尽，立即失败
    NonRetryableQuota,
    /// 其他错误，立即失败
    Fatal,
}

/// 按错误消息（忽略大小写）分类
pub fn classify(message: &str) -> ErrorClass {
    let message = message.to_lowercase();

    if message.contains(SEARCH_GROUNDING_PATTERN) {
        return ErrorClass::NonRetryableQuota;
    }

    if RETRYABLE_PATTERNS.iter().any(|&p| message.contains(p)) {
        ErrorClass::Retryable
    } else {
        ErrorClass::Fatal
    }
}

/// 重试状态机的状态
#[derive(Debug)]
enum RetryState<T> {
    Attempting { attempt: u32 },
    BackoffWait { attempt: u32, delay: Duration },
    Succeeded(T),
    FatalFailed(AuditError),
}

/// 重试策略配置
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大尝试次数（包含第一次调用）
    pub max_attempts: u32,
    /// 初始退避时间
    pub initial_backoff: Duration,
    /// 退避乘数
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_backoff: Duration::from_millis(3000),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            ..Self::default()
        }
    }

    /// 计算第 `attempt_index` 次失败（从 0 开始）之后的退避时间
    pub fn calculate_backoff(&self, attempt_index: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt_index as i32);
        Duration::from_secs_f64(self.initial_backoff.as_secs_f64() * factor)
    }

    /// 执行操作，按错误分类决定是否退避重试
    ///
    /// 重试次数用尽后原样返回最后一次错误；搜索落地配额错误会被转换为
    /// [`AuditError::SearchGroundingQuotaExhausted`] 并立即返回。
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, AuditError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AuditError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut state = RetryState::Attempting { attempt: 0 };

        loop {
            state = match state {
                RetryState::Attempting { attempt } => match operation().await {
                    Ok(value) => RetryState::Succeeded(value),
                    Err(err) => self.on_failure(attempt, max_attempts, err),
                },
                RetryState::BackoffWait { attempt, delay } => {
                    tokio::time::sleep(delay).await;
                    RetryState::Attempting {
                        attempt: attempt + 1,
                    }
                }
                RetryState::Succeeded(value) => return Ok(value),
                RetryState::FatalFailed(err) => return Err(err),
            };
        }
    }

    fn on_failure<T>(&self, attempt: u32, max_attempts: u32, err: AuditError) -> RetryState<T> {
        match err.class() {
            ErrorClass::NonRetryableQuota => {
                warn!("Search grounding quota exhausted, not retrying: {}", err);
                RetryState::FatalFailed(AuditError::SearchGroundingQuotaExhausted)
            }
            ErrorClass::Fatal => RetryState::FatalFailed(err),
            ErrorClass::Retryable if attempt + 1 < max_attempts => {
                let delay = self.calculate_backoff(attempt);
                warn!(
                    "Attempt {}/{} hit a quota limit, retrying in {:?}: {}",
                    attempt + 1,
                    max_attempts,
                    delay,
                    err
                );
                metrics::counter!("oracle_retries_total").increment(1);
                RetryState::BackoffWait { attempt, delay }
            }
            ErrorClass::Retryable => {
                debug!("Retries exhausted after {} attempts", max_attempts);
                RetryState::FatalFailed(err)
            }
        }
    }
}
