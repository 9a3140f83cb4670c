// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::models::audit::{
    AuditOutcome, AuditRequest, DeviceClass, DualAuditOutcome, TargetDomain, WorkerConfig,
};
use crate::domain::oracle::search_oracle::SearchOracle;
use crate::domain::services::prompt_builder::{build_prompt, PromptContext};
use crate::domain::services::rank_reconciler::reconcile;
use crate::domain::services::response_parser::parse_response;
use crate::domain::services::search_url::build_search_url;
use crate::domain::services::window_filter::select;
use crate::utils::errors::AuditError;
use crate::utils::retry_policy::RetryPolicy;

/// 审计编排服务
///
/// 一次审计并发运行桌面端和移动端两个 worker，每个 worker 独立完成
/// 提示词构建、带退避的 oracle 调用、解析、排名校正、窗口过滤和链接生成。
/// 任意一侧失败则整次审计失败，不返回单侧结果。
pub struct AuditService {
    oracle: Arc<dyn SearchOracle>,
    retry: RetryPolicy,
    worker: WorkerConfig,
}

impl AuditService {
    pub fn new(oracle: Arc<dyn SearchOracle>, retry: RetryPolicy, worker: WorkerConfig) -> Self {
        Self {
            oracle,
            retry,
            worker,
        }
    }

    /// 执行一次完整的双端审计
    ///
    /// # 错误
    /// * 网站或关键词为空时返回 [`AuditError::Validation`]
    /// * 任一 worker 的不可恢复错误原样向上传播
    pub async fn run_audit(&self, request: &AuditRequest) -> Result<DualAuditOutcome, AuditError> {
        if request.keywords.trim().is_empty() {
            return Err(AuditError::Validation("Keywords cannot be empty".to_string()));
        }
        let target = TargetDomain::parse(&request.website)?;

        info!(
            "Starting rank audit for {} on {} ({})",
            target,
            request.engine,
            request.location.as_str()
        );
        metrics::counter!("rank_audits_total").increment(1);
        let started = Instant::now();

        let joined = tokio::try_join!(
            self.run_worker(request, &target, DeviceClass::Desktop),
            self.run_worker(request, &target, DeviceClass::Mobile),
        );

        metrics::histogram!("rank_audit_duration_seconds").record(started.elapsed().as_secs_f64());

        match joined {
            Ok((desktop, mobile)) => {
                info!(
                    "Rank audit for {} finished: desktop {:?}, mobile {:?}",
                    target, desktop.target_rank, mobile.target_rank
                );
                Ok(DualAuditOutcome {
                    target: target.to_string(),
                    desktop,
                    mobile,
                })
            }
            Err(e) => {
                metrics::counter!("rank_audits_failed_total").increment(1);
                warn!("Rank audit for {} failed: {}", target, e);
                Err(e)
            }
        }
    }

    async fn run_worker(
        &self,
        request: &AuditRequest,
        target: &TargetDomain,
        device: DeviceClass,
    ) -> Result<AuditOutcome, AuditError> {
        let prompt = build_prompt(&PromptContext {
            domain: target,
            keywords: &request.keywords,
            location: &request.location,
            device,
            coordinates: request.coordinates,
            worker: &self.worker,
        });

        let oracle = self.oracle.as_ref();
        let prompt = prompt.as_str();
        let response = self
            .retry
            .execute(move || async move {
                metrics::counter!("oracle_requests_total", "device" => device.label())
                    .increment(1);
                oracle.generate(prompt).await.map_err(AuditError::from)
            })
            .await?;

        let parsed = parse_response(&response, device)?;
        let target_rank = reconcile(parsed.target_rank, &parsed.results, target);
        debug!(
            "{} worker: claimed rank {:?}, reconciled rank {:?}, {} entries",
            device,
            parsed.target_rank,
            target_rank,
            parsed.results.len()
        );

        let results = select(parsed.results, target_rank)
            .into_iter()
            .map(|mut entry| {
                entry.is_target = target.matches(&entry.url);
                entry
            })
            .collect();

        Ok(AuditOutcome {
            device,
            target_rank,
            results,
            summary: parsed.summary,
            sources: parsed.sources,
            search_url: Some(build_search_url(
                &request.keywords,
                request.engine,
                target_rank,
                &request.location,
            )),
        })
    }
}
