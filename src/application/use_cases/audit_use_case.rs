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

use std::sync::Arc;
use tracing::{debug, warn};
use validator::Validate;

use crate::{
    application::dto::audit_request::AuditRequestDto,
    domain::{
        models::audit::DualAuditOutcome,
        services::{audit_service::AuditService, history_service::HistoryService},
    },
    infrastructure::geolocation::GeoLocationService,
    utils::errors::AuditError,
};

/// 审计用例
///
/// 校验请求 → 必要时解析服务器坐标 → 执行双端审计 → 记录历史。
/// 历史记录失败只记录日志，不影响审计结果。
pub struct AuditUseCase {
    audit_service: Arc<AuditService>,
    history_service: Arc<HistoryService>,
    geolocation: Option<Arc<GeoLocationService>>,
}

impl AuditUseCase {
    pub fn new(
        audit_service: Arc<AuditService>,
        history_service: Arc<HistoryService>,
        geolocation: Option<Arc<GeoLocationService>>,
    ) -> Self {
        Self {
            audit_service,
            history_service,
            geolocation,
        }
    }

    pub async fn execute(&self, dto: AuditRequestDto) -> Result<DualAuditOutcome, AuditError> {
        dto.validate()
            .map_err(|e| AuditError::Validation(e.to_string()))?;
        let mut request = dto.into_request()?;

        if request.location.is_current() && request.coordinates.is_none() {
            if let Some(geolocation) = &self.geolocation {
                request.coordinates = geolocation.current_coordinates().await;
                debug!("Resolved server coordinates: {:?}", request.coordinates);
            }
        }

        let outcome = self.audit_service.run_audit(&request).await?;

        if let Err(e) = self.history_service.record(&request, &outcome).await {
            warn!("Failed to record audit history: {}", e);
        }

        Ok(outcome)
    }
}
