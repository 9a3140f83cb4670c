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

use rankaudit::application::use_cases::audit_use_case::AuditUseCase;
use rankaudit::config::settings::Settings;
use rankaudit::domain::oracle::search_oracle::SearchOracle;
use rankaudit::domain::services::audit_service::AuditService;
use rankaudit::domain::services::history_service::HistoryService;
use rankaudit::infrastructure::geolocation::GeoLocationService;
use rankaudit::infrastructure::oracle::gemini::GeminiOracle;
use rankaudit::infrastructure::repositories::history_repo_impl::create_history_repository;
use rankaudit::presentation::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use rankaudit::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    telemetry::init_telemetry(json_logs);
    info!("Starting rankaudit...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Initialize Prometheus Metrics
    if settings.metrics.enabled {
        rankaudit::infrastructure::metrics::init_metrics(settings.metrics.socket_addr()?);
    }

    // 4. Initialize oracle
    let gemini = GeminiOracle::new(&settings.gemini);
    if !gemini.has_credential() {
        warn!("No Gemini API key configured; audits will fail until one is provided");
    }
    let oracle: Arc<dyn SearchOracle> = Arc::new(gemini);
    info!("Oracle initialized: {}", oracle.name());

    // 5. Initialize history storage
    let history_repo = create_history_repository(&settings.history)?;
    info!(
        "History storage initialized ({})",
        settings.history.storage_type
    );

    // 6. Initialize services
    let audit_service = Arc::new(AuditService::new(
        oracle,
        settings.audit.retry_policy(),
        settings.audit.worker_config(),
    ));
    let history_service = Arc::new(HistoryService::new(history_repo));
    let geolocation = settings
        .geolocation
        .enabled
        .then(|| Arc::new(GeoLocationService::with_endpoint(settings.geolocation.endpoint.clone())));
    let audit_use_case = Arc::new(AuditUseCase::new(
        audit_service,
        history_service.clone(),
        geolocation,
    ));

    // 7. Start HTTP server
    let app = routes::app(audit_use_case, history_service);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
