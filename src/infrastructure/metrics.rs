// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 安装 Prometheus exporter 并注册审计相关指标。
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new();

    // 端口被占用时只记录告警（开发/测试环境常见）
    if let Err(e) = builder.with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_counter!("rank_audits_total", "Total number of rank audits started");
    describe_counter!(
        "rank_audits_failed_total",
        "Total number of rank audits that failed"
    );
    describe_counter!(
        "oracle_requests_total",
        "Total number of oracle calls, labelled by device class"
    );
    describe_counter!(
        "oracle_retries_total",
        "Total number of oracle calls retried after a quota signal"
    );
    describe_histogram!(
        "rank_audit_duration_seconds",
        "Duration of a dual-device rank audit in seconds"
    );

    info!("Metrics exporter listening on {}", addr);
}
