// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Noisy transport modules pinned to `info` when only a bare level is given.
const QUIET_MODULES: &str = "h2=info,hyper=info,hyper_util=info,reqwest=info,alloy_transport_http=info,alloy_rpc_client=info,alloy_provider=info";

pub fn filter_spec(log_level: &str) -> String {
    // Custom directive strings (with ',' or '=') are respected as-is.
    let normalized = log_level.trim();
    if normalized.is_empty() {
        format!("info,{QUIET_MODULES}")
    } else if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else {
        format!("{normalized},{QUIET_MODULES}")
    }
}

/// Logs go to stderr; stdout is reserved for deployed addresses and alerts.
pub fn setup_logging(log_level: &str, json_format: bool) {
    let spec = filter_spec(log_level);
    let filter = EnvFilter::from_str(&spec).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    if json_format {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_current_span(false);
        subscriber.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact();
        subscriber.with(fmt_layer).init();
    }

    let base = spec.split(',').next().unwrap_or("info");
    tracing::debug!(
        target: "config",
        base,
        format = if json_format { "json" } else { "compact" },
        "Logging initialized"
    );
}
