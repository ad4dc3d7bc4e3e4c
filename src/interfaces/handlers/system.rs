use actix_web::{web, get, HttpResponse, Responder};
use humantime::format_duration;
use chrono::Utc;
use std::time::Duration;
use sysinfo::System;
use serde::Serialize;

use crate::{constants::START_TIME, repositories::message::StoreHealth, AppState};

#[derive(Serialize)]
struct SystemInfo {
    os: String,
    hostname: String,
    cpu_count: usize,
    memory_usage: String,
}

#[derive(Serialize)]
struct RateLimitInfo {
    max_requests: u32,
    window_secs: u64,
    tracked_origins: usize,
}

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    service: String,
    version: &'static str,
    uptime: String,
    timestamp: String,
    start_at: String,
    store: StoreHealth,
    email_relay: &'static str,
    rate_limit: RateLimitInfo,
    system: SystemInfo,
}

fn system_info() -> SystemInfo {
    let mut sys = System::new();
    sys.refresh_cpu_all();
    sys.refresh_memory();

    let memory_usage = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| {
            sys.refresh_processes(sysinfo::ProcessesToUpdate::Some(&[pid]), true);
            sys.process(pid).map(|p| format!("{:.2} MB", p.memory() as f64 / 1024.0 / 1024.0))
        })
        .unwrap_or_else(|| "Unknown".to_string());

    SystemInfo {
        os: System::name().unwrap_or_else(|| "Unknown".to_string()),
        hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        cpu_count: sys.cpus().len(),
        memory_usage,
    }
}

/// Liveness plus a snapshot of the store and relay. A store that cannot be
/// read reports `degraded`; the service keeps answering either way.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    let store = state.messages_handler.store_health().await;
    let limiter = &state.contact_handler.rate_limiter;

    let response = HealthCheckResponse {
        status: if store.readable { "healthy" } else { "degraded" },
        service: state.service_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_duration(Duration::from_secs(uptime)).to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        store,
        email_relay: if state.contact_handler.email_sender.is_some() { "configured" } else { "disabled" },
        rate_limit: RateLimitInfo {
            max_requests: limiter.max_requests(),
            window_secs: limiter.window().as_secs(),
            tracked_origins: limiter.tracked_origins(),
        },
        system: system_info(),
    };

    HttpResponse::Ok().json(response)
}
