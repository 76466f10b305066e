use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use nibo_inter_middleware::utils::logging::*;
use nibo_inter_middleware::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "nibo-inter-middleware",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn ready_check(State(state): State<Arc<AppState>>) -> Result<Json<Value>, StatusCode> {
    log_integration_status_check();

    // Testa a conexão com o NIBO
    let nibo_status = match state.nibo.test_connection().await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    // O Inter só é acionado no disparo; aqui reportamos apenas configuração
    let contas = state.pagamentos.contas_configuradas();

    let overall_ready = nibo_status == "connected" && !contas.is_empty();

    let response = json!({
        "ready": overall_ready,
        "service": "nibo-inter-middleware",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "nibo": {
                "status": nibo_status,
                "base_url": state.settings.nibo.base_url
            },
            "inter": {
                "status": if contas.is_empty() { "not_configured" } else { "configured" },
                "contas": contas
            }
        }
    });

    if overall_ready {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

pub async fn status_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    log_integration_status_check();

    let nibo_configured = !state.settings.nibo.api_token.is_empty();
    let contas = state.pagamentos.contas_configuradas();

    Json(json!({
        "service": "nibo-inter-middleware",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
        "integrations": {
            "nibo": {
                "configured": nibo_configured,
                "base_url": state.settings.nibo.base_url
            },
            "inter": {
                "base_url": state.settings.inter.base_url,
                "scope": state.settings.inter.scope,
                "contas_configuradas": contas
            }
        }
    }))
}
