/// Main Application: middleware de pagamentos PIX
///
/// Fluxo:
/// - Frontend de gestão envia a solicitação de pagamento (chave PIX + valor)
/// - Middleware classifica a chave e valida o valor (núcleo puro em src/pix)
/// - NIBO recebe o agendamento de contas a pagar
/// - Banco Inter executa a transferência PIX
///
/// Sem banco de dados próprio: todo estado vive no NIBO e no Inter.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use nibo_inter_middleware::{config, services, utils, AppState};

mod handlers;

use config::Settings;
use handlers::{
    classificar_chave, health_check, processar_automatico, ready_check, status_check,
};
use utils::logging::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carregar variáveis de ambiente do arquivo .env (se existir)
    if dotenvy::dotenv().is_err() {
        // Em produção não existe .env - variáveis vêm do ambiente
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Inicializar tracing
    tracing_subscriber::fmt::init();

    // Carregar configurações
    let settings = Settings::new()
        .map_err(|e| anyhow::anyhow!("Falha ao carregar configurações: {}", e))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    if settings.contas.is_empty() {
        log_warning("⚠️ Nenhuma conta configurada em [contas] - o disparo de PIX vai falhar na validação");
    } else {
        log_info(&format!(
            "✅ {} conta(s) do Banco Inter configurada(s)",
            settings.contas.len()
        ));
    }

    // Inicializar serviços
    let nibo = services::NiboService::new(
        settings.nibo.api_token.clone(),
        settings.nibo.base_url.clone(),
    );
    let pagamentos = services::PagamentoService::from_settings(&settings);
    log_info("⚡ Serviços NIBO e Banco Inter configurados");

    // Inicializar estado da aplicação
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        nibo,
        pagamentos,
    });

    // Configurar rotas
    let app = Router::new()
        // Health checks (públicos)
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/status", get(status_check))

        // Fluxo de pagamento
        .route("/pagamentos/processar-automatico", post(processar_automatico))
        .route("/pagamentos/classificar-chave", post(classificar_chave))

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Iniciar servidor (PORT do ambiente tem precedência, como no Cloud Run)
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(port);

    // Graceful shutdown com signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
