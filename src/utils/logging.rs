use tracing::{debug, error, info, warn};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!("Request processed: {} - Status: {} - Duration: {}ms",
          endpoint, status, duration_ms);
}

pub fn log_chave_classificada(tipo: &str, chave_formatada: &str) {
    info!("Chave PIX classificada: {} - Chave: {}", tipo, chave_formatada);
}

pub fn log_agendamento_criado(agendamento_id: &str, valor: f64) {
    info!("✅ Agendamento criado no NIBO: {} - Valor: R$ {:.2}", agendamento_id, valor);
}

pub fn log_pix_enviado(codigo_solicitacao: &str, valor: f64) {
    info!("💸 PIX enviado via Banco Inter: {} - Valor: R$ {:.2}", codigo_solicitacao, valor);
}

pub fn log_nibo_api_error(endpoint: &str, status: Option<u16>, error: &str) {
    error!("NIBO API error: {} - Status: {:?} - Error: {}", endpoint, status, error);
}

pub fn log_inter_api_error(endpoint: &str, status: Option<u16>, error: &str) {
    error!("Banco Inter API error: {} - Status: {:?} - Error: {}", endpoint, status, error);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 NIBO-Inter middleware server starting on port {}", port);
}

pub fn log_server_ready(port: u16) {
    info!("✅ Server ready and listening on http://0.0.0.0:{}", port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_integration_status_check() {
    debug!("Integration status check requested");
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
