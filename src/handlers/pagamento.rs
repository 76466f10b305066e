use axum::{extract::State, response::Json};
use std::sync::Arc;
use tokio::time::Instant;

use nibo_inter_middleware::models::{
    ClassificarChaveRequest, ClassificarChaveResponse, ProcessarPagamentoRequest,
    ProcessarPagamentoResponse, TipoChavePix,
};
use nibo_inter_middleware::pix;
use nibo_inter_middleware::utils::logging::*;
use nibo_inter_middleware::utils::AppError;
use nibo_inter_middleware::AppState;

/// Fluxo automático completo: classifica a chave, agenda no NIBO e dispara
/// o PIX pelo Banco Inter.
pub async fn processar_automatico(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessarPagamentoRequest>,
) -> Result<Json<ProcessarPagamentoResponse>, AppError> {
    let start_time = Instant::now();
    log_request_received("/pagamentos/processar-automatico", "POST");

    let resposta = state.pagamentos.processar_automatico(&req).await?;

    let processing_time = start_time.elapsed().as_millis() as u64;
    log_request_processed("/pagamentos/processar-automatico", 200, processing_time);

    Ok(Json(resposta))
}

/// Dry-run de classificação usado pelo preview de chave do frontend.
/// Não toca NIBO nem Inter; chave não reconhecida não é erro aqui.
pub async fn classificar_chave(
    Json(req): Json<ClassificarChaveRequest>,
) -> Json<ClassificarChaveResponse> {
    log_request_received("/pagamentos/classificar-chave", "POST");

    let classificacao = pix::classificar(&req.chave_pix);

    Json(ClassificarChaveResponse {
        codigo_nibo: TipoChavePix::codigo_nibo_para(classificacao.tipo),
        tipo: classificacao.tipo,
        chave_formatada: classificacao.chave_formatada,
    })
}
