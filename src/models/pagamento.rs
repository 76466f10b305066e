//! Payloads dos endpoints de pagamento

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TipoChavePix;

/// Request do fluxo automático: classifica a chave, agenda no NIBO e
/// dispara o PIX pelo Banco Inter.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessarPagamentoRequest {
    /// Chave PIX como o usuário colou (pode vir com pontuação, espaços etc.)
    pub chave_pix: String,
    /// Valor no formato brasileiro ("R$ 1.234,56"), como vem da planilha
    pub valor: String,
    pub descricao: String,
    /// Conta do negócio que paga (seleciona as credenciais do Inter)
    pub conta: String,
    /// Vencimento do agendamento; hoje quando ausente
    pub data_vencimento: Option<NaiveDate>,
    /// Nome para criar o fornecedor no NIBO quando a busca não encontra
    pub nome_beneficiario: Option<String>,
}

/// Resposta do fluxo automático, reportando cada passo da sequência.
///
/// `agendamento_id` pode vir preenchido mesmo com `sucesso == false`: o
/// agendamento do NIBO não é desfeito quando o disparo do PIX falha, e o
/// chamador precisa saber que ele ficou pendente.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessarPagamentoResponse {
    pub sucesso: bool,
    pub tipo_chave: Option<TipoChavePix>,
    pub chave_formatada: String,
    pub valor: f64,
    pub fornecedor_id: Option<String>,
    pub agendamento_id: Option<String>,
    pub pix_enviado: bool,
    /// Código de solicitação retornado pelo Banco Inter
    pub codigo_solicitacao: Option<String>,
    pub mensagem: String,
}

/// Request do dry-run de classificação usado pelo preview do frontend.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificarChaveRequest {
    pub chave_pix: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificarChaveResponse {
    pub tipo: Option<TipoChavePix>,
    pub chave_formatada: String,
    /// Código do tipo de chave esperado pela API do NIBO
    pub codigo_nibo: u8,
}
