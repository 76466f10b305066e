//! Orquestração do fluxo automático de pagamento
//!
//! Sequência: classificar chave → validar valor → resolver fornecedor no
//! NIBO → criar agendamento → disparar PIX pelo Banco Inter. A sequência é
//! deliberadamente explícita, passo a passo, porque há um buraco de
//! compensação conhecido: um PIX que falha depois do agendamento deixa o
//! agendamento pendente no NIBO. Esse estado parcial é devolvido ao
//! chamador na resposta em vez de escondido.

use std::collections::HashMap;

use crate::config::Settings;
use crate::models::{ProcessarPagamentoRequest, ProcessarPagamentoResponse};
use crate::pix;
use crate::services::{InterPixService, NiboService, NovoAgendamento};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct PagamentoService {
    nibo: NiboService,
    /// Um cliente do Inter por conta do negócio, montado a partir da
    /// configuração injetada (nunca de uma tabela fixa no código)
    inter_por_conta: HashMap<String, InterPixService>,
}

impl PagamentoService {
    pub fn new(nibo: NiboService, inter_por_conta: HashMap<String, InterPixService>) -> Self {
        Self {
            nibo,
            inter_por_conta,
        }
    }

    /// Monta o serviço com um cliente do Inter para cada conta configurada.
    pub fn from_settings(settings: &Settings) -> Self {
        let nibo = NiboService::new(
            settings.nibo.api_token.clone(),
            settings.nibo.base_url.clone(),
        );

        let inter_por_conta = settings
            .contas
            .iter()
            .map(|(nome, conta)| {
                let servico = InterPixService::new(
                    settings.inter.base_url.clone(),
                    conta.client_id.clone(),
                    conta.client_secret.clone(),
                    settings.inter.scope.clone(),
                    conta.conta_corrente.clone(),
                );
                (nome.clone(), servico)
            })
            .collect();

        Self::new(nibo, inter_por_conta)
    }

    pub fn contas_configuradas(&self) -> Vec<String> {
        let mut contas: Vec<String> = self.inter_por_conta.keys().cloned().collect();
        contas.sort();
        contas
    }

    /// Executa o fluxo completo de pagamento automático.
    ///
    /// Erros de validação (chave, valor, conta) interrompem antes de
    /// qualquer chamada externa. Depois do agendamento criado, falha no
    /// PIX não é mais erro HTTP: a resposta sai com `sucesso == false` e o
    /// id do agendamento pendente.
    pub async fn processar_automatico(
        &self,
        req: &ProcessarPagamentoRequest,
    ) -> AppResult<ProcessarPagamentoResponse> {
        // 1. Classificar a chave PIX
        let classificacao = pix::classificar(&req.chave_pix);
        let tipo = match classificacao.tipo {
            Some(tipo) => tipo,
            None => {
                let digitos: String = req
                    .chave_pix
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();
                log_validation_error("chave_pix", &req.chave_pix);
                return Err(AppError::ValidationError(format!(
                    "chave PIX inválida: '{}' (dígitos: '{}')",
                    req.chave_pix.trim(),
                    digitos
                )));
            }
        };
        log_chave_classificada(&format!("{:?}", tipo), &classificacao.chave_formatada);

        // 2. Validar o valor
        let valor = pix::parse_brl(&req.valor)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        if valor <= 0.0 {
            return Err(AppError::ValidationError(format!(
                "valor do pagamento deve ser maior que zero (recebido: {})",
                req.valor
            )));
        }

        // 3. Resolver as credenciais da conta pagadora
        let inter = self.inter_por_conta.get(&req.conta).ok_or_else(|| {
            AppError::ValidationError(format!("conta não configurada: '{}'", req.conta))
        })?;

        // 4. Resolver o fornecedor no NIBO (busca por documento quando a
        //    chave é CPF/CNPJ, por nome nos demais casos)
        let documento = match tipo {
            crate::models::TipoChavePix::Cpf | crate::models::TipoChavePix::Cnpj => {
                Some(classificacao.chave_formatada.as_str())
            }
            _ => None,
        };
        let nome = req
            .nome_beneficiario
            .as_deref()
            .unwrap_or(&req.descricao);

        let fornecedor = match documento {
            Some(doc) => self.nibo.buscar_fornecedor_por_documento(doc).await?,
            None => self.nibo.buscar_fornecedor_por_nome(nome).await?,
        };
        let fornecedor_id = match fornecedor {
            Some(f) => f.id,
            None => self.nibo.criar_fornecedor(nome, documento).await?,
        };

        // 5. Criar o agendamento
        let vencimento = req
            .data_vencimento
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let agendamento_id = self
            .nibo
            .criar_agendamento(NovoAgendamento {
                fornecedor_id: &fornecedor_id,
                valor,
                descricao: &req.descricao,
                vencimento,
                chave_pix: &classificacao.chave_formatada,
                tipo_chave_codigo: tipo.codigo_nibo(),
            })
            .await?;

        // 6. Disparar o PIX. A partir daqui falha não desfaz o agendamento.
        match inter
            .enviar_pix(&classificacao.chave_formatada, valor, &req.descricao)
            .await
        {
            Ok(enviado) => Ok(ProcessarPagamentoResponse {
                sucesso: true,
                tipo_chave: Some(tipo),
                chave_formatada: classificacao.chave_formatada,
                valor,
                fornecedor_id: Some(fornecedor_id),
                agendamento_id: Some(agendamento_id),
                pix_enviado: true,
                codigo_solicitacao: Some(enviado.codigo_solicitacao),
                mensagem: "Pagamento processado com sucesso".to_string(),
            }),
            Err(e) => {
                log_error(&format!(
                    "❌ PIX falhou após agendamento {} criado: {}",
                    agendamento_id, e
                ));
                Ok(ProcessarPagamentoResponse {
                    sucesso: false,
                    tipo_chave: Some(tipo),
                    chave_formatada: classificacao.chave_formatada,
                    valor,
                    fornecedor_id: Some(fornecedor_id),
                    agendamento_id: Some(agendamento_id),
                    pix_enviado: false,
                    codigo_solicitacao: None,
                    mensagem: format!(
                        "Agendamento criado no NIBO, mas o envio do PIX falhou: {}. O agendamento permanece pendente.",
                        e
                    ),
                })
            }
        }
    }
}
