//! Cliente da API de pagamentos PIX do Banco Inter
//!
//! Fluxo OAuth2 client-credentials com cache de token em memória e disparo
//! de PIX com idempotência via header `x-id-idempotente`.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

// Renovar o token um pouco antes de expirar para não perder a janela
const MARGEM_EXPIRACAO: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct InterPixService {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    conta_corrente: Option<String>,
    token: Arc<RwLock<Option<TokenCache>>>,
}

#[derive(Debug, Clone)]
struct TokenCache {
    access_token: String,
    expira_em: Instant,
}

impl TokenCache {
    fn is_valid(&self) -> bool {
        Instant::now() + MARGEM_EXPIRACAO < self.expira_em
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Resultado do disparo de um PIX.
#[derive(Debug, Clone)]
pub struct PixEnviado {
    pub codigo_solicitacao: String,
    pub tipo_retorno: Option<String>,
}

impl InterPixService {
    pub fn new(
        base_url: String,
        client_id: String,
        client_secret: String,
        scope: String,
        conta_corrente: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url,
            client_id,
            client_secret,
            scope,
            conta_corrente,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Obtém um token válido: cache em memória primeiro, OAuth2 depois.
    async fn obter_token(&self) -> AppResult<String> {
        {
            let cache = self.token.read().await;
            if let Some(token) = cache.as_ref() {
                if token.is_valid() {
                    return Ok(token.access_token.clone());
                }
            }
        }

        log_info("🔄 Token do Banco Inter expirado ou ausente, renovando...");

        let url = format!("{}/oauth/v2/token", self.base_url);
        let response = self
            .client
            .post(&url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log_inter_api_error("/oauth/v2/token", Some(status), &body);
            return Err(AppError::InterApi(format!(
                "Falha na autenticação com o Banco Inter (status {})",
                status
            )));
        }

        let token: TokenResponse = response.json().await?;
        let cache = TokenCache {
            access_token: token.access_token.clone(),
            expira_em: Instant::now() + Duration::from_secs(token.expires_in),
        };

        *self.token.write().await = Some(cache);
        Ok(token.access_token)
    }

    /// Dispara um pagamento PIX para a chave informada.
    ///
    /// Cada chamada gera um UUID novo de idempotência; reenvio após falha de
    /// rede é responsabilidade do chamador, que deve tratar o agendamento
    /// pendente antes de repetir.
    pub async fn enviar_pix(
        &self,
        chave: &str,
        valor: f64,
        descricao: &str,
    ) -> AppResult<PixEnviado> {
        let token = self.obter_token().await?;

        let url = format!("{}/banking/v2/pix", self.base_url);
        let payload = json!({
            "valor": format!("{:.2}", valor),
            "descricao": descricao,
            "destinatario": {
                "tipo": "CHAVE",
                "chave": chave,
            }
        });

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .header("x-id-idempotente", Uuid::new_v4().to_string())
            .json(&payload);

        if let Some(conta) = &self.conta_corrente {
            request = request.header("x-conta-corrente", conta);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log_inter_api_error("/banking/v2/pix", Some(status), &body);
            return Err(AppError::InterApi(format!(
                "Falha ao enviar PIX (status {}): {}",
                status, body
            )));
        }

        let corpo: Value = response.json().await?;
        let codigo_solicitacao = corpo["codigoSolicitacao"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::InterApi("Resposta do PIX sem codigoSolicitacao".to_string())
            })?;

        log_pix_enviado(&codigo_solicitacao, valor);

        Ok(PixEnviado {
            codigo_solicitacao,
            tipo_retorno: corpo["tipoRetorno"].as_str().map(str::to_string),
        })
    }
}
