//! Cliente da API do NIBO (contas a pagar)
//!
//! Cobre o que o fluxo automático precisa: busca/criação de fornecedor
//! (stakeholder) e criação do agendamento de pagamento. Autenticação por
//! header `apitoken`.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use chrono::NaiveDate;

use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct NiboService {
    client: Client,
    api_token: String,
    base_url: String,
}

/// Fornecedor (stakeholder) como o NIBO devolve nas listagens.
#[derive(Debug, Clone, Deserialize)]
pub struct Fornecedor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub document: Option<DocumentoFornecedor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentoFornecedor {
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub tipo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListaFornecedores {
    #[serde(default)]
    items: Vec<Fornecedor>,
}

/// Dados do agendamento de débito a criar no NIBO.
#[derive(Debug, Clone)]
pub struct NovoAgendamento<'a> {
    pub fornecedor_id: &'a str,
    pub valor: f64,
    pub descricao: &'a str,
    pub vencimento: NaiveDate,
    pub chave_pix: &'a str,
    /// Código numérico do tipo de chave (ver `TipoChavePix::codigo_nibo`)
    pub tipo_chave_codigo: u8,
}

impl NiboService {
    pub fn new(api_token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_token,
            base_url,
        }
    }

    /// Verifica conectividade e validade do token consultando as organizações.
    pub async fn test_connection(&self) -> AppResult<()> {
        let url = format!("{}/organizations", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apitoken", &self.api_token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log_nibo_api_error("/organizations", Some(status), &body);
            Err(AppError::NiboApi(format!(
                "Falha na conexão com o NIBO (status {})",
                status
            )))
        }
    }

    /// Busca um fornecedor pelo número do documento (CPF/CNPJ, só dígitos).
    pub async fn buscar_fornecedor_por_documento(
        &self,
        documento: &str,
    ) -> AppResult<Option<Fornecedor>> {
        let filtro = format!("document/number eq '{}'", documento);
        self.buscar_fornecedor(&filtro).await
    }

    /// Busca um fornecedor pelo nome exato.
    pub async fn buscar_fornecedor_por_nome(&self, nome: &str) -> AppResult<Option<Fornecedor>> {
        // Aspas simples dobradas escapam o literal no $filter OData
        let filtro = format!("name eq '{}'", nome.replace('\'', "''"));
        self.buscar_fornecedor(&filtro).await
    }

    async fn buscar_fornecedor(&self, filtro: &str) -> AppResult<Option<Fornecedor>> {
        let url = format!("{}/suppliers", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apitoken", &self.api_token)
            .query(&[("$filter", filtro)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log_nibo_api_error("/suppliers", Some(status), &body);
            return Err(AppError::NiboApi(format!(
                "Falha ao buscar fornecedor (status {})",
                status
            )));
        }

        let lista: ListaFornecedores = response.json().await?;
        Ok(lista.items.into_iter().next())
    }

    /// Cria um fornecedor e retorna seu id.
    pub async fn criar_fornecedor(
        &self,
        nome: &str,
        documento: Option<&str>,
    ) -> AppResult<String> {
        let url = format!("{}/suppliers", self.base_url);

        let mut payload = json!({ "name": nome });
        if let Some(doc) = documento {
            payload["document"] = json!({ "number": doc });
        }

        let response = self
            .client
            .post(&url)
            .header("apitoken", &self.api_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log_nibo_api_error("/suppliers", Some(status), &body);
            return Err(AppError::NiboApi(format!(
                "Falha ao criar fornecedor '{}' (status {})",
                nome, status
            )));
        }

        // O NIBO responde ora com o id puro, ora com o objeto criado
        let corpo: Value = response.json().await?;
        let id = corpo
            .as_str()
            .map(str::to_string)
            .or_else(|| corpo["id"].as_str().map(str::to_string))
            .ok_or_else(|| {
                AppError::NiboApi("Resposta de criação de fornecedor sem id".to_string())
            })?;

        log_info(&format!("✅ Fornecedor criado no NIBO: {} ({})", nome, id));
        Ok(id)
    }

    /// Cria um agendamento de débito com os dados do PIX e retorna o id.
    pub async fn criar_agendamento(&self, agendamento: NovoAgendamento<'_>) -> AppResult<String> {
        let url = format!("{}/schedules/debit", self.base_url);

        let payload = json!({
            "stakeholderId": agendamento.fornecedor_id,
            "dueDate": agendamento.vencimento.format("%Y-%m-%d").to_string(),
            "scheduleDate": agendamento.vencimento.format("%Y-%m-%d").to_string(),
            "value": agendamento.valor,
            "description": agendamento.descricao,
            "pixKey": agendamento.chave_pix,
            "pixKeyType": agendamento.tipo_chave_codigo,
        });

        let response = self
            .client
            .post(&url)
            .header("apitoken", &self.api_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log_nibo_api_error("/schedules/debit", Some(status), &body);
            return Err(AppError::NiboApi(format!(
                "Falha ao criar agendamento (status {})",
                status
            )));
        }

        let corpo: Value = response.json().await?;
        let id = corpo["scheduleId"]
            .as_str()
            .or_else(|| corpo["id"].as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::NiboApi("Resposta de criação de agendamento sem id".to_string())
            })?;

        log_agendamento_criado(&id, agendamento.valor);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn servico(server: &MockServer) -> NiboService {
        NiboService::new("token-teste".to_string(), server.base_url())
    }

    #[tokio::test]
    async fn test_buscar_fornecedor_por_documento_encontrado() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/suppliers")
                    .header("apitoken", "token-teste")
                    .query_param("$filter", "document/number eq '11144477735'");
                then.status(200).json_body(serde_json::json!({
                    "items": [{
                        "id": "forn-123",
                        "name": "João da Silva",
                        "document": { "number": "11144477735", "type": "CPF" }
                    }]
                }));
            })
            .await;

        let fornecedor = servico(&server)
            .buscar_fornecedor_por_documento("11144477735")
            .await
            .unwrap();

        mock.assert_async().await;
        let fornecedor = fornecedor.expect("fornecedor deveria existir");
        assert_eq!(fornecedor.id, "forn-123");
        assert_eq!(fornecedor.name, "João da Silva");
    }

    #[tokio::test]
    async fn test_buscar_fornecedor_sem_resultado() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/suppliers");
                then.status(200).json_body(serde_json::json!({ "items": [] }));
            })
            .await;

        let fornecedor = servico(&server)
            .buscar_fornecedor_por_nome("Fornecedor Inexistente")
            .await
            .unwrap();

        assert!(fornecedor.is_none());
    }

    #[tokio::test]
    async fn test_criar_fornecedor_retorna_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/suppliers");
                then.status(201)
                    .json_body(serde_json::json!({ "id": "forn-999", "name": "Novo" }));
            })
            .await;

        let id = servico(&server)
            .criar_fornecedor("Novo", Some("11144477735"))
            .await
            .unwrap();

        assert_eq!(id, "forn-999");
    }

    #[tokio::test]
    async fn test_criar_agendamento_envia_chave_e_codigo() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/schedules/debit")
                    .json_body_partial(
                        r#"{ "pixKey": "+5511987654321", "pixKeyType": 4 }"#,
                    );
                then.status(201)
                    .json_body(serde_json::json!({ "scheduleId": "agend-42" }));
            })
            .await;

        let id = servico(&server)
            .criar_agendamento(NovoAgendamento {
                fornecedor_id: "forn-123",
                valor: 150.0,
                descricao: "Pagamento fornecedor de bebidas",
                vencimento: NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
                chave_pix: "+5511987654321",
                tipo_chave_codigo: 4,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(id, "agend-42");
    }

    #[tokio::test]
    async fn test_erro_http_vira_nibo_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/suppliers");
                then.status(401).body("unauthorized");
            })
            .await;

        let resultado = servico(&server)
            .buscar_fornecedor_por_documento("11144477735")
            .await;

        assert!(matches!(resultado, Err(AppError::NiboApi(_))));
    }
}
