use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub nibo: NiboSettings,
    pub inter: InterSettings,
    /// Credenciais bancárias por conta ("conta" do request). Injetadas via
    /// configuração, nunca por tabela fixa no código.
    #[serde(default)]
    pub contas: HashMap<String, ContaSettings>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NiboSettings {
    pub api_token: String,
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InterSettings {
    pub base_url: String,
    /// Escopo OAuth2 solicitado no client-credentials
    #[serde(default = "default_inter_scope")]
    pub scope: String,
}

/// Credenciais do Banco Inter para uma conta específica do negócio
/// (ex.: "bar", "restaurante"). Cada conta tem seu próprio aplicativo
/// registrado no Inter.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContaSettings {
    pub client_id: String,
    pub client_secret: String,
    pub conta_corrente: Option<String>,
    pub descricao: Option<String>,
}

fn default_inter_scope() -> String {
    "pagamento-pix.write".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Variáveis de ambiente específicas têm precedência sobre os arquivos
        if let Ok(token) = std::env::var("NIBO_API_TOKEN") {
            builder = builder.set_override("nibo.api_token", token)?;
        }
        if let Ok(base_url) = std::env::var("NIBO_BASE_URL") {
            builder = builder.set_override("nibo.base_url", base_url)?;
        }
        if let Ok(base_url) = std::env::var("INTER_BASE_URL") {
            builder = builder.set_override("inter.base_url", base_url)?;
        }

        // Prefixo genérico para overrides pontuais (NIBO_INTER_SERVER__PORT etc.)
        builder = builder.add_source(Environment::with_prefix("NIBO_INTER").separator("__"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}
