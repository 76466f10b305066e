//! Tipos de chave PIX e o mapeamento de códigos usado pelo NIBO

use serde::{Deserialize, Serialize};

/// Os cinco tipos de chave PIX reconhecidos pelo arranjo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoChavePix {
    #[serde(rename = "CPF")]
    Cpf,
    #[serde(rename = "CNPJ")]
    Cnpj,
    #[serde(rename = "EMAIL")]
    Email,
    #[serde(rename = "PHONE")]
    Telefone,
    #[serde(rename = "RANDOM")]
    Aleatoria,
}

impl TipoChavePix {
    /// Código numérico do tipo de chave na API de agendamentos do NIBO.
    pub fn codigo_nibo(self) -> u8 {
        match self {
            TipoChavePix::Cpf => 1,
            TipoChavePix::Cnpj => 2,
            TipoChavePix::Email => 3,
            TipoChavePix::Telefone => 4,
            TipoChavePix::Aleatoria => 5,
        }
    }

    /// Código NIBO para um tipo possivelmente ausente.
    ///
    /// Chave não classificada cai no código 3 (e-mail), que é o padrão
    /// aceito pelo NIBO para chaves de formato livre.
    pub fn codigo_nibo_para(tipo: Option<TipoChavePix>) -> u8 {
        tipo.map_or(3, TipoChavePix::codigo_nibo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapeamento_de_codigos_nibo() {
        assert_eq!(TipoChavePix::Cpf.codigo_nibo(), 1);
        assert_eq!(TipoChavePix::Cnpj.codigo_nibo(), 2);
        assert_eq!(TipoChavePix::Email.codigo_nibo(), 3);
        assert_eq!(TipoChavePix::Telefone.codigo_nibo(), 4);
        assert_eq!(TipoChavePix::Aleatoria.codigo_nibo(), 5);
    }

    #[test]
    fn test_tipo_ausente_usa_codigo_padrao() {
        assert_eq!(TipoChavePix::codigo_nibo_para(None), 3);
        assert_eq!(
            TipoChavePix::codigo_nibo_para(Some(TipoChavePix::Cnpj)),
            2
        );
    }

    #[test]
    fn test_serializacao_usa_nomes_do_arranjo() {
        assert_eq!(
            serde_json::to_string(&TipoChavePix::Telefone).unwrap(),
            "\"PHONE\""
        );
        assert_eq!(
            serde_json::from_str::<TipoChavePix>("\"RANDOM\"").unwrap(),
            TipoChavePix::Aleatoria
        );
    }
}
