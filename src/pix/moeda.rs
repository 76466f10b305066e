//! Parsing de valores monetários no formato brasileiro ("R$ 1.234,56")
//!
//! O parser assume a formatação brasileira incondicionalmente: ponto é
//! separador de milhar e vírgula é separador decimal. Não há detecção de
//! locale.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MoedaError {
    #[error("valor monetário inválido: {0:?}")]
    Invalido(String),
}

/// Converte uma string no formato brasileiro de moeda em `f64`.
///
/// Remove o marcador "R$", descarta os pontos de milhar, troca a primeira
/// vírgula por ponto decimal e faz o parse. Entradas não numéricas ou que
/// produzem valor não finito retornam `MoedaError::Invalido`.
///
/// A regra de negócio de valor positivo (pagamento PIX exige valor > 0)
/// pertence ao chamador, não ao parser.
pub fn parse_brl(texto: &str) -> Result<f64, MoedaError> {
    let limpo = texto
        .replace("R$", "")
        .replace('.', "")
        .replacen(',', ".", 1)
        .trim()
        .to_string();

    let valor: f64 = limpo
        .parse()
        .map_err(|_| MoedaError::Invalido(texto.to_string()))?;

    if !valor.is_finite() {
        return Err(MoedaError::Invalido(texto.to_string()));
    }

    Ok(valor)
}
