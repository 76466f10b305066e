//! Classificação de chaves PIX digitadas ou coladas pelo usuário
//!
//! A desambiguação é sequencial, sem backtracking, e a ordem importa:
//! formatos se sobrepõem lexicalmente (uma chave só de dígitos pode ser
//! CPF, celular ou chave aleatória). O primeiro teste que casa decide.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::TipoChavePix;
use crate::pix::{documento, telefone};

// Padrão conservador: local@dominio.tld com TLD de 2 a 4 letras
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,4}$").unwrap());

/// Resultado de uma classificação: o tipo identificado (ou `None`) e a
/// forma canônica da chave para o tipo.
///
/// Quando a classificação falha, `chave_formatada` carrega a entrada
/// original intacta para que o chamador possa reportar o erro sem perder
/// informação.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificacaoChave {
    pub tipo: Option<TipoChavePix>,
    pub chave_formatada: String,
}

impl ClassificacaoChave {
    fn identificada(tipo: TipoChavePix, chave_formatada: String) -> Self {
        Self {
            tipo: Some(tipo),
            chave_formatada,
        }
    }

    fn desconhecida(chave_original: &str) -> Self {
        Self {
            tipo: None,
            chave_formatada: chave_original.to_string(),
        }
    }
}

/// Classifica uma chave PIX em um dos cinco tipos e produz sua forma canônica.
///
/// Ordem dos testes (primeiro que casa vence):
/// 1. e-mail — sintaticamente inambíguo, roda primeiro;
/// 2. CPF — 11 dígitos com checksum válido;
/// 3. CNPJ — 14 dígitos com checksum válido;
/// 4. celular — 11 dígitos com cara de móvel brasileiro (um CPF válido que
///    também tenha formato de celular resolve como CPF, pois roda antes);
/// 5. chave aleatória — heurística de comprimento/hífen.
///
/// Função total: nunca falha. Ausência de tipo é sinalizada por `tipo == None`.
pub fn classificar(chave_bruta: &str) -> ClassificacaoChave {
    let chave = chave_bruta.trim();
    if chave.is_empty() {
        return ClassificacaoChave::desconhecida(chave_bruta);
    }

    if chave.contains('@') && EMAIL_RE.is_match(chave) {
        return ClassificacaoChave::identificada(TipoChavePix::Email, chave.to_lowercase());
    }

    let digitos: String = chave.chars().filter(|c| c.is_ascii_digit()).collect();

    if digitos.len() == 11 && documento::is_valid_cpf(&digitos) {
        return ClassificacaoChave::identificada(TipoChavePix::Cpf, digitos);
    }

    if digitos.len() == 14 && documento::is_valid_cnpj(&digitos) {
        return ClassificacaoChave::identificada(TipoChavePix::Cnpj, digitos);
    }

    if telefone::is_valid_celular(&digitos) {
        return ClassificacaoChave::identificada(
            TipoChavePix::Telefone,
            format!("+55{}", digitos),
        );
    }

    if parece_chave_aleatoria(chave) {
        // Chaves aleatórias preservam a forma original (os hifens fazem
        // parte da chave)
        return ClassificacaoChave::identificada(TipoChavePix::Aleatoria, chave.to_string());
    }

    ClassificacaoChave::desconhecida(chave_bruta)
}

/// Heurística de chave aleatória: 32+ caracteres ou presença de hífen
/// (formato de UUID). Isolada do `classificar` para que um validador de
/// gramática UUID possa substituí-la sem tocar os chamadores.
///
/// Os 32 caracteres correspondem ao comprimento mínimo de um UUID v4 sem
/// hifens; o valor é mantido por paridade de comportamento com o sistema
/// que este middleware substitui.
pub fn parece_chave_aleatoria(chave: &str) -> bool {
    chave.chars().count() >= 32 || chave.contains('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_classificado_e_normalizado() {
        let r = classificar("joao@example.com");
        assert_eq!(r.tipo, Some(TipoChavePix::Email));
        assert_eq!(r.chave_formatada, "joao@example.com");

        let r = classificar("  Joao.Silva@Example.COM  ");
        assert_eq!(r.tipo, Some(TipoChavePix::Email));
        assert_eq!(r.chave_formatada, "joao.silva@example.com");
    }

    #[test]
    fn test_email_mal_formado_nao_e_email() {
        // Sem TLD não casa com o padrão conservador; "@" impede celular/CPF
        let r = classificar("joao@example");
        assert_eq!(r.tipo, None);
    }

    #[test]
    fn test_cpf_com_pontuacao_vira_digitos() {
        let r = classificar("111.444.777-35");
        assert_eq!(r.tipo, Some(TipoChavePix::Cpf));
        assert_eq!(r.chave_formatada, "11144477735");
    }

    #[test]
    fn test_cnpj_com_pontuacao_vira_digitos() {
        let r = classificar("11.222.333/0001-81");
        assert_eq!(r.tipo, Some(TipoChavePix::Cnpj));
        assert_eq!(r.chave_formatada, "11222333000181");
    }

    #[test]
    fn test_celular_recebe_prefixo_55() {
        let r = classificar("(11) 98765-4321");
        assert_eq!(r.tipo, Some(TipoChavePix::Telefone));
        assert_eq!(r.chave_formatada, "+5511987654321");
    }

    #[test]
    fn test_precedencia_cpf_sobre_celular() {
        // "11987654321" tem formato de celular mas não passa no checksum de
        // CPF, então cai no teste de telefone
        let r = classificar("11987654321");
        assert!(!crate::pix::is_valid_cpf("11987654321"));
        assert_eq!(r.tipo, Some(TipoChavePix::Telefone));

        // Já um CPF válido cujo terceiro dígito é '9' casa com os dois
        // formatos; o teste de CPF roda antes e vence
        let cpf_com_cara_de_celular = "11944477756";
        assert!(crate::pix::is_valid_cpf(cpf_com_cara_de_celular));
        assert!(crate::pix::is_valid_celular(cpf_com_cara_de_celular));
        let r = classificar(cpf_com_cara_de_celular);
        assert_eq!(r.tipo, Some(TipoChavePix::Cpf));
        assert_eq!(r.chave_formatada, cpf_com_cara_de_celular);
    }

    #[test]
    fn test_chave_aleatoria_por_hifen() {
        let uuid = "123e4567-e89b-12d3-a456-426614174000";
        let r = classificar(uuid);
        assert_eq!(r.tipo, Some(TipoChavePix::Aleatoria));
        assert_eq!(r.chave_formatada, uuid);
    }

    #[test]
    fn test_chave_aleatoria_por_comprimento() {
        let chave = "0123456789abcdef0123456789abcdef"; // 32 hex, sem hífen
        let r = classificar(chave);
        assert_eq!(r.tipo, Some(TipoChavePix::Aleatoria));
        assert_eq!(r.chave_formatada, chave);
    }

    #[test]
    fn test_entrada_vazia_retorna_sem_tipo() {
        let r = classificar("");
        assert_eq!(r.tipo, None);
        assert_eq!(r.chave_formatada, "");

        let r = classificar("   ");
        assert_eq!(r.tipo, None);
        assert_eq!(r.chave_formatada, "   ");
    }

    #[test]
    fn test_entrada_nao_classificavel_preserva_original() {
        let r = classificar("abc123");
        assert_eq!(r.tipo, None);
        assert_eq!(r.chave_formatada, "abc123");
    }

    #[test]
    fn test_classificacao_e_idempotente_para_documentos() {
        // Reclassificar a forma canônica de um CPF/CNPJ dá o mesmo resultado
        let primeira = classificar("111.444.777-35");
        let segunda = classificar(&primeira.chave_formatada);
        assert_eq!(primeira, segunda);

        let primeira = classificar("11.222.333/0001-81");
        let segunda = classificar(&primeira.chave_formatada);
        assert_eq!(primeira, segunda);
    }

    #[test]
    fn test_heuristica_de_chave_aleatoria_isolada() {
        assert!(parece_chave_aleatoria("tem-hifen"));
        assert!(parece_chave_aleatoria(
            "0123456789abcdef0123456789abcdef"
        ));
        assert!(!parece_chave_aleatoria("curta_sem_hifen"));
    }
}
