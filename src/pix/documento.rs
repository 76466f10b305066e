//! Validação de dígitos verificadores de CPF e CNPJ
//!
//! Os dois documentos usam o mesmo esquema módulo 11: soma ponderada dos
//! dígitos, resto < 2 produz dígito 0, caso contrário 11 - resto. Só mudam
//! os vetores de pesos.

const PESOS_CPF_1: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const PESOS_CPF_2: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];
const PESOS_CNPJ_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const PESOS_CNPJ_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Valida os dois dígitos verificadores de um CPF (11 dígitos ASCII).
///
/// Qualquer entrada com comprimento diferente de 11, com caracteres não
/// numéricos ou com todos os dígitos iguais (sequências de teste como
/// "00000000000") retorna `false` sem tentar o checksum.
pub fn is_valid_cpf(digitos: &str) -> bool {
    let d = match parse_digitos(digitos, 11) {
        Some(d) => d,
        None => return false,
    };

    if todos_iguais(&d) {
        return false;
    }

    d[9] == digito_mod11(&d[..9], &PESOS_CPF_1) && d[10] == digito_mod11(&d[..10], &PESOS_CPF_2)
}

/// Valida os dois dígitos verificadores de um CNPJ (14 dígitos ASCII).
///
/// Mesma regra módulo 11 do CPF, com os vetores de pesos próprios do CNPJ.
pub fn is_valid_cnpj(digitos: &str) -> bool {
    let d = match parse_digitos(digitos, 14) {
        Some(d) => d,
        None => return false,
    };

    if todos_iguais(&d) {
        return false;
    }

    d[12] == digito_mod11(&d[..12], &PESOS_CNPJ_1) && d[13] == digito_mod11(&d[..13], &PESOS_CNPJ_2)
}

/// Converte a string em vetor de dígitos, exigindo o comprimento exato.
fn parse_digitos(texto: &str, esperado: usize) -> Option<Vec<u32>> {
    if texto.len() != esperado {
        return None;
    }
    texto.chars().map(|c| c.to_digit(10)).collect()
}

fn todos_iguais(digitos: &[u32]) -> bool {
    digitos.iter().all(|&d| d == digitos[0])
}

/// Dígito verificador módulo 11: soma ponderada, resto < 2 vira 0.
fn digito_mod11(digitos: &[u32], pesos: &[u32]) -> u32 {
    let soma: u32 = digitos.iter().zip(pesos).map(|(d, p)| d * p).sum();
    let resto = soma % 11;
    if resto < 2 {
        0
    } else {
        11 - resto
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_valido_de_referencia() {
        assert!(is_valid_cpf("11144477735"));
    }

    #[test]
    fn test_cpf_digitos_verificadores_errados() {
        // Trocar qualquer um dos dois dígitos verificadores invalida o CPF
        assert!(!is_valid_cpf("11144477734"));
        assert!(!is_valid_cpf("11144477745"));
    }

    #[test]
    fn test_cpf_sequencias_identicas_sao_invalidas() {
        for d in 0..=9 {
            let cpf: String = std::iter::repeat(char::from_digit(d, 10).unwrap())
                .take(11)
                .collect();
            assert!(!is_valid_cpf(&cpf), "CPF {} deveria ser inválido", cpf);
        }
    }

    #[test]
    fn test_cpf_comprimento_errado_falha_sem_panico() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("123"));
        assert!(!is_valid_cpf("111444777350"));
        assert!(!is_valid_cpf("1114447773"));
    }

    #[test]
    fn test_cpf_com_caracteres_nao_numericos() {
        // O chamador deve limpar a pontuação antes; aqui só garantimos que
        // entrada suja não passa nem quebra
        assert!(!is_valid_cpf("111.444.777"));
        assert!(!is_valid_cpf("1114447773a"));
    }

    #[test]
    fn test_cnpj_valido() {
        // CNPJ da Receita Federal usado em documentação pública
        assert!(is_valid_cnpj("11222333000181"));
    }

    #[test]
    fn test_cnpj_digito_verificador_errado() {
        assert!(!is_valid_cnpj("11222333000182"));
        assert!(!is_valid_cnpj("11222333000191"));
    }

    #[test]
    fn test_cnpj_sequencias_identicas_sao_invalidas() {
        for d in 0..=9 {
            let cnpj: String = std::iter::repeat(char::from_digit(d, 10).unwrap())
                .take(14)
                .collect();
            assert!(!is_valid_cnpj(&cnpj), "CNPJ {} deveria ser inválido", cnpj);
        }
    }

    #[test]
    fn test_cnpj_comprimento_errado_falha_sem_panico() {
        assert!(!is_valid_cnpj(""));
        assert!(!is_valid_cnpj("11222333"));
        assert!(!is_valid_cnpj("112223330001811"));
    }
}
