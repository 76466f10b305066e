//! Validação de celular brasileiro (DDD + número móvel de 9 dígitos)

/// Verifica se a string de dígitos tem o formato de um celular brasileiro.
///
/// Regras: exatamente 11 dígitos, o terceiro dígito é '9' (prefixo dos
/// números móveis após o DDD) e o DDD está na faixa 11–99.
pub fn is_valid_celular(digitos: &str) -> bool {
    if digitos.len() != 11 || !digitos.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    if digitos.as_bytes()[2] != b'9' {
        return false;
    }

    let ddd: u32 = match digitos[..2].parse() {
        Ok(d) => d,
        Err(_) => return false,
    };

    (11..=99).contains(&ddd)
}
