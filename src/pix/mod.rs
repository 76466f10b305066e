//! Núcleo puro de validação e classificação de chaves PIX
//!
//! Todas as funções deste módulo são síncronas, determinísticas e sem
//! efeitos colaterais: recebem strings e devolvem valores. Nada aqui
//! conhece HTTP, configuração ou persistência.

pub mod classificador;
pub mod documento;
pub mod moeda;
pub mod telefone;

pub use classificador::{classificar, ClassificacaoChave};
pub use documento::{is_valid_cnpj, is_valid_cpf};
pub use moeda::{parse_brl, MoedaError};
pub use telefone::is_valid_celular;
