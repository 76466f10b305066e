// Biblioteca do middleware NIBO-Inter
// Expõe módulos para uso em testes e binários

pub mod config;
pub mod models;
pub mod pix;
pub mod services;
pub mod utils;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub nibo: services::NiboService,
    pub pagamentos: services::PagamentoService,
}
