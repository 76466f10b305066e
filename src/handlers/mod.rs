pub mod health;
pub mod pagamento;

pub use health::*;
pub use pagamento::*;
