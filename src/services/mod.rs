pub mod inter;
pub mod nibo;
pub mod pagamento;

pub use inter::*;
pub use nibo::*;
pub use pagamento::*;
