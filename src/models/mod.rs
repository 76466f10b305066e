pub mod pagamento;
pub mod pix;

pub use pagamento::*;
pub use pix::*;
