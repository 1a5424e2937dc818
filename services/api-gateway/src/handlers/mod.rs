pub mod comparison;
pub mod health;
pub mod index;

pub use comparison::*;
pub use health::*;
pub use index::*;
