pub mod catalog;
pub mod refresh;
pub mod suggest;

pub use catalog::*;
pub use refresh::*;
pub use suggest::*;
