//! Argument overrides and substitution

mod overrides;
mod substitution;

pub use overrides::*;
pub use substitution::*;
