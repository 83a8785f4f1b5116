//! Command implementations.

pub mod expand;
pub mod generate;
pub mod inspect;
pub mod play;
pub mod validate;
