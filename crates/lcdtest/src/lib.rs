pub use crate::actions::run;
pub use crate::args::get_args as args;

pub(crate) mod actions;
pub(crate) mod args;
pub mod interrupt;
pub mod patterns;
pub(crate) mod preflight;
