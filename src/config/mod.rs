//! Evaluation of a schema against an environment.

mod loader;
mod resolve;
mod source;
mod validate;
mod values;

pub use loader::load_config;
pub use source::{EnvSource, InvalidUnicode, ProcessEnv};
pub use values::Config;
