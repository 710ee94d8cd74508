//! Declarative, typed loading of environment variables.
//!
//! A [`Schema`] maps field names to [`FieldRule`]s. Loading validates the
//! schema, reads and casts each variable, then checks required, enum,
//! regex and custom rules, reporting every violation in one [`Error`].

pub mod config;
mod error;
pub mod schema;

pub use config::{load_config, Config, EnvSource, InvalidUnicode, ProcessEnv};
pub use error::{CastFailure, Error, Violations};
pub use schema::{Coercion, CoercionError, FieldRule, Schema};

/// Evaluates `schema` against the process environment.
pub fn load(schema: &Schema) -> Result<Config, Error> {
    load_config(schema, &ProcessEnv)
}
