use tracing::debug;

use super::resolve::resolve_values;
use super::validate::config_violations;
use super::{Config, EnvSource};
use crate::schema::{schema_violations, Schema};
use crate::Error;

/// Evaluates `schema` against `source`.
///
/// The schema is checked before the environment is read, values are then
/// resolved and cast, and finally every value rule is checked. Schema and
/// value violations are reported all at once; a cast failure aborts
/// immediately.
pub fn load_config(schema: &Schema, source: &impl EnvSource) -> Result<Config, Error> {
    debug!(fields = schema.len(), "loading config from environment");

    let violations = schema_violations(schema);
    if !violations.is_empty() {
        debug!(count = violations.len(), "schema rejected");
    }
    violations.into_result(Error::SchemaValidation)?;

    let config = resolve_values(schema, source)?;

    let violations = config_violations(&config, schema);
    if !violations.is_empty() {
        debug!(count = violations.len(), "config rejected");
    }
    violations.into_result(Error::ConfigValidation)?;

    Ok(config)
}
