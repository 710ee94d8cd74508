//! Raw value selection and casting.

use toml::Value;
use tracing::{debug, trace};

use super::source::InvalidUnicode;
use super::{Config, EnvSource};
use crate::error::CastFailure;
use crate::schema::{FieldRule, Schema};
use crate::Error;

/// Resolves and casts every field of `schema` from `source`.
///
/// Stops at the first cast failure: a value that cannot be cast leaves
/// nothing meaningful to validate for that field.
pub fn resolve_values(schema: &Schema, source: &impl EnvSource) -> Result<Config, Error> {
    let mut config = Config::default();

    for (name, rule) in schema.iter() {
        let raw = raw_value(name, rule, source).map_err(|e| cast_error(name, e.into()))?;
        let value = match raw {
            Some(raw) => Some(
                rule.coercion()
                    .apply(&raw)
                    .map_err(|cause| cast_error(name, cause))?,
            ),
            None => None,
        };
        config.insert(name, value);
    }

    Ok(config)
}

fn cast_error(name: &str, cause: CastFailure) -> Error {
    debug!(field = name, "cast failed");
    Error::Cast {
        field: name.to_string(),
        source: cause,
    }
}

/// Picks the environment value, falling back to the default only for
/// optional fields. A set variable always wins over the default, even when
/// its value cannot be read.
fn raw_value(
    name: &str,
    rule: &FieldRule,
    source: &impl EnvSource,
) -> Result<Option<Value>, InvalidUnicode> {
    let key = rule.source_key(name);

    if let Some(value) = source.get(key)? {
        trace!(field = name, key, "read from environment");
        return Ok(Some(Value::String(value)));
    }

    if rule.is_required() {
        trace!(field = name, key, "required variable not set");
        return Ok(None);
    }

    match rule.default_value() {
        Some(default) => {
            trace!(field = name, key, "using default");
            Ok(Some(default.clone()))
        }
        None => {
            trace!(field = name, key, "not set");
            Ok(None)
        }
    }
}
