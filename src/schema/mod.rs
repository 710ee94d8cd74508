//! Declarative description of the expected environment variables.

mod coerce;
mod rule;
mod validate;

use std::collections::BTreeMap;

pub use coerce::{render, Coercion, CoercionError};
pub use rule::{FieldRule, Pattern};
pub(crate) use validate::schema_violations;

use crate::config::{load_config, Config, EnvSource, ProcessEnv};
use crate::Error;

/// Flat mapping from field name to its [`FieldRule`].
///
/// Fields are kept sorted by name, so error messages list them in a stable
/// order. Evaluating a schema never modifies it.
///
/// ## Example
///
/// ```no_run
/// use envrules::{Coercion, FieldRule, Schema};
///
/// let config = Schema::new()
///     .field("DATABASE_URL", FieldRule::new().required(true))
///     .field("PORT", FieldRule::new().coerce(Coercion::Number).with_default(5432))
///     .field("LOG_LEVEL", FieldRule::new().one_of(["debug", "info", "warn"]).with_default("info"))
///     .load()?;
///
/// let port = config.get_integer("PORT");
/// # Ok::<(), envrules::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Schema {
    fields: BTreeMap<String, FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any rule previously registered under `name`.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) -> Option<FieldRule> {
        self.fields.insert(name.into(), rule)
    }

    /// Returns the rule registered for `name`.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks the schema without reading any environment.
    pub fn validate(&self) -> Result<(), Error> {
        schema_violations(self).into_result(Error::SchemaValidation)
    }

    /// Evaluates the schema against `source`.
    pub fn load_from(&self, source: &impl EnvSource) -> Result<Config, Error> {
        load_config(self, source)
    }

    /// Evaluates the schema against the process environment.
    pub fn load(&self) -> Result<Config, Error> {
        load_config(self, &ProcessEnv)
    }
}

impl<N: Into<String>> FromIterator<(N, FieldRule)> for Schema {
    fn from_iter<I: IntoIterator<Item = (N, FieldRule)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(n, r)| (n.into(), r)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_replace_rule() {
        let mut schema = Schema::new().field("KEY", FieldRule::new().with_default("a"));
        assert!(schema.get("KEY").is_some());
        assert!(schema.get("OTHER").is_none());

        let previous = schema.insert("KEY", FieldRule::new().required(true));
        assert!(previous.is_some());
        assert!(schema.get("KEY").is_some_and(FieldRule::is_required));
        assert_eq!(schema.len(), 1);
    }
}
