use std::fmt;
use std::sync::Arc;

use regex::Regex;
use toml::Value;

use super::coerce::Coercion;
use crate::error::CastFailure;

type PredicateFn = dyn Fn(&Value) -> bool + Send + Sync;

/// A regular expression attached to a field, kept even when it failed to
/// compile so schema validation can report it.
#[derive(Debug, Clone)]
pub enum Pattern {
    Compiled(Regex),
    Invalid { source: String, error: regex::Error },
}

impl Pattern {
    fn parse(source: &str) -> Self {
        match Regex::new(source) {
            Ok(re) => Pattern::Compiled(re),
            Err(error) => Pattern::Invalid {
                source: source.to_string(),
                error,
            },
        }
    }

    /// The compiled expression, or `None` if the pattern failed to compile.
    pub fn regex(&self) -> Option<&Regex> {
        match self {
            Pattern::Compiled(re) => Some(re),
            Pattern::Invalid { .. } => None,
        }
    }
}

/// Declarative rules for a single environment variable.
///
/// ## Example
///
/// ```
/// use envrules::{Coercion, FieldRule};
///
/// let port = FieldRule::new()
///     .env("APP_PORT")
///     .coerce(Coercion::Number)
///     .with_default(8080)
///     .validator(|v| v.as_integer().is_some_and(|p| (1..=65535).contains(&p)));
/// ```
#[derive(Clone, Default)]
#[must_use]
pub struct FieldRule {
    pub(crate) env: Option<String>,
    pub(crate) default: Option<Value>,
    pub(crate) required: bool,
    pub(crate) coercion: Coercion,
    pub(crate) one_of: Option<Vec<Value>>,
    pub(crate) pattern: Option<Pattern>,
    pub(crate) validator: Option<Arc<PredicateFn>>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads from `key` instead of the field's own name.
    pub fn env(mut self, key: impl Into<String>) -> Self {
        self.env = Some(key.into());
        self
    }

    /// Fallback used when the variable is not set.
    ///
    /// The default goes through the field's coercion like an environment value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the variable as mandatory. A required field cannot carry a default.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn coerce(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }

    /// Shorthand for `coerce(Coercion::custom(cast))`.
    pub fn cast<F>(self, cast: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CastFailure> + Send + Sync + 'static,
    {
        self.coerce(Coercion::custom(cast))
    }

    /// Restricts the cast value to one of `values`.
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Requires the value's string form to match `pattern`.
    ///
    /// An invalid pattern is reported when the schema is validated.
    pub fn matches(mut self, pattern: &str) -> Self {
        self.pattern = Some(Pattern::parse(pattern));
        self
    }

    pub fn matches_regex(mut self, regex: Regex) -> Self {
        self.pattern = Some(Pattern::Compiled(regex));
        self
    }

    /// Custom predicate over the cast value.
    pub fn validator<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(predicate));
        self
    }

    /// Key looked up in the environment for a field called `name`.
    pub fn source_key<'a>(&'a self, name: &'a str) -> &'a str {
        self.env.as_deref().unwrap_or(name)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn coercion(&self) -> &Coercion {
        &self.coercion
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("env", &self.env)
            .field("default", &self.default)
            .field("required", &self.required)
            .field("coercion", &self.coercion)
            .field("one_of", &self.one_of)
            .field("pattern", &self.pattern)
            .field("validator", &self.validator.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_key_defaults_to_name() {
        let rule = FieldRule::new();
        assert_eq!(rule.source_key("KEY"), "KEY");

        let rule = FieldRule::new().env("CUSTOM_KEY");
        assert_eq!(rule.source_key("KEY"), "CUSTOM_KEY");
    }

    #[test]
    fn test_matches_keeps_invalid_pattern() {
        let rule = FieldRule::new().matches("(unclosed");
        assert!(matches!(rule.pattern, Some(Pattern::Invalid { .. })));
        assert!(rule.pattern.as_ref().and_then(Pattern::regex).is_none());

        let rule = FieldRule::new().matches("Hello.*");
        assert!(rule.pattern.unwrap().regex().unwrap().is_match("Hello World"));
    }

    #[test]
    fn test_one_of_converts_values() {
        let rule = FieldRule::new().one_of(["A", "B"]);
        assert_eq!(
            rule.one_of.unwrap(),
            vec![Value::String("A".into()), Value::String("B".into())]
        );
    }
}
