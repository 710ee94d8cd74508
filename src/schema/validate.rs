use super::rule::Pattern;
use super::Schema;
use crate::error::Violations;

/// Checks the schema's rules for internal consistency.
///
/// Every field is inspected before returning, so one call reports all
/// malformed rules at once.
pub fn schema_violations(schema: &Schema) -> Violations {
    let mut violations = Violations::new();

    for (name, rule) in schema.iter() {
        if rule.required && rule.default.is_some() {
            violations.push(format!("{name} can't be required and have a default value"));
        }
        if let Some(Pattern::Invalid { error, .. }) = &rule.pattern {
            violations.push(format!("{name} match must be a regular expression: {error}"));
        }
    }

    violations
}
