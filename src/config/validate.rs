use toml::Value;

use super::Config;
use crate::error::Violations;
use crate::schema::{render, FieldRule, Schema};

/// Checks resolved values against the schema's value rules.
///
/// Runs over all fields and collects every violation. Absent values only
/// take part in the required check.
pub fn config_violations(config: &Config, schema: &Schema) -> Violations {
    let mut violations = Violations::new();

    for (name, rule) in schema.iter() {
        match config.get(name) {
            None if rule.is_required() => violations.push(format!(
                "{name} is required but env var [{}] is not set",
                rule.source_key(name)
            )),
            None => {}
            Some(value) => check_value(name, value, rule, &mut violations),
        }
    }

    violations
}

fn check_value(name: &str, value: &Value, rule: &FieldRule, violations: &mut Violations) {
    let shown = render(value);

    if let Some(allowed) = &rule.one_of {
        if !allowed.contains(value) {
            let allowed: Vec<String> = allowed.iter().map(render).collect();
            violations.push(format!(
                "{name} invalid value '{shown}', doesn't match enum [{}]",
                allowed.join(",")
            ));
        }
    }

    if let Some(predicate) = &rule.validator {
        if !predicate(value) {
            violations.push(format!("{name} invalid value '{shown}', custom validator fails"));
        }
    }

    // Invalid patterns never get this far; schema validation rejects them.
    if let Some(re) = rule.pattern.as_ref().and_then(|p| p.regex()) {
        if !re.is_match(&shown) {
            violations.push(format!(
                "{name} invalid value '{shown}', doesn't match regex [{}]",
                re.as_str()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, Option<Value>)]) -> Config {
        let mut config = Config::default();
        for (name, value) in pairs {
            config.insert(name, value.clone());
        }
        config
    }

    fn s(v: &str) -> Option<Value> {
        Some(Value::String(v.into()))
    }

    #[test]
    fn test_required_message_uses_source_key() {
        let schema = Schema::new().field("DB", FieldRule::new().required(true).env("DATABASE_URL"));
        let violations = config_violations(&config(&[("DB", None)]), &schema);
        assert_eq!(
            violations.messages(),
            ["DB is required but env var [DATABASE_URL] is not set"]
        );
    }

    #[test]
    fn test_enum_membership() {
        let schema = Schema::new().field("KEY", FieldRule::new().one_of(["A", "B", "C"]));
        assert!(config_violations(&config(&[("KEY", s("B"))]), &schema).is_empty());

        let violations = config_violations(&config(&[("KEY", s("Z"))]), &schema);
        assert_eq!(
            violations.messages(),
            ["KEY invalid value 'Z', doesn't match enum [A,B,C]"]
        );
    }

    #[test]
    fn test_enum_compares_cast_values() {
        let schema = Schema::new().field("LEVEL", FieldRule::new().one_of([1, 2, 3]));
        let ok = config(&[("LEVEL", Some(Value::Integer(2)))]);
        assert!(config_violations(&ok, &schema).is_empty());

        // the uncast string "2" is not the integer 2
        let raw = config(&[("LEVEL", s("2"))]);
        assert_eq!(config_violations(&raw, &schema).len(), 1);
    }

    #[test]
    fn test_validator() {
        let schema = Schema::new().field(
            "KEY",
            FieldRule::new().validator(|v| v.as_integer().is_some_and(|n| n > 10)),
        );
        let ok = config(&[("KEY", Some(Value::Integer(11)))]);
        assert!(config_violations(&ok, &schema).is_empty());

        let bad = config(&[("KEY", Some(Value::Integer(9)))]);
        assert_eq!(
            config_violations(&bad, &schema).messages(),
            ["KEY invalid value '9', custom validator fails"]
        );
    }

    #[test]
    fn test_match_tests_rendered_value() {
        let schema = Schema::new()
            .field("GREETING", FieldRule::new().matches("Hello.*"))
            .field("PORT", FieldRule::new().matches(r"^\d{4}$"));

        let ok = config(&[("GREETING", s("Hello World")), ("PORT", Some(Value::Integer(8080)))]);
        assert!(config_violations(&ok, &schema).is_empty());

        let bad = config(&[("GREETING", s("Goodbye World")), ("PORT", Some(Value::Integer(80)))]);
        let violations = config_violations(&bad, &schema);
        assert_eq!(
            violations.messages(),
            [
                "GREETING invalid value 'Goodbye World', doesn't match regex [Hello.*]",
                r"PORT invalid value '80', doesn't match regex [^\d{4}$]",
            ]
        );
    }

    #[test]
    fn test_absent_optional_skips_value_checks() {
        let schema = Schema::new().field(
            "KEY",
            FieldRule::new()
                .one_of(["A"])
                .matches("^A$")
                .validator(|_| false),
        );
        assert!(config_violations(&config(&[("KEY", None)]), &schema).is_empty());
    }

    #[test]
    fn test_collects_all_rules_on_one_field() {
        let schema = Schema::new().field(
            "KEY",
            FieldRule::new()
                .one_of(["A"])
                .matches("^A$")
                .validator(|_| false),
        );
        let violations = config_violations(&config(&[("KEY", s("B"))]), &schema);
        assert_eq!(violations.len(), 3);
    }
}
