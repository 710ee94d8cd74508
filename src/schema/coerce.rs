//! Cast strategies applied to raw values after resolution.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use toml::value::Datetime;
use toml::Value;

use crate::error::CastFailure;

type CastFn = dyn Fn(&str) -> Result<Value, CastFailure> + Send + Sync;

/// How a raw value is turned into a typed one.
#[derive(Clone, Default)]
pub enum Coercion {
    /// Keep the raw value as-is.
    #[default]
    Identity,
    /// `true`/`1`/`"yes"` or `false`/`0`/`"no"`; anything else fails.
    Boolean,
    /// Integer when the text looks like one (optional `+`/`-` sign), float
    /// otherwise. Empty or blank text is an error, not zero.
    Number,
    /// RFC 3339 / TOML datetime.
    Datetime,
    /// Caller-supplied cast over the raw string form.
    Custom(Arc<CastFn>),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoercionError {
    #[error("invalid boolean value '{0}'")]
    InvalidBoolean(String),

    #[error("invalid number value '{0}'")]
    InvalidNumber(String),

    #[error("invalid datetime value '{value}': {source}")]
    InvalidDatetime {
        value: String,
        source: toml::value::DatetimeParseError,
    },

    #[error("cannot cast {kind} value '{value}' to {target}")]
    Unsupported {
        kind: &'static str,
        value: String,
        target: &'static str,
    },
}

impl Coercion {
    /// Wraps a cast function.
    pub fn custom<F>(cast: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CastFailure> + Send + Sync + 'static,
    {
        Coercion::Custom(Arc::new(cast))
    }

    /// Applies the cast to a raw value.
    pub fn apply(&self, raw: &Value) -> Result<Value, CastFailure> {
        match self {
            Coercion::Identity => Ok(raw.clone()),
            Coercion::Boolean => Ok(Value::Boolean(to_bool(raw)?)),
            Coercion::Number => Ok(to_number(raw)?),
            Coercion::Datetime => Ok(Value::Datetime(to_datetime(raw)?)),
            Coercion::Custom(cast) => match raw {
                Value::String(s) => cast(s),
                other => cast(&render(other)),
            },
        }
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coercion::Identity => f.write_str("Identity"),
            Coercion::Boolean => f.write_str("Boolean"),
            Coercion::Number => f.write_str("Number"),
            Coercion::Datetime => f.write_str("Datetime"),
            Coercion::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

pub fn to_bool(raw: &Value) -> Result<bool, CoercionError> {
    match raw {
        Value::Boolean(b) => Ok(*b),
        Value::Integer(1) => Ok(true),
        Value::Integer(0) => Ok(false),
        Value::Float(f) if *f == 1.0 => Ok(true),
        Value::Float(f) if *f == 0.0 => Ok(false),
        Value::String(s) => match s.as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(CoercionError::InvalidBoolean(s.clone())),
        },
        other => Err(CoercionError::InvalidBoolean(render(other))),
    }
}

fn to_number(raw: &Value) -> Result<Value, CoercionError> {
    match raw {
        Value::Integer(_) | Value::Float(_) => Ok(raw.clone()),
        Value::String(s) => {
            let s = s.trim();
            if looks_like_integer(s) {
                if let Ok(i) = s.parse::<i64>() {
                    return Ok(Value::Integer(i));
                }
            }
            s.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| CoercionError::InvalidNumber(s.to_string()))
        }
        other => Err(unsupported(other, "number")),
    }
}

fn to_datetime(raw: &Value) -> Result<Datetime, CoercionError> {
    match raw {
        Value::Datetime(dt) => Ok(*dt),
        Value::String(s) => s
            .parse::<Datetime>()
            .map_err(|source| CoercionError::InvalidDatetime {
                value: s.clone(),
                source,
            }),
        other => Err(unsupported(other, "datetime")),
    }
}

fn unsupported(value: &Value, target: &'static str) -> CoercionError {
    CoercionError::Unsupported {
        kind: value.type_str(),
        value: render(value),
        target,
    }
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Renders a value the way it appears in messages and regex tests.
///
/// Strings are returned verbatim; arrays and tables use TOML inline syntax.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(_) | Value::Table(_) => value.to_string(),
    }
}
