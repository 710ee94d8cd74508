use std::fmt;

use thiserror::Error;

/// Boxed failure returned by a cast function.
pub type CastFailure = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error type for the envrules library.
///
/// The three variants are the three ways an evaluation can fail, in the
/// order they can occur: the schema is malformed, a raw value could not be
/// cast, or the resolved values break the schema's rules.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{0}")]
    SchemaValidation(Violations),

    #[error("failed to cast `{field}`: {source}")]
    Cast {
        field: String,
        #[source]
        source: CastFailure,
    },

    #[error("{0}")]
    ConfigValidation(Violations),
}

impl Error {
    /// Returns the collected violations for the schema and config variants.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Error::SchemaValidation(v) | Error::ConfigValidation(v) => Some(v),
            Error::Cast { .. } => None,
        }
    }

    /// Returns the name of the field whose cast failed.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Cast { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Every rule violation found in one validation pass.
///
/// Displays as a newline-separated bullet list, one `- ` line per message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Returns `Ok(())` when nothing was collected, otherwise wraps the
    /// violations with `kind`.
    pub(crate) fn into_result(self, kind: fn(Violations) -> Error) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(kind(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "- {message}")?;
        }
        Ok(())
    }
}
