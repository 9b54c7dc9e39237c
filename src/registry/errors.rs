/*!
`errors.rs`

Structured error types for the registry core.

Design rule: nothing in `registry::*` ever prints. Validation and dispatch
failures are returned as matchable enum variants; the presentation layer
(`src/cmd/`) decides how (and whether) to render them.

Error families:
  - ValidationError : per-parameter failures (recoverable, reported to caller)
  - DuplicateCommand: registry construction misuse
  - DispatchError   : lookup / validation / handler failures for one dispatch
  - ArgAccessError  : typed accessor misuse inside a handler body
*/

use thiserror::Error;

use super::params::ParamKind;

/// A failure produced while validating a raw argument bag against a schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required parameter was absent from the raw bag.
    #[error("missing required parameter '{0}'")]
    MissingRequired(String),

    /// A supplied value's runtime kind did not match the declared kind.
    #[error("parameter '{name}' expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ParamKind,
        actual: &'static str,
    },

    /// The raw bag contained a key no `ParamSpec` declares (strict policy).
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
}

impl ValidationError {
    /// Name of the offending parameter, whichever variant this is.
    pub fn parameter(&self) -> &str {
        match self {
            ValidationError::MissingRequired(name) => name,
            ValidationError::TypeMismatch { name, .. } => name,
            ValidationError::UnknownParameter(name) => name,
        }
    }
}

/// Attempt to register a command under a name that is already taken.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("command '{0}' is already registered")]
pub struct DuplicateCommand(pub String);

/// A failure surfaced by a single `Registry::dispatch` call.
///
/// Handler panics are not caught; a handler signals failure by returning
/// `Err`, which is wrapped here with its command name and original cause.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No command is registered under the requested name.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Argument validation failed before the handler ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The handler body returned an error; the cause is preserved.
    #[error("command '{name}' failed: {source}")]
    HandlerFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    /// True for failures the caller can fix by adjusting input
    /// (as opposed to handler/backend faults).
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            DispatchError::UnknownCommand(_) | DispatchError::Validation(_)
        )
    }
}

/// Typed-accessor failure inside a handler.
///
/// Reaching this for a declared parameter indicates a schema/handler drift
/// (the handler asked for a name or kind its own `ParamSpec`s never promise).
/// Handlers propagate it with `?`; dispatch wraps it as `HandlerFailed`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgAccessError {
    #[error("argument '{0}' is not present")]
    NotPresent(String),

    #[error("argument '{name}' is not a {wanted}")]
    WrongKind { name: String, wanted: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_messages() {
        let e = ValidationError::MissingRequired("key".into());
        assert_eq!(e.to_string(), "missing required parameter 'key'");
        assert_eq!(e.parameter(), "key");

        let e = ValidationError::TypeMismatch {
            name: "limit".into(),
            expected: ParamKind::Integer,
            actual: "string",
        };
        assert_eq!(e.to_string(), "parameter 'limit' expects integer, got string");
    }

    #[test]
    fn dispatch_error_classification() {
        assert!(DispatchError::UnknownCommand("foo".into()).is_usage_error());
        assert!(
            DispatchError::Validation(ValidationError::UnknownParameter("x".into()))
                .is_usage_error()
        );
        let handler = DispatchError::HandlerFailed {
            name: "kv_get".into(),
            source: anyhow::anyhow!("backend offline"),
        };
        assert!(!handler.is_usage_error());
        assert!(handler.to_string().contains("kv_get"));
    }

    #[test]
    fn handler_failure_preserves_cause() {
        let err = DispatchError::HandlerFailed {
            name: "d1_query".into(),
            source: anyhow::anyhow!("syntax error near SELECT"),
        };
        let cause = std::error::Error::source(&err).map(|c| c.to_string());
        assert_eq!(cause.as_deref(), Some("syntax error near SELECT"));
    }
}
