use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::{borrow::Cow, error::Error as StdError};
use thiserror::Error;

/// Who is likely responsible for a failure, so the host can decide whether
/// to abort the job, skip the row or report a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Malformed input data.
    Input,
    /// A defect in the function or the host.
    Bug,
    /// The environment the job runs in (I/O, remote services).
    RemoteEnvironment,
    /// A generic execution error.
    Error,
}

/// Error raised by a function while evaluating one row.
///
/// Both variants are invalid-argument errors: they are never retryable and
/// point at a malformed call site or a schema mismatch upstream.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
pub enum ExecError {
    /// The tuple carried more arguments than the function accepts.
    #[error("Wrong number of arguments > {max}")]
    WrongNumberOfArguments { max: usize, actual: usize },

    /// An argument's runtime type is not one the function accepts.
    #[error("Invalid data type for argument {type_name}")]
    InvalidDataType { type_name: &'static str },
}

impl ExecError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExecError::WrongNumberOfArguments { .. } | ExecError::InvalidDataType { .. } => {
                ErrorSeverity::Error
            }
        }
    }
}

impl DetailedError for ExecError {
    fn error_code(&self) -> Cow<'static, str> {
        match self {
            Self::WrongNumberOfArguments { .. } => Cow::from("WrongNumberOfArguments"),
            Self::InvalidDataType { .. } => Cow::from("InvalidDataType"),
        }
    }
}

/// Errors detected while type-checking a call site, before any row is
/// evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
pub enum PlanError {
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Alias '{0}' is already defined")]
    DuplicateAlias(String),

    #[error("No signature of {name} accepts ({args}); expected one of: {expected}")]
    NoMatchingSignature {
        name: String,
        args: String,
        expected: String,
    },
}

impl DetailedError for PlanError {
    fn error_code(&self) -> Cow<'static, str> {
        match self {
            Self::UnknownFunction(_) => Cow::from("UnknownFunction"),
            Self::DuplicateAlias(_) => Cow::from("DuplicateAlias"),
            Self::NoMatchingSignature { .. } => Cow::from("NoMatchingSignature"),
        }
    }
}

/// Error trait which errors reported to the host must implement such that
/// they can be transformed to a complete JSON error report.
pub trait DetailedError: StdError + Serialize {
    /// Identifying name of the error.
    fn error_code(&self) -> Cow<'static, str>;
}

/// JSON rendering of an error.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub message: String,
    /// Error code is a string that specifies this error type.
    pub error_code: Cow<'static, str>,
    /// Detailed error metadata.
    /// The contents of this field is determined by `error_code`.
    pub details: JsonValue,
}

impl<E> From<&E> for ErrorResponse
where
    E: DetailedError,
{
    fn from(error: &E) -> ErrorResponse {
        Self::from_error_nolog(error)
    }
}

impl ErrorResponse {
    /// Build the response for a row-level execution error and log it at a
    /// level matching its severity.
    pub fn from_exec_error(error: &ExecError) -> Self {
        let response = Self::from_error_nolog(error);
        match error.severity() {
            ErrorSeverity::Input => {
                info!("[input error] {}: {}", response.error_code, response.message)
            }
            ErrorSeverity::Bug | ErrorSeverity::RemoteEnvironment | ErrorSeverity::Error => {
                error!("[execution error] {}: {}", response.error_code, response.message)
            }
        }
        response
    }

    pub fn from_error_nolog<E>(error: &E) -> Self
    where
        E: DetailedError,
    {
        let message = error.to_string();
        let error_code = error.error_code();
        let details = serde_json::to_value(error).unwrap_or_else(|e| {
            JsonValue::String(format!("Failed to serialize error. Details: '{e}'"))
        });

        Self {
            message,
            error_code,
            details,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{DetailedError, ErrorResponse, ErrorSeverity, ExecError, PlanError};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn exec_error_messages() {
        let e = ExecError::WrongNumberOfArguments { max: 1, actual: 2 };
        assert_eq!(e.to_string(), "Wrong number of arguments > 1");
        assert_eq!(e.severity(), ErrorSeverity::Error);

        let e = ExecError::InvalidDataType { type_name: "int" };
        assert_eq!(e.to_string(), "Invalid data type for argument int");
        assert_eq!(e.error_code(), "InvalidDataType");
    }

    #[test]
    fn error_response() {
        let e = ExecError::WrongNumberOfArguments { max: 1, actual: 3 };
        assert_eq!(
            ErrorResponse::from(&e),
            ErrorResponse {
                message: "Wrong number of arguments > 1".to_string(),
                error_code: "WrongNumberOfArguments".into(),
                details: json!({ "WrongNumberOfArguments": { "max": 1, "actual": 3 } }),
            }
        );

        let e = PlanError::UnknownFunction("Nope".to_string());
        let response = ErrorResponse::from(&e);
        assert_eq!(response.message, "Unknown function 'Nope'");
        assert_eq!(response.details, json!({ "UnknownFunction": "Nope" }));
    }
}
