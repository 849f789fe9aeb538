use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type Unit = ();

/// A single form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields = self
            .0
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");

        write!(f, "{fields}")
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AutoError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    /// The backend answered with a non-success status, or could not be reached (`status` is `None`).
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Io(String),
    #[error("A submission is already in progress")]
    Busy,
}

impl AutoError {
    pub fn invalid_argument(message: &str) -> Self {
        AutoError::InvalidArgument(message.to_string())
    }

    pub fn io_err(message: &str) -> Self {
        AutoError::Io(message.to_string())
    }

    pub fn configuration(message: &str) -> Self {
        AutoError::Configuration(message.to_string())
    }

    pub fn api(status: impl Into<Option<u16>>, message: &str) -> Self {
        AutoError::Api {
            status: status.into(),
            message: message.to_string(),
        }
    }
}

impl From<FieldErrors> for AutoError {
    fn from(errors: FieldErrors) -> Self {
        AutoError::Validation(errors)
    }
}
