// Ingest decode errors and the decoded-with-defaults carrier

use std::fmt;

/// A single field whose JSON value had the wrong type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: &'static str,
    pub expected: &'static str,
    pub found: &'static str,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}' expected {}, found {}",
            self.field, self.expected, self.found
        )
    }
}

/// Why a request body did not decode cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Body is not valid JSON at all
    Malformed(String),

    /// Body is valid JSON but not an object (array, string, number, ...)
    NotAnObject(&'static str),

    /// Body is an object but one or more fields had the wrong type
    FieldTypes(Vec<FieldMismatch>),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Malformed(reason) => write!(f, "malformed JSON body: {}", reason),
            DecodeError::NotAnObject(found) => {
                write!(f, "expected a JSON object, found {}", found)
            }
            DecodeError::FieldTypes(mismatches) => {
                write!(f, "type mismatch: ")?;
                for (idx, mismatch) in mismatches.iter().enumerate() {
                    if idx > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", mismatch)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Outcome of a lenient decode: the value is always usable, the error says
/// what had to be defaulted.
///
/// Callers decide explicitly whether to act on `error`; ingest logs it and
/// keeps `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub error: Option<DecodeError>,
}

impl<T> Decoded<T> {
    pub fn clean(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn with_error(value: T, error: DecodeError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }

    /// Split into the value and an `Err` describing any recovery.
    pub fn into_parts(self) -> (T, Result<(), DecodeError>) {
        match self.error {
            Some(err) => (self.value, Err(err)),
            None => (self.value, Ok(())),
        }
    }
}
