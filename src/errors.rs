use core::fmt;
use std::sync::PoisonError;

/// Record-level validation failure. Each variant names the field that was
/// rejected so callers (and tests) can tell a length failure apart from a
/// character-class failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooLong { field: &'static str, max: usize },
    WrongLength { field: &'static str, expected: usize },
    NotDigits { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty { field } => {
                write!(f, "{} cannot be empty", field)
            }
            ValidationError::TooLong { field, max } => {
                write!(f, "{} cannot exceed {} characters", field, max)
            }
            ValidationError::WrongLength { field, expected } => {
                write!(f, "{} must be exactly {} characters", field, expected)
            }
            ValidationError::NotDigits { field } => {
                write!(f, "{} must contain only digits", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Service-level failure raised by registry operations.
#[derive(Debug)]
pub enum RegistryError {
    /// Malformed input detected before any stored state was touched.
    InvalidArgument(String),
    /// Add with an id that is already present.
    DuplicateId(String),
    /// Operation targeted an absent id.
    NotFound(String),
    /// Add while the registry holds `capacity` entries.
    CapacityExceeded(usize),
    /// A multi-field update failed and was rolled back; wraps the original
    /// cause of the failed step.
    AtomicUpdate(Box<RegistryError>),
    /// Rollback failure or a poisoned registry lock. Not recoverable by
    /// retrying with corrected input.
    Internal(String),
}

impl RegistryError {
    /// Whether the caller can recover by supplying corrected input or by
    /// freeing capacity. `Internal` means the rollback contract itself broke
    /// and should be surfaced to the operator.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RegistryError::Internal(_))
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidArgument(msg) => {
                write!(f, "Invalid argument: {}", msg)
            }
            RegistryError::DuplicateId(id) => {
                write!(f, "Contact ID already exists: {}", id)
            }
            RegistryError::NotFound(id) => {
                write!(f, "Contact not found with ID: {}", id)
            }
            RegistryError::CapacityExceeded(capacity) => {
                write!(f, "Maximum contact capacity of {} reached", capacity)
            }
            RegistryError::AtomicUpdate(cause) => {
                write!(f, "Atomic update failed and was rolled back: {}", cause)
            }
            RegistryError::Internal(msg) => {
                write!(f, "Internal registry error: {}", msg)
            }
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::AtomicUpdate(cause) => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<ValidationError> for RegistryError {
    fn from(err: ValidationError) -> Self {
        RegistryError::InvalidArgument(err.to_string())
    }
}

impl<T> From<PoisonError<T>> for RegistryError {
    fn from(_: PoisonError<T>) -> Self {
        RegistryError::Internal("registry lock poisoned by a panicked thread".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_messages() {
        let err = ValidationError::TooLong {
            field: "First name",
            max: 10,
        };
        assert_eq!(format!("{}", err), "First name cannot exceed 10 characters");

        let err = ValidationError::WrongLength {
            field: "Phone number",
            expected: 10,
        };
        assert_eq!(
            format!("{}", err),
            "Phone number must be exactly 10 characters"
        );
    }

    #[test]
    fn registry_error_messages() {
        let err = RegistryError::DuplicateId("12345".to_string());
        assert_eq!(format!("{}", err), "Contact ID already exists: 12345");

        let err = RegistryError::CapacityExceeded(10_000);
        assert_eq!(
            format!("{}", err),
            "Maximum contact capacity of 10000 reached"
        );
    }

    #[test]
    fn atomic_update_wraps_the_original_cause() {
        use std::error::Error;

        let cause = RegistryError::InvalidArgument("Phone number must contain only digits".into());
        let err = RegistryError::AtomicUpdate(Box::new(cause));

        assert!(format!("{}", err).contains("rolled back"));
        assert!(err.source().is_some());
        assert!(err.is_recoverable());
        assert!(!RegistryError::Internal("rollback failed".into()).is_recoverable());
    }
}
