use super::Error;

/// Error when a driver's capability description is incomplete.
///
/// The migration engine raises this when the backend dialect is unknown and
/// column types therefore cannot be computed. It never guesses a type for an
/// identifier or foreign-key column.
#[derive(Debug)]
pub(super) struct InvalidDriverConfiguration {
    message: Box<str>,
}

impl std::error::Error for InvalidDriverConfiguration {}

impl core::fmt::Display for InvalidDriverConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid driver configuration: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid driver configuration error.
    pub fn invalid_driver_configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidDriverConfiguration(
            InvalidDriverConfiguration {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid driver configuration error.
    pub fn is_invalid_driver_configuration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidDriverConfiguration(_)))
    }
}
