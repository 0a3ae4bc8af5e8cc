use super::Error;

/// Error when a backend does not support a requested feature.
///
/// This occurs when:
/// - A pattern operator (`contains`, `starts_with`, `ends_with`) is used
///   against a backend without pattern matching
/// - Numeric identifiers are requested from a backend without native increment
/// - A driver is asked for introspection or migrations it cannot perform
#[derive(Debug)]
pub(super) struct UnsupportedFeature {
    message: Box<str>,
}

impl std::error::Error for UnsupportedFeature {}

impl core::fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported feature: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported feature error.
    pub fn unsupported_feature(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedFeature(UnsupportedFeature {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported feature error.
    pub fn is_unsupported_feature(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnsupportedFeature(_)))
    }
}
