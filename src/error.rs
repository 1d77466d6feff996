//! Crate-level error types.

use std::fmt;

/// Errors produced by the globenav crate.
///
/// Per-frame gesture handling never fails; these only come from the outer
/// surfaces (option presets and replay scripts).
#[derive(Debug)]
pub enum NavError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but violate a constraint.
    InvalidOptions(String),
    /// Replay script parsing failure.
    ReplayParse(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::ReplayParse(msg) => {
                write!(f, "replay script parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NavError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = NavError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing preset",
        ));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "I/O error: missing preset");
    }

    #[test]
    fn message_variants_have_no_source() {
        let err =
            NavError::InvalidOptions("min_elevation >= max_elevation".into());
        assert!(std::error::Error::source(&err).is_none());
        assert!(err.to_string().starts_with("invalid options"));
    }
}
