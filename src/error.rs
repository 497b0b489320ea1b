use serde::Serialize;
use thiserror::Error;

/// Why a parse produced no passwords. Every variant is terminal for the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The bytes could not be read as UTF-8 and the Latin-1 fallback was off.
    #[error("undecodable response")]
    Undecodable,
    #[error("no 64-character hex password found")]
    NoHexMatch,
    #[error("no 63-character alphanumeric password found")]
    NoAlphanumericMatch,
    #[error("no 63-character ASCII password containing a special character found")]
    NoQualifyingAsciiMatch,
    #[error("extracted passwords are not pairwise distinct")]
    DuplicatePasswords,
}

/// Coarse failure taxonomy, used to pick what the caller tells the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    /// Bytes not interpretable as text.
    Decoding,
    /// Hex or alphanumeric token absent; the page layout likely changed.
    Structural,
    /// No ASCII candidate with a special character survived exclusion.
    Disambiguation,
}

impl ParseError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ParseError::Undecodable => FailureKind::Decoding,
            ParseError::NoHexMatch | ParseError::NoAlphanumericMatch => FailureKind::Structural,
            ParseError::NoQualifyingAsciiMatch | ParseError::DuplicatePasswords => FailureKind::Disambiguation,
        }
    }

    /// Short, stable text suitable for showing next to a "try again" action.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            FailureKind::Decoding => "Could not decode server response.",
            FailureKind::Structural | FailureKind::Disambiguation => {
                "Could not parse passwords from page.\nThe page structure may have changed."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(ParseError::Undecodable.kind(), FailureKind::Decoding);
        assert_eq!(ParseError::NoHexMatch.kind(), FailureKind::Structural);
        assert_eq!(ParseError::NoAlphanumericMatch.kind(), FailureKind::Structural);
        assert_eq!(ParseError::NoQualifyingAsciiMatch.kind(), FailureKind::Disambiguation);
        assert_eq!(ParseError::DuplicatePasswords.kind(), FailureKind::Disambiguation);
    }

    #[test]
    fn structural_failures_do_not_blame_the_server() {
        let msg = ParseError::NoHexMatch.user_message();
        assert!(msg.contains("page structure may have changed"));
        assert_ne!(msg, ParseError::Undecodable.user_message());
        assert_eq!(ParseError::Undecodable.to_string(), "undecodable response");
    }
}
