use std::time::Duration;

use thiserror::Error;
use warden_core::{
    DomainError, ErrorKind, PasswordHasherError, TokenIssuerError, UserError, UserStoreError,
};

/// Failure of an authentication workflow.
///
/// `Domain` carries a classified, client-safe error. Every other variant is
/// an infrastructure fault that transports should treat as a server error.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasher(#[from] PasswordHasherError),
    #[error("Token issuer error: {0}")]
    TokenIssuer(#[from] TokenIssuerError),
    #[error("Invalid user record: {0}")]
    InvalidUser(#[from] UserError),
    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl AuthError {
    /// Category of a domain error, `None` for infrastructure faults.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Domain(err) => Some(err.kind()),
            _ => None,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_domain_errors_have_a_kind() {
        let domain: AuthError = DomainError::conflict("email already in use").into();
        assert_eq!(domain.kind(), Some(ErrorKind::Conflict));
        assert!(domain.is(ErrorKind::Conflict));

        let store: AuthError = UserStoreError::UnexpectedError("connection reset".into()).into();
        assert_eq!(store.kind(), None);
        assert!(!store.is(ErrorKind::NotFound));
    }
}
