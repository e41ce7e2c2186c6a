//! Auth service and token errors to HTTP error conversion.

use super::http_error::{Error as HttpError, ErrorKind};
use crate::service::{AuthError, TokenError};

impl From<AuthError> for HttpError<'static> {
    fn from(error: AuthError) -> Self {
        let kind = match error {
            AuthError::Validation => ErrorKind::BadRequest,
            AuthError::Conflict => ErrorKind::Conflict,
            AuthError::Unauthorized => ErrorKind::InvalidCredentials,
            AuthError::Internal => ErrorKind::InternalServerError,
        };

        kind.with_context(error.to_string())
    }
}

impl From<TokenError> for HttpError<'static> {
    fn from(error: TokenError) -> Self {
        let kind = match error {
            TokenError::Invalid => ErrorKind::Unauthorized,
            TokenError::Expired => ErrorKind::ExpiredAuthToken,
        };

        kind.with_context(error.to_string())
    }
}

impl From<crate::Error> for HttpError<'static> {
    fn from(error: crate::Error) -> Self {
        ErrorKind::InternalServerError.with_context(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_kinds() {
        let cases = [
            (AuthError::Validation, ErrorKind::BadRequest),
            (AuthError::Conflict, ErrorKind::Conflict),
            (AuthError::Unauthorized, ErrorKind::InvalidCredentials),
            (AuthError::Internal, ErrorKind::InternalServerError),
        ];

        for (error, kind) in cases {
            assert_eq!(HttpError::from(error).kind(), kind);
        }
    }

    #[test]
    fn token_errors_map_to_kinds() {
        assert_eq!(
            HttpError::from(TokenError::Invalid).kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            HttpError::from(TokenError::Expired).kind(),
            ErrorKind::ExpiredAuthToken
        );
    }

    #[test]
    fn service_errors_are_internal() {
        let error = HttpError::from(crate::Error::store("table unavailable"));

        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert!(error.context().is_some_and(|c| c.contains("table unavailable")));
    }
}
