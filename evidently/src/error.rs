/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_http::json_errors::parse_generic_error;
use bytes::Bytes;
use smithy_types::retry::{ErrorKind as RetryErrorKind, ProvideErrorKind};
use std::fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by every Evidently operation
#[non_exhaustive]
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub(crate) meta: smithy_types::Error,
}

#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorKind {
    AccessDeniedException,
    ConflictException,
    InternalServerException,
    ResourceNotFoundException,
    ServiceQuotaExceededException,
    ServiceUnavailableException,
    ThrottlingException,
    ValidationException,

    /// An unexpected error, eg. invalid JSON returned by the service or an unknown error code
    Unhandled(BoxError),
}

impl Error {
    pub fn new(kind: ErrorKind, meta: smithy_types::Error) -> Self {
        Error { kind, meta }
    }

    pub fn unhandled(err: impl Into<BoxError>) -> Self {
        Error {
            kind: ErrorKind::Unhandled(err.into()),
            meta: Default::default(),
        }
    }

    pub fn generic(err: smithy_types::Error) -> Self {
        Error {
            meta: err.clone(),
            kind: ErrorKind::Unhandled(err.into()),
        }
    }

    /// Map an unsuccessful response onto a modeled error
    pub fn from_response(response: &http::Response<Bytes>) -> Self {
        let generic = parse_generic_error(response.body(), response.headers());
        let kind = match generic.code() {
            Some("AccessDeniedException") => ErrorKind::AccessDeniedException,
            Some("ConflictException") => ErrorKind::ConflictException,
            Some("InternalServerException") => ErrorKind::InternalServerException,
            Some("ResourceNotFoundException") => ErrorKind::ResourceNotFoundException,
            Some("ServiceQuotaExceededException") => ErrorKind::ServiceQuotaExceededException,
            Some("ServiceUnavailableException") => ErrorKind::ServiceUnavailableException,
            Some("ThrottlingException") => ErrorKind::ThrottlingException,
            Some("ValidationException") => ErrorKind::ValidationException,
            _ => return Error::generic(generic),
        };
        Error::new(kind, generic)
    }

    pub fn code(&self) -> Option<&str> {
        self.meta.code()
    }

    pub fn message(&self) -> Option<&str> {
        self.meta.message()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.meta.request_id()
    }

    pub fn meta(&self) -> &smithy_types::Error {
        &self.meta
    }

    pub fn is_access_denied_exception(&self) -> bool {
        matches!(&self.kind, ErrorKind::AccessDeniedException)
    }

    pub fn is_conflict_exception(&self) -> bool {
        matches!(&self.kind, ErrorKind::ConflictException)
    }

    pub fn is_resource_not_found_exception(&self) -> bool {
        matches!(&self.kind, ErrorKind::ResourceNotFoundException)
    }

    pub fn is_throttling_exception(&self) -> bool {
        matches!(&self.kind, ErrorKind::ThrottlingException)
    }

    pub fn is_validation_exception(&self) -> bool {
        matches!(&self.kind, ErrorKind::ValidationException)
    }
}

impl ProvideErrorKind for Error {
    fn retryable_error_kind(&self) -> Option<RetryErrorKind> {
        match &self.kind {
            ErrorKind::ThrottlingException => Some(RetryErrorKind::ThrottlingError),
            ErrorKind::InternalServerException | ErrorKind::ServiceUnavailableException => {
                Some(RetryErrorKind::ServerError)
            }
            _ => None,
        }
    }

    fn code(&self) -> Option<&str> {
        Error::code(self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Unhandled(inner) => write!(f, "{}", inner),
            kind => {
                write!(f, "{:?}", kind)?;
                if let Some(message) = self.message() {
                    write!(f, ": {}", message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Unhandled(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::error::{Error, ErrorKind};
    use bytes::Bytes;
    use smithy_types::retry::{ErrorKind as RetryErrorKind, ProvideErrorKind};

    fn response(status: u16, header: Option<&str>, body: &'static str) -> http::Response<Bytes> {
        let mut builder = http::Response::builder()
            .status(status)
            .header("x-amzn-requestid", "req-1");
        if let Some(error_type) = header {
            builder = builder.header("x-amzn-errortype", error_type);
        }
        builder.body(Bytes::from_static(body.as_bytes())).unwrap()
    }

    #[test]
    fn modeled_error_from_header() {
        let err = Error::from_response(&response(
            404,
            Some("ResourceNotFoundException:http://internal.amazon.com/"),
            r#"{"message": "Project p1 does not exist"}"#,
        ));
        assert!(err.is_resource_not_found_exception());
        assert_eq!(err.message(), Some("Project p1 does not exist"));
        assert_eq!(err.request_id(), Some("req-1"));
        assert_eq!(
            err.to_string(),
            "ResourceNotFoundException: Project p1 does not exist"
        );
    }

    #[test]
    fn modeled_error_from_body() {
        let err = Error::from_response(&response(
            429,
            None,
            r#"{"__type": "com.amazonaws.evidently#ThrottlingException", "Message": "slow down"}"#,
        ));
        assert!(err.is_throttling_exception());
        assert_eq!(
            err.retryable_error_kind(),
            Some(RetryErrorKind::ThrottlingError)
        );
    }

    #[test]
    fn unknown_codes_are_unhandled() {
        let err = Error::from_response(&response(400, Some("SomethingNew"), "{}"));
        assert!(matches!(err.kind, ErrorKind::Unhandled(_)));
        assert_eq!(err.code(), Some("SomethingNew"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.retryable_error_kind(), None);
    }
}
