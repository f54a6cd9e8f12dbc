/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_http::json_errors::parse_generic_error;
use bytes::Bytes;
use smithy_types::retry::{ErrorKind as RetryErrorKind, ProvideErrorKind};
use std::fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by every WorkSpaces operation
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
    InvalidParameterValuesException,
    InvalidResourceStateException,
    OperationNotSupportedException,
    ResourceLimitExceededException,
    ResourceNotFoundException,
    ThrottlingException,

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
            Some("InvalidParameterValuesException") => ErrorKind::InvalidParameterValuesException,
            Some("InvalidResourceStateException") => ErrorKind::InvalidResourceStateException,
            Some("OperationNotSupportedException") => ErrorKind::OperationNotSupportedException,
            Some("ResourceLimitExceededException") => ErrorKind::ResourceLimitExceededException,
            Some("ResourceNotFoundException") => ErrorKind::ResourceNotFoundException,
            Some("ThrottlingException") => ErrorKind::ThrottlingException,
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

    pub fn is_invalid_parameter_values_exception(&self) -> bool {
        matches!(&self.kind, ErrorKind::InvalidParameterValuesException)
    }

    pub fn is_resource_not_found_exception(&self) -> bool {
        matches!(&self.kind, ErrorKind::ResourceNotFoundException)
    }
}

impl ProvideErrorKind for Error {
    fn retryable_error_kind(&self) -> Option<RetryErrorKind> {
        match &self.kind {
            ErrorKind::ThrottlingException => Some(RetryErrorKind::ThrottlingError),
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

    #[test]
    fn aws_json_error_type() {
        let response = http::Response::builder()
            .status(400)
            .header("x-amzn-requestid", "req-1")
            .body(Bytes::from_static(
                br#"{"__type": "InvalidParameterValuesException", "message": "The WorkSpace ID is invalid"}"#,
            ))
            .unwrap();
        let err = Error::from_response(&response);
        assert!(err.is_invalid_parameter_values_exception());
        assert_eq!(err.message(), Some("The WorkSpace ID is invalid"));
        assert_eq!(err.request_id(), Some("req-1"));
    }

    #[test]
    fn missing_error_type() {
        let response = http::Response::builder()
            .status(500)
            .body(Bytes::from_static(b"internal failure"))
            .unwrap();
        let err = Error::from_response(&response);
        assert!(matches!(err.kind, ErrorKind::Unhandled(_)));
        assert_eq!(err.code(), None);
    }
}
