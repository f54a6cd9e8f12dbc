/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_http::request_id::extract_request_id;
use bytes::Bytes;
use smithy_types::retry::{ErrorKind as RetryErrorKind, ProvideErrorKind};
use smithy_xml::Document;
use std::fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by EC2 operations
///
/// EC2 does not model its errors: every service error is `Unhandled` and is told apart by its
/// code.
#[non_exhaustive]
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub(crate) meta: smithy_types::Error,
}

#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorKind {
    Unhandled(BoxError),
}

/// Parse the `<Response><Errors><Error>` envelope of an ec2Query error
pub fn parse_generic_error(
    body: &[u8],
    headers: &http::HeaderMap,
) -> Result<smithy_types::Error, smithy_xml::XmlError> {
    let document = Document::parse(body)?;
    let root = document.root();
    if root.name() != "Response" {
        return Err(smithy_xml::XmlError::custom(format!(
            "expected `Response` as the error root, found `{}`",
            root.name()
        )));
    }
    let mut builder = smithy_types::Error::builder();
    if let Some(error) = root.path(&["Errors", "Error"]) {
        if let Some(code) = error.child_text("Code") {
            builder = builder.code(code);
        }
        if let Some(message) = error.child_text("Message") {
            builder = builder.message(message);
        }
    }
    let request_id = root
        .child_text("RequestID")
        .or_else(|| extract_request_id(headers));
    builder.set_request_id(request_id.map(str::to_string));
    Ok(builder.build())
}

impl Error {
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

    pub fn from_response(response: &http::Response<Bytes>) -> Self {
        match parse_generic_error(response.body(), response.headers()) {
            Ok(generic) => Error::generic(generic),
            // eg. an HTML page from a load balancer; the header still carries the request id
            Err(err) => {
                let mut meta = smithy_types::Error::builder();
                meta.set_request_id(extract_request_id(response.headers()).map(str::to_string));
                Error {
                    kind: ErrorKind::Unhandled(err.into()),
                    meta: meta.build(),
                }
            }
        }
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

    /// The request would have succeeded, but `DryRun` was set
    pub fn is_dry_run_operation(&self) -> bool {
        self.code() == Some("DryRunOperation")
    }
}

impl ProvideErrorKind for Error {
    fn retryable_error_kind(&self) -> Option<RetryErrorKind> {
        None
    }

    fn code(&self) -> Option<&str> {
        Error::code(self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Unhandled(inner) => write!(f, "{}", inner),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Unhandled(inner) => Some(inner.as_ref()),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::error::{parse_generic_error, Error};
    use bytes::Bytes;

    #[test]
    fn parse_error_envelope() {
        let body = br#"<?xml version="1.0" encoding="UTF-8"?>
<Response>
    <Errors>
        <Error>
            <Code>UnauthorizedOperation</Code>
            <Message>You are not authorized to perform this operation.</Message>
        </Error>
    </Errors>
    <RequestID>b25f4f4e-8ec6-4b70-9bc5-9a1e5f5e3f1e</RequestID>
</Response>"#;
        let error = parse_generic_error(body, &http::HeaderMap::new()).expect("valid error");
        assert_eq!(error.code(), Some("UnauthorizedOperation"));
        assert_eq!(
            error.message(),
            Some("You are not authorized to perform this operation.")
        );
        assert_eq!(
            error.request_id(),
            Some("b25f4f4e-8ec6-4b70-9bc5-9a1e5f5e3f1e")
        );
    }

    #[test]
    fn dry_run() {
        let response = http::Response::builder()
            .status(412)
            .body(Bytes::from_static(
                b"<Response><Errors><Error><Code>DryRunOperation</Code><Message>Request would have succeeded, but DryRun flag is set.</Message></Error></Errors><RequestID>req-1</RequestID></Response>",
            ))
            .unwrap();
        let err = Error::from_response(&response);
        assert!(err.is_dry_run_operation());
        assert_eq!(err.request_id(), Some("req-1"));
    }

    #[test]
    fn invalid_error_body() {
        let response = http::Response::builder()
            .status(503)
            .header("x-amzn-requestid", "req-503")
            .body(Bytes::from_static(b"<html>oops"))
            .unwrap();
        let err = Error::from_response(&response);
        assert_eq!(err.code(), None);
        assert_eq!(err.request_id(), Some("req-503"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
