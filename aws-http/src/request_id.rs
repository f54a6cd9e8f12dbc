/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use http::{HeaderMap, HeaderValue};
use smithy_http::result::{SdkError, SdkSuccess};

/// Implementers add a function to return an AWS request ID
pub trait RequestId {
    /// Returns the request ID if it's available.
    fn request_id(&self) -> Option<&str>;
}

impl<E> RequestId for SdkError<E> {
    fn request_id(&self) -> Option<&str> {
        self.raw_response()
            .and_then(|raw| extract_request_id(raw.headers()))
    }
}

impl<O> RequestId for SdkSuccess<O> {
    fn request_id(&self) -> Option<&str> {
        extract_request_id(self.raw.headers())
    }
}

impl RequestId for smithy_types::Error {
    fn request_id(&self) -> Option<&str> {
        smithy_types::Error::request_id(self)
    }
}

/// Extracts a request ID from HTTP response headers
///
/// `x-amzn-requestid` is preferred over `x-amz-request-id`.
pub fn extract_request_id(headers: &HeaderMap<HeaderValue>) -> Option<&str> {
    headers
        .get("x-amzn-requestid")
        .or_else(|| headers.get("x-amz-request-id"))
        .and_then(|value| value.to_str().ok())
}
