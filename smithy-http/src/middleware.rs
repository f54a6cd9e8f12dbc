/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Framework-agnostic request stages and response loading
//!
//! `smithy-http-tower` lifts these into tower layers.

use crate::operation;
use crate::pin_mut;
use crate::response::ParseHttpResponse;
use crate::result::{ResponseBody, SdkError, SdkSuccess};
use bytes::{Buf, Bytes};
use http_body::Body;
use std::error::Error;

type BoxError = Box<dyn Error + Send + Sync>;

/// A synchronous request stage: endpoint resolution, user agent, signing
///
/// Stages read their inputs from the request's `PropertyBag` and rewrite the `http::Request`
/// through [`Request::augment`](crate::operation::Request::augment). A stage that cannot find
/// what it needs fails the whole operation before anything is sent.
pub trait MapRequest {
    type Error: Into<BoxError>;

    fn apply(&self, request: operation::Request) -> Result<operation::Request, Self::Error>;
}

/// Read the response body and hand it to `handler`
///
/// Handlers that can parse the response without its body (`parse_unloaded`) skip the read. A
/// handler error becomes [`SdkError::ServiceError`], a failed body read
/// [`SdkError::ResponseError`]. Either way the raw response is kept.
pub async fn load_response<B, T, E, O>(
    mut response: http::Response<B>,
    handler: &O,
) -> Result<SdkSuccess<T>, SdkError<E>>
where
    B: http_body::Body + Unpin,
    B::Error: Into<BoxError>,
    O: ParseHttpResponse<B, Output = Result<T, E>>,
{
    if let Some(parsed_response) = handler.parse_unloaded(&mut response) {
        return sdk_result(parsed_response, response.map(|_| ResponseBody::streaming()));
    }

    let body = match read_body(response.body_mut()).await {
        Ok(body) => body,
        Err(e) => {
            return Err(SdkError::ResponseError {
                raw: response.map(|_| ResponseBody::failed()),
                err: e.into(),
            });
        }
    };

    let response = response.map(|_| Bytes::from(body));
    tracing::trace!(response = ?response, "loaded response body");
    let parsed = handler.parse_loaded(&response);
    sdk_result(parsed, response.map(ResponseBody::loaded))
}

async fn read_body<B: http_body::Body>(body: B) -> Result<Vec<u8>, B::Error> {
    let mut output = Vec::new();
    pin_mut!(body);
    while let Some(buf) = body.data().await {
        let mut buf = buf?;
        while buf.has_remaining() {
            output.extend_from_slice(buf.chunk());
            buf.advance(buf.chunk().len())
        }
    }
    Ok(output)
}

/// Convert a `Result<T, E>` into an `SdkResult` that includes the raw HTTP response
fn sdk_result<T, E>(
    parsed: Result<T, E>,
    raw: http::Response<ResponseBody>,
) -> Result<SdkSuccess<T>, SdkError<E>> {
    match parsed {
        Ok(parsed) => Ok(SdkSuccess { raw, parsed }),
        Err(err) => Err(SdkError::ServiceError { raw, err }),
    }
}
