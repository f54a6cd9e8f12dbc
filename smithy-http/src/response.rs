/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use bytes::Bytes;
use http::Response;

/// Turns an HTTP response into an operation outcome
///
/// `parse_unloaded` sees the response before its body is read and may answer early;
/// `parse_loaded` receives the whole body. Service handlers only need the latter, see
/// [`ParseStrictResponse`].
pub trait ParseHttpResponse<B> {
    /// Usually `Result<Output, ServiceError>`, eg. `Result<GetExperimentOutput, evidently::Error>`
    type Output;

    /// `None` when the body is required
    fn parse_unloaded(&self, response: &mut http::Response<B>) -> Option<Self::Output>;

    fn parse_loaded(&self, response: &http::Response<Bytes>) -> Self::Output;
}

/// A handler that always needs the full body
///
/// Every type implementing `ParseStrictResponse` is a [`ParseHttpResponse`] for any body type.
pub trait ParseStrictResponse {
    type Output;
    fn parse(&self, response: &Response<Bytes>) -> Self::Output;
}

impl<B, T> ParseHttpResponse<B> for T
where
    T: ParseStrictResponse,
{
    type Output = T::Output;

    fn parse_unloaded(&self, _response: &mut Response<B>) -> Option<Self::Output> {
        None
    }

    fn parse_loaded(&self, response: &Response<Bytes>) -> Self::Output {
        self.parse(response)
    }
}
