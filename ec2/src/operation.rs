/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::error::Error;
use crate::model::ResponseMetadata;
use crate::output::EnableReachabilityAnalyzerOrganizationSharingOutput;
use aws_http::request_id::extract_request_id;
use bytes::Bytes;
use smithy_http::response::ParseStrictResponse;
use smithy_xml::{Document, XmlError};

const RESPONSE_ROOT: &str = "EnableReachabilityAnalyzerOrganizationSharingResponse";

#[derive(Clone, Copy, Debug, Default)]
pub struct EnableReachabilityAnalyzerOrganizationSharing;

impl EnableReachabilityAnalyzerOrganizationSharing {
    fn parse_output(
        response: &http::Response<Bytes>,
    ) -> Result<EnableReachabilityAnalyzerOrganizationSharingOutput, XmlError> {
        let document = Document::parse(response.body())?;
        let root = document.root();
        if root.name() != RESPONSE_ROOT {
            return Err(XmlError::custom(format!(
                "expected `{}` as the response root, found `{}`",
                RESPONSE_ROOT,
                root.name()
            )));
        }
        let return_value = match root.child_text("returnValue").map(str::trim) {
            None => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => {
                return Err(XmlError::custom(format!(
                    "expected a boolean `returnValue`, found `{}`",
                    other
                )))
            }
        };
        let mut output = EnableReachabilityAnalyzerOrganizationSharingOutput::builder()
            .set_return_value(return_value);
        let request_id = root
            .child_text("requestId")
            .or_else(|| extract_request_id(response.headers()));
        if let Some(request_id) = request_id {
            output = output.response_metadata(ResponseMetadata::new(request_id));
        }
        Ok(output.build())
    }
}

impl ParseStrictResponse for EnableReachabilityAnalyzerOrganizationSharing {
    type Output = Result<EnableReachabilityAnalyzerOrganizationSharingOutput, Error>;

    fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
        if !response.status().is_success() {
            return Err(Error::from_response(response));
        }
        Self::parse_output(response).map_err(Error::unhandled)
    }
}
