/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Response handlers, one per operation

use crate::error::Error;
use crate::output;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use smithy_http::response::ParseStrictResponse;

fn parse_json<T: DeserializeOwned>(response: &http::Response<Bytes>) -> Result<T, Error> {
    if !response.status().is_success() {
        return Err(Error::from_response(response));
    }
    let body: &[u8] = match response.body().as_ref() {
        b"" => &b"{}"[..],
        body => body,
    };
    serde_json::from_slice(body).map_err(Error::unhandled)
}

macro_rules! json_handler {
    ($($handler:ident => $output:ident),+ $(,)?) => {
        $(
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $handler;

            impl ParseStrictResponse for $handler {
                type Output = Result<output::$output, Error>;

                fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
                    parse_json(response)
                }
            }
        )+
    };
}

json_handler! {
    DescribeWorkspaces => DescribeWorkspacesOutput,
    RebootWorkspaces => RebootWorkspacesOutput,
    DescribeTags => DescribeTagsOutput,
}

#[cfg(test)]
mod test {
    use crate::model::WorkspaceState;
    use crate::operation::{DescribeWorkspaces, RebootWorkspaces};
    use bytes::Bytes;
    use smithy_http::response::ParseStrictResponse;

    fn response(status: u16, body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(status)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn parse_workspaces() {
        let output = DescribeWorkspaces
            .parse(&response(
                200,
                r#"{"Workspaces": [{"WorkspaceId": "ws-1", "State": "AVAILABLE"}, {"WorkspaceId": "ws-2", "State": "HIBERNATING"}]}"#,
            ))
            .expect("valid response");
        let workspaces = output.workspaces.unwrap();
        assert_eq!(workspaces[0].state, Some(WorkspaceState::Available));
        assert_eq!(
            workspaces[1].state,
            Some(WorkspaceState::Unknown("HIBERNATING".to_string()))
        );
        assert_eq!(output.next_token, None);
    }

    #[test]
    fn parse_failed_reboots() {
        let output = RebootWorkspaces
            .parse(&response(
                200,
                r#"{"FailedRequests": [{"WorkspaceId": "ws-1", "ErrorCode": "InvalidState"}]}"#,
            ))
            .unwrap();
        let failed = output.failed_requests.unwrap();
        assert_eq!(failed[0].error_code.as_deref(), Some("InvalidState"));
    }
}
