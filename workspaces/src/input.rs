/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation inputs
//!
//! awsJson1_1 binds nothing to the URI, so no member is validated before the request is sent.

use crate::model::RebootRequest;
use crate::operation;
use aws_hyper::OperationInput;
use serde::Serialize;
use smithy_http::body::SdkBody;
use smithy_http::operation::BuildError;

const TARGET_PREFIX: &str = "WorkspacesService";

fn aws_json_request<T: Serialize>(
    operation: &str,
    input: &T,
) -> Result<http::Request<SdkBody>, BuildError> {
    let body =
        serde_json::to_vec(input).map_err(|err| BuildError::SerializationError(err.into()))?;
    Ok(http::Request::builder()
        .method(http::Method::POST)
        .uri("/")
        .header(http::header::CONTENT_TYPE, "application/x-amz-json-1.1")
        .header("x-amz-target", format!("{}.{}", TARGET_PREFIX, operation))
        .body(SdkBody::from(body))?)
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeWorkspacesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl DescribeWorkspacesInput {
    pub fn builder() -> describe_workspaces_input::Builder {
        describe_workspaces_input::Builder::default()
    }
}

impl OperationInput for DescribeWorkspacesInput {
    const NAME: &'static str = "DescribeWorkspaces";
    type Output = crate::output::DescribeWorkspacesOutput;
    type Error = crate::error::Error;
    type Handler = operation::DescribeWorkspaces;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        aws_json_request(Self::NAME, self)
    }
}

pub mod describe_workspaces_input {
    use crate::input::DescribeWorkspacesInput;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        workspace_ids: Option<Vec<String>>,
        directory_id: Option<String>,
        user_name: Option<String>,
        bundle_id: Option<String>,
        limit: Option<i32>,
        next_token: Option<String>,
    }

    impl Builder {
        /// Appends a WorkSpace id
        pub fn workspace_ids(mut self, workspace_id: impl Into<String>) -> Self {
            self.workspace_ids
                .get_or_insert_with(Vec::new)
                .push(workspace_id.into());
            self
        }

        pub fn set_workspace_ids(mut self, workspace_ids: Option<Vec<String>>) -> Self {
            self.workspace_ids = workspace_ids;
            self
        }

        pub fn directory_id(mut self, directory_id: impl Into<String>) -> Self {
            self.directory_id = Some(directory_id.into());
            self
        }

        pub fn set_directory_id(mut self, directory_id: Option<String>) -> Self {
            self.directory_id = directory_id;
            self
        }

        pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
            self.user_name = Some(user_name.into());
            self
        }

        pub fn set_user_name(mut self, user_name: Option<String>) -> Self {
            self.user_name = user_name;
            self
        }

        pub fn bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
            self.bundle_id = Some(bundle_id.into());
            self
        }

        pub fn set_bundle_id(mut self, bundle_id: Option<String>) -> Self {
            self.bundle_id = bundle_id;
            self
        }

        pub fn limit(mut self, limit: i32) -> Self {
            self.limit = Some(limit);
            self
        }

        pub fn set_limit(mut self, limit: Option<i32>) -> Self {
            self.limit = limit;
            self
        }

        pub fn next_token(mut self, next_token: impl Into<String>) -> Self {
            self.next_token = Some(next_token.into());
            self
        }

        pub fn set_next_token(mut self, next_token: Option<String>) -> Self {
            self.next_token = next_token;
            self
        }

        pub fn build(self) -> DescribeWorkspacesInput {
            DescribeWorkspacesInput {
                workspace_ids: self.workspace_ids,
                directory_id: self.directory_id,
                user_name: self.user_name,
                bundle_id: self.bundle_id,
                limit: self.limit,
                next_token: self.next_token,
            }
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RebootWorkspacesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reboot_workspace_requests: Option<Vec<RebootRequest>>,
}

impl RebootWorkspacesInput {
    pub fn builder() -> reboot_workspaces_input::Builder {
        reboot_workspaces_input::Builder::default()
    }
}

impl OperationInput for RebootWorkspacesInput {
    const NAME: &'static str = "RebootWorkspaces";
    type Output = crate::output::RebootWorkspacesOutput;
    type Error = crate::error::Error;
    type Handler = operation::RebootWorkspaces;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        aws_json_request(Self::NAME, self)
    }
}

pub mod reboot_workspaces_input {
    use crate::input::RebootWorkspacesInput;
    use crate::model::RebootRequest;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        reboot_workspace_requests: Option<Vec<RebootRequest>>,
    }

    impl Builder {
        /// Appends a reboot request
        pub fn reboot_workspace_requests(mut self, request: RebootRequest) -> Self {
            self.reboot_workspace_requests
                .get_or_insert_with(Vec::new)
                .push(request);
            self
        }

        pub fn set_reboot_workspace_requests(mut self, requests: Option<Vec<RebootRequest>>) -> Self {
            self.reboot_workspace_requests = requests;
            self
        }

        pub fn build(self) -> RebootWorkspacesInput {
            RebootWorkspacesInput {
                reboot_workspace_requests: self.reboot_workspace_requests,
            }
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTagsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl DescribeTagsInput {
    pub fn builder() -> describe_tags_input::Builder {
        describe_tags_input::Builder::default()
    }
}

impl OperationInput for DescribeTagsInput {
    const NAME: &'static str = "DescribeTags";
    type Output = crate::output::DescribeTagsOutput;
    type Error = crate::error::Error;
    type Handler = operation::DescribeTags;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        aws_json_request(Self::NAME, self)
    }
}

pub mod describe_tags_input {
    use crate::input::DescribeTagsInput;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        resource_id: Option<String>,
    }

    impl Builder {
        pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
            self.resource_id = Some(resource_id.into());
            self
        }

        pub fn set_resource_id(mut self, resource_id: Option<String>) -> Self {
            self.resource_id = resource_id;
            self
        }

        pub fn build(self) -> DescribeTagsInput {
            DescribeTagsInput {
                resource_id: self.resource_id,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::input::{DescribeTagsInput, DescribeWorkspacesInput, RebootWorkspacesInput};
    use crate::model::RebootRequest;
    use aws_hyper::OperationInput;
    use protocol_test_helpers::{assert_ok, validate_body, validate_headers, MediaType};

    #[test]
    fn empty_inputs_are_valid() {
        for request in vec![
            DescribeWorkspacesInput::default().build_request(),
            RebootWorkspacesInput::default().build_request(),
            DescribeTagsInput::default().build_request(),
        ] {
            let request = request.expect("no member is required");
            assert_eq!(request.uri(), "/");
            assert_ok(validate_body(
                request.body().bytes().unwrap(),
                "{}",
                MediaType::Json,
            ));
        }
    }

    #[test]
    fn target_header() {
        let request = DescribeWorkspacesInput::builder()
            .workspace_ids("ws-1")
            .workspace_ids("ws-2")
            .limit(5)
            .build()
            .build_request()
            .unwrap();
        assert_eq!(request.method(), http::Method::POST);
        assert_ok(validate_headers(
            &request,
            &[
                ("content-type", "application/x-amz-json-1.1"),
                ("x-amz-target", "WorkspacesService.DescribeWorkspaces"),
            ],
        ));
        assert_ok(validate_body(
            request.body().bytes().unwrap(),
            r#"{"WorkspaceIds": ["ws-1", "ws-2"], "Limit": 5}"#,
            MediaType::Json,
        ));
    }

    #[test]
    fn reboot_requests() {
        let request = RebootWorkspacesInput::builder()
            .reboot_workspace_requests(RebootRequest::new("ws-1"))
            .build()
            .build_request()
            .unwrap();
        assert_ok(validate_body(
            request.body().bytes().unwrap(),
            r#"{"RebootWorkspaceRequests": [{"WorkspaceId": "ws-1"}]}"#,
            MediaType::Json,
        ));
    }
}
