/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::model::{FailedWorkspaceChangeRequest, Tag, Workspace};
use serde::Deserialize;

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeWorkspacesOutput {
    #[serde(default)]
    pub workspaces: Option<Vec<Workspace>>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RebootWorkspacesOutput {
    /// WorkSpaces that could not be rebooted
    #[serde(default)]
    pub failed_requests: Option<Vec<FailedWorkspaceChangeRequest>>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTagsOutput {
    #[serde(default)]
    pub tag_list: Option<Vec<Tag>>,
}
