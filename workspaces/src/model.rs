/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use serde::{Deserialize, Serialize};

#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum WorkspaceState {
    Pending,
    Available,
    Impaired,
    Unhealthy,
    Rebooting,
    Starting,
    Rebuilding,
    Restoring,
    Maintenance,
    AdminMaintenance,
    Terminating,
    Terminated,
    Suspended,
    Updating,
    Stopping,
    Stopped,
    Error,
    Unknown(String),
}

impl WorkspaceState {
    pub fn as_str(&self) -> &str {
        match self {
            WorkspaceState::Pending => "PENDING",
            WorkspaceState::Available => "AVAILABLE",
            WorkspaceState::Impaired => "IMPAIRED",
            WorkspaceState::Unhealthy => "UNHEALTHY",
            WorkspaceState::Rebooting => "REBOOTING",
            WorkspaceState::Starting => "STARTING",
            WorkspaceState::Rebuilding => "REBUILDING",
            WorkspaceState::Restoring => "RESTORING",
            WorkspaceState::Maintenance => "MAINTENANCE",
            WorkspaceState::AdminMaintenance => "ADMIN_MAINTENANCE",
            WorkspaceState::Terminating => "TERMINATING",
            WorkspaceState::Terminated => "TERMINATED",
            WorkspaceState::Suspended => "SUSPENDED",
            WorkspaceState::Updating => "UPDATING",
            WorkspaceState::Stopping => "STOPPING",
            WorkspaceState::Stopped => "STOPPED",
            WorkspaceState::Error => "ERROR",
            WorkspaceState::Unknown(value) => value.as_str(),
        }
    }
}

impl From<&str> for WorkspaceState {
    fn from(s: &str) -> Self {
        match s {
            "PENDING" => WorkspaceState::Pending,
            "AVAILABLE" => WorkspaceState::Available,
            "IMPAIRED" => WorkspaceState::Impaired,
            "UNHEALTHY" => WorkspaceState::Unhealthy,
            "REBOOTING" => WorkspaceState::Rebooting,
            "STARTING" => WorkspaceState::Starting,
            "REBUILDING" => WorkspaceState::Rebuilding,
            "RESTORING" => WorkspaceState::Restoring,
            "MAINTENANCE" => WorkspaceState::Maintenance,
            "ADMIN_MAINTENANCE" => WorkspaceState::AdminMaintenance,
            "TERMINATING" => WorkspaceState::Terminating,
            "TERMINATED" => WorkspaceState::Terminated,
            "SUSPENDED" => WorkspaceState::Suspended,
            "UPDATING" => WorkspaceState::Updating,
            "STOPPING" => WorkspaceState::Stopping,
            "STOPPED" => WorkspaceState::Stopped,
            "ERROR" => WorkspaceState::Error,
            other => WorkspaceState::Unknown(other.to_owned()),
        }
    }
}

impl From<String> for WorkspaceState {
    fn from(s: String) -> Self {
        WorkspaceState::from(s.as_str())
    }
}

impl AsRef<str> for WorkspaceState {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Workspace {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub directory_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub state: Option<WorkspaceState>,
    #[serde(default)]
    pub bundle_id: Option<String>,
    #[serde(default)]
    pub subnet_id: Option<String>,
    #[serde(default)]
    pub computer_name: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RebootRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

impl RebootRequest {
    pub fn new(workspace_id: impl Into<String>) -> Self {
        RebootRequest {
            workspace_id: Some(workspace_id.into()),
        }
    }
}

/// A WorkSpace that could not be rebooted
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FailedWorkspaceChangeRequest {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
