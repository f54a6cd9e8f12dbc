/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

/// Metadata EC2 returns with every response
#[non_exhaustive]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResponseMetadata {
    pub request_id: Option<String>,
}

impl ResponseMetadata {
    pub fn new(request_id: impl Into<String>) -> Self {
        ResponseMetadata {
            request_id: Some(request_id.into()),
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}
