/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::model::ResponseMetadata;

#[non_exhaustive]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EnableReachabilityAnalyzerOrganizationSharingOutput {
    /// `true` when sharing was enabled
    pub return_value: Option<bool>,
    pub response_metadata: ResponseMetadata,
}

impl EnableReachabilityAnalyzerOrganizationSharingOutput {
    pub fn builder() -> enable_reachability_analyzer_organization_sharing_output::Builder {
        enable_reachability_analyzer_organization_sharing_output::Builder::default()
    }

    pub fn return_value(&self) -> Option<bool> {
        self.return_value
    }

    pub fn response_metadata(&self) -> &ResponseMetadata {
        &self.response_metadata
    }
}

pub mod enable_reachability_analyzer_organization_sharing_output {
    use crate::model::ResponseMetadata;
    use crate::output::EnableReachabilityAnalyzerOrganizationSharingOutput;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Builder {
        return_value: Option<bool>,
        response_metadata: Option<ResponseMetadata>,
    }

    impl Builder {
        pub fn return_value(mut self, return_value: bool) -> Self {
            self.return_value = Some(return_value);
            self
        }

        pub fn set_return_value(mut self, return_value: Option<bool>) -> Self {
            self.return_value = return_value;
            self
        }

        pub fn response_metadata(mut self, response_metadata: ResponseMetadata) -> Self {
            self.response_metadata = Some(response_metadata);
            self
        }

        pub fn build(self) -> EnableReachabilityAnalyzerOrganizationSharingOutput {
            EnableReachabilityAnalyzerOrganizationSharingOutput {
                return_value: self.return_value,
                response_metadata: self.response_metadata.unwrap_or_default(),
            }
        }
    }
}
