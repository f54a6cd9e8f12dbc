/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::operation;
use aws_hyper::OperationInput;
use smithy_http::body::SdkBody;
use smithy_http::operation::BuildError;
use smithy_query::QueryWriter;

const API_VERSION: &str = "2016-11-15";

fn form_request(body: String) -> Result<http::Request<SdkBody>, BuildError> {
    Ok(http::Request::builder()
        .method(http::Method::POST)
        .uri("/")
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(SdkBody::from(body))?)
}

/// Input for [`EnableReachabilityAnalyzerOrganizationSharing`](crate::Client::enable_reachability_analyzer_organization_sharing)
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnableReachabilityAnalyzerOrganizationSharingInput {
    /// Check for the required permissions without making the request
    pub dry_run: Option<bool>,
}

impl EnableReachabilityAnalyzerOrganizationSharingInput {
    pub fn builder() -> enable_reachability_analyzer_organization_sharing_input::Builder {
        enable_reachability_analyzer_organization_sharing_input::Builder::default()
    }
}

impl OperationInput for EnableReachabilityAnalyzerOrganizationSharingInput {
    const NAME: &'static str = "EnableReachabilityAnalyzerOrganizationSharing";
    type Output = crate::output::EnableReachabilityAnalyzerOrganizationSharingOutput;
    type Error = crate::error::Error;
    type Handler = operation::EnableReachabilityAnalyzerOrganizationSharing;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        let mut out = String::new();
        let mut writer = QueryWriter::new(&mut out, Self::NAME, API_VERSION);
        if let Some(dry_run) = self.dry_run {
            writer.prefix("DryRun").boolean(dry_run);
        }
        writer.finish();
        form_request(out)
    }
}

pub mod enable_reachability_analyzer_organization_sharing_input {
    use crate::input::EnableReachabilityAnalyzerOrganizationSharingInput;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        dry_run: Option<bool>,
    }

    impl Builder {
        pub fn dry_run(mut self, dry_run: bool) -> Self {
            self.dry_run = Some(dry_run);
            self
        }

        pub fn set_dry_run(mut self, dry_run: Option<bool>) -> Self {
            self.dry_run = dry_run;
            self
        }

        pub fn build(self) -> EnableReachabilityAnalyzerOrganizationSharingInput {
            EnableReachabilityAnalyzerOrganizationSharingInput {
                dry_run: self.dry_run,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::input::EnableReachabilityAnalyzerOrganizationSharingInput;
    use aws_hyper::OperationInput;
    use protocol_test_helpers::{assert_ok, validate_body, validate_headers, MediaType};

    #[test]
    fn form_body() {
        let request = EnableReachabilityAnalyzerOrganizationSharingInput::default()
            .build_request()
            .expect("no member is required");
        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(request.uri(), "/");
        assert_ok(validate_headers(
            &request,
            &[("content-type", "application/x-www-form-urlencoded")],
        ));
        assert_eq!(
            request.body().bytes(),
            Some(&b"Action=EnableReachabilityAnalyzerOrganizationSharing&Version=2016-11-15"[..])
        );
    }

    #[test]
    fn dry_run_is_serialized() {
        let request = EnableReachabilityAnalyzerOrganizationSharingInput::builder()
            .dry_run(true)
            .build()
            .build_request()
            .unwrap();
        assert_ok(validate_body(
            request.body().bytes().unwrap(),
            "Version=2016-11-15&DryRun=true&Action=EnableReachabilityAnalyzerOrganizationSharing",
            MediaType::UrlEncodedForm,
        ));
    }
}
