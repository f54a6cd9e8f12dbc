/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_types::os_shim_internal::Env;
use http::header::{HeaderName, InvalidHeaderValue, USER_AGENT};
use http::HeaderValue;
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use std::borrow::Cow;
use std::convert::TryFrom;
use thiserror::Error;

const SDK_NAME: &str = "aws-sdk-rust";

/// Service name and API version reported in `x-amz-user-agent`
#[derive(Clone, Debug)]
pub struct ApiMetadata {
    service_id: Cow<'static, str>,
    version: &'static str,
}

impl ApiMetadata {
    pub const fn new(service_id: &'static str, version: &'static str) -> Self {
        Self {
            service_id: Cow::Borrowed(service_id),
            version,
        }
    }
}

/// User agent of one operation
///
/// Inserted into the property bag when the operation is built; [`UserAgentStage`] turns it into
/// the `User-Agent` and `x-amz-user-agent` headers.
#[derive(Clone, Debug)]
pub struct AwsUserAgent {
    sdk_version: &'static str,
    api: ApiMetadata,
    os_family: &'static str,
    os_version: Option<String>,
    exec_env: Option<String>,
    app_name: Option<Cow<'static, str>>,
}

impl AwsUserAgent {
    /// `AWS_EXECUTION_ENV` is reported when set
    pub fn new_from_environment(
        env: Env,
        api: ApiMetadata,
        app_name: Option<Cow<'static, str>>,
    ) -> Self {
        AwsUserAgent {
            sdk_version: env!("CARGO_PKG_VERSION"),
            api,
            os_family: std::env::consts::OS,
            os_version: None,
            exec_env: env.get("AWS_EXECUTION_ENV").ok(),
            app_name,
        }
    }

    /// A user agent that does not depend on the build or the host
    pub fn for_tests() -> Self {
        AwsUserAgent {
            sdk_version: "0.123.test",
            api: ApiMetadata::new("test-service", "0.123"),
            os_family: "windows",
            os_version: Some("XPSP3".to_string()),
            exec_env: None,
            app_name: None,
        }
    }

    fn os(&self) -> String {
        match &self.os_version {
            Some(version) => format!("os/{}/{}", self.os_family, version),
            None => format!("os/{}", self.os_family),
        }
    }

    /// Value of `x-amz-user-agent`
    pub fn aws_ua_header(&self) -> String {
        let mut header = format!(
            "{}/{} api/{}/{} {} lang/rust",
            SDK_NAME,
            self.sdk_version,
            self.api.service_id,
            self.api.version,
            self.os()
        );
        if let Some(exec_env) = &self.exec_env {
            header.push_str(&format!(" exec-env/{}", exec_env));
        }
        if let Some(app_name) = &self.app_name {
            header.push_str(&format!(" app/{}", app_name));
        }
        header
    }

    /// Value of `User-Agent`, without the service or application
    pub fn ua_header(&self) -> String {
        format!("{}/{} {} lang/rust", SDK_NAME, self.sdk_version, self.os())
    }
}

#[non_exhaustive]
#[derive(Default, Clone, Debug)]
pub struct UserAgentStage;

impl UserAgentStage {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Error)]
pub enum UserAgentStageError {
    #[error("User agent missing from property bag")]
    UserAgentMissing,
    #[error("Provided user agent header was invalid")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

lazy_static::lazy_static! {
    static ref X_AMZ_USER_AGENT: HeaderName = HeaderName::from_static("x-amz-user-agent");
}

impl MapRequest for UserAgentStage {
    type Error = UserAgentStageError;

    fn apply(&self, request: Request) -> Result<Request, Self::Error> {
        request.augment(|mut req, conf| {
            let ua = conf
                .get::<AwsUserAgent>()
                .ok_or(UserAgentStageError::UserAgentMissing)?;
            req.headers_mut()
                .append(USER_AGENT, HeaderValue::try_from(ua.ua_header())?);
            req.headers_mut().append(
                X_AMZ_USER_AGENT.clone(),
                HeaderValue::try_from(ua.aws_ua_header())?,
            );

            Ok(req)
        })
    }
}
