/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::error::Error;
use crate::input::EnableReachabilityAnalyzerOrganizationSharingInput;
use crate::output::EnableReachabilityAnalyzerOrganizationSharingOutput;
use crate::METADATA;
use aws_hyper::conn::Standard;
use aws_hyper::{CallerContext, Config, OperationInput, OutcomeFuture, SdkError, ServiceClient};
use smithy_http::body::SdkBody;
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Client for Amazon EC2
#[derive(Clone, Debug)]
pub struct Client<C = Standard> {
    handle: ServiceClient<C>,
}

impl Client<Standard> {
    /// A client configured from the environment, sending requests over https
    pub fn from_env() -> Self {
        Self::from_conf(Config::from_env())
    }

    pub fn from_conf(conf: Config) -> Self {
        Client {
            handle: ServiceClient::from_conf(METADATA, conf),
        }
    }
}

impl<C> Client<C> {
    pub fn from_conf_conn(conf: Config, conn: C) -> Self {
        Client {
            handle: ServiceClient::from_conf_conn(METADATA, conf, conn),
        }
    }

    pub fn conf(&self) -> &Config {
        self.handle.config()
    }
}

impl<C> Client<C>
where
    C: tower::Service<http::Request<SdkBody>, Response = http::Response<hyper::Body>>
        + Send
        + Sync
        + Clone
        + 'static,
    C::Error: Into<BoxError> + Send + Sync + 'static,
    C::Future: Send + 'static,
{
    /// Enable Reachability Analyzer to analyze paths across the accounts of the organization
    pub async fn enable_reachability_analyzer_organization_sharing(
        &self,
        input: &EnableReachabilityAnalyzerOrganizationSharingInput,
    ) -> Result<EnableReachabilityAnalyzerOrganizationSharingOutput, SdkError<Error>> {
        self.handle.send(input).await
    }

    /// Run any operation on the configured executor, returning a future for its outcome
    pub fn callable<I>(&self, input: &I) -> OutcomeFuture<I::Output, Error>
    where
        I: OperationInput<Error = Error>,
    {
        self.handle.send_callable(input)
    }

    /// Run any operation on the configured executor and hand its outcome to `handler`
    pub fn send_async<I, F>(&self, input: &I, handler: F, context: Option<Arc<CallerContext>>)
    where
        I: OperationInput<Error = Error>,
        F: FnOnce(&Self, &I, Result<I::Output, SdkError<Error>>, Option<Arc<CallerContext>>)
            + Send
            + 'static,
    {
        let client = self.clone();
        self.handle.send_async(
            input,
            move |_, input, outcome, context| handler(&client, input, outcome, context),
            context,
        );
    }
}
