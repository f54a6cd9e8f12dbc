/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Client configuration
//!
//! A [`Config`] is built once and captured by every client created from it. It is never mutated
//! afterwards.

use crate::executor::{Executor, TokioExecutor};
use crate::retry::RetryConfig;
use aws_auth::provider::env::EnvironmentVariableCredentialsProvider;
use aws_auth::provider::{CredentialsProvider, ProvideCredentials};
use aws_endpoint::{AwsEndpointResolver, ResolveAwsEndpoint};
use aws_types::os_shim_internal::Env;
use aws_types::region::{EnvironmentProvider, ProvideRegion, Region};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Configuration shared by all operations of a client
#[derive(Clone)]
pub struct Config {
    pub(crate) region: Option<Region>,
    pub(crate) credentials_provider: Option<CredentialsProvider>,
    pub(crate) endpoint_resolver: Option<AwsEndpointResolver>,
    pub(crate) endpoint_url: Option<String>,
    pub(crate) use_fips: bool,
    pub(crate) use_dual_stack: bool,
    pub(crate) retry_config: RetryConfig,
    pub(crate) executor: Arc<dyn Executor>,
    pub(crate) app_name: Option<Cow<'static, str>>,
    pub(crate) signing_time: Option<SystemTime>,
    pub(crate) env: Env,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("use_fips", &self.use_fips)
            .field("use_dual_stack", &self.use_dual_stack)
            .field("retry_config", &self.retry_config)
            .field("executor", &self.executor)
            .field("app_name", &self.app_name)
            .finish()
    }
}

impl Config {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Load region and credentials from the process environment
    ///
    /// The region comes from `AWS_REGION` (or `AWS_DEFAULT_REGION`). Credentials are read from
    /// `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_SESSION_TOKEN` when a request is
    /// signed.
    pub fn from_env() -> Self {
        Self::builder().load_env(Env::real()).build()
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn use_fips(&self) -> bool {
        self.use_fips
    }

    pub fn use_dual_stack(&self) -> bool {
        self.use_dual_stack
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }
}

#[derive(Default)]
pub struct Builder {
    region: Option<Region>,
    credentials_provider: Option<CredentialsProvider>,
    endpoint_resolver: Option<AwsEndpointResolver>,
    endpoint_url: Option<String>,
    use_fips: bool,
    use_dual_stack: bool,
    retry_config: Option<RetryConfig>,
    executor: Option<Arc<dyn Executor>>,
    app_name: Option<Cow<'static, str>>,
    signing_time: Option<SystemTime>,
    env: Option<Env>,
}

impl Builder {
    pub fn region(mut self, region: impl Into<Option<Region>>) -> Self {
        self.region = region.into();
        self
    }

    pub fn credentials_provider(mut self, provider: impl ProvideCredentials + 'static) -> Self {
        self.credentials_provider = Some(Arc::new(provider));
        self
    }

    pub fn set_credentials_provider(&mut self, provider: Option<CredentialsProvider>) -> &mut Self {
        self.credentials_provider = provider;
        self
    }

    /// Override the endpoint resolver of every service built from this config
    pub fn endpoint_resolver(mut self, resolver: impl ResolveAwsEndpoint + 'static) -> Self {
        self.endpoint_resolver = Some(Arc::new(resolver));
        self
    }

    /// Send every request to `endpoint_url` instead of the computed service endpoint
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn set_endpoint_url(&mut self, endpoint_url: Option<String>) -> &mut Self {
        self.endpoint_url = endpoint_url;
        self
    }

    pub fn use_fips(mut self, use_fips: bool) -> Self {
        self.use_fips = use_fips;
        self
    }

    pub fn use_dual_stack(mut self, use_dual_stack: bool) -> Self {
        self.use_dual_stack = use_dual_stack;
        self
    }

    pub fn retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = Some(retry_config);
        self
    }

    pub fn executor(mut self, executor: impl Executor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Application name reported in the user agent
    pub fn app_name(mut self, app_name: impl Into<Cow<'static, str>>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Sign every request as if it were sent at `signing_time`
    ///
    /// Only useful for tests that compare signatures.
    pub fn signing_time(mut self, signing_time: SystemTime) -> Self {
        self.signing_time = Some(signing_time);
        self
    }

    /// Fill in the region and credentials from `env`
    ///
    /// Values that were already set on the builder win.
    pub fn load_env(mut self, env: Env) -> Self {
        if self.region.is_none() {
            self.region = EnvironmentProvider::from_env(env.clone()).region();
        }
        if self.credentials_provider.is_none() {
            self.credentials_provider = Some(Arc::new(
                EnvironmentVariableCredentialsProvider::from_env(env.clone()),
            ));
        }
        self.env = Some(env);
        self
    }

    pub fn build(self) -> Config {
        Config {
            region: self.region,
            credentials_provider: self.credentials_provider,
            endpoint_resolver: self.endpoint_resolver,
            endpoint_url: self.endpoint_url,
            use_fips: self.use_fips,
            use_dual_stack: self.use_dual_stack,
            retry_config: self.retry_config.unwrap_or_default(),
            executor: self
                .executor
                .unwrap_or_else(|| Arc::new(TokioExecutor::new())),
            app_name: self.app_name,
            signing_time: self.signing_time,
            env: self.env.unwrap_or_else(Env::real),
        }
    }
}
