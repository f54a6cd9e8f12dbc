/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use crate::conn::Standard;
use crate::executor::{CallerContext, OutcomeFuture};
use crate::{BoxError, Client};
use aws_auth::provider::set_provider;
use aws_endpoint::{set_endpoint_resolver, AwsEndpointResolver, DefaultResolver, Params};
use aws_http::user_agent::{ApiMetadata, AwsUserAgent};
use aws_http::AwsErrorRetryPolicy;
use aws_sig_auth::signer::OperationSigningConfig;
use aws_types::SigningService;
use smithy_http::body::SdkBody;
use smithy_http::endpoint::EndpointPrefix;
use smithy_http::operation::{self, BuildError, Metadata, Operation};
use smithy_http::response::ParseHttpResponse;
use smithy_http::result::{SdkError, SdkSuccess};
use smithy_types::retry::ProvideErrorKind;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tower::Service;

/// Static description of an AWS service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceMetadata {
    /// Name used in logs and the user agent, eg. `evidently`
    pub service_name: &'static str,
    /// SigV4 signing name
    pub signing_name: &'static str,
    /// First label of the service hostname
    pub endpoint_prefix: &'static str,
    pub api_version: &'static str,
}

/// An operation input that can be turned into an HTTP request
///
/// Inputs are plain values: they are cloned before they cross into a spawned task, so the caller
/// may keep using (and mutating) its own copy.
pub trait OperationInput: Clone + Send + Sync + 'static {
    /// Name of the operation, eg. `CreateExperiment`
    const NAME: &'static str;

    type Output: Send + 'static;
    type Error: Error + ProvideErrorKind + Send + Sync + 'static;
    type Handler: ParseHttpResponse<hyper::Body, Output = Result<Self::Output, Self::Error>>
        + Default
        + Clone
        + Send
        + Sync
        + 'static;

    /// Validate the input and serialize it into a request without an endpoint
    ///
    /// Required members are checked in declaration order and the first missing member is
    /// reported. The request URI only carries the path and query.
    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError>;

    /// Host prefix applied in front of the resolved endpoint
    fn endpoint_prefix(&self) -> Result<Option<EndpointPrefix>, BuildError> {
        Ok(None)
    }
}

/// Sends operations of one service with a captured [`Config`]
///
/// Cloning a `ServiceClient` is cheap. Clones share the connector, the configuration, the endpoint
/// resolver and the retry quota.
#[derive(Clone)]
pub struct ServiceClient<C = Standard> {
    client: Client<C>,
    config: Arc<Config>,
    metadata: ServiceMetadata,
    endpoint_resolver: AwsEndpointResolver,
}

impl<C> fmt::Debug for ServiceClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("config", &self.config)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl ServiceClient<Standard> {
    /// Build a client that sends requests over https
    pub fn from_conf(metadata: ServiceMetadata, config: Config) -> Self {
        Self::from_conf_conn(metadata, config, Standard::https())
    }
}

impl<C> ServiceClient<C> {
    /// Build a client that sends requests through `conn`
    pub fn from_conf_conn(metadata: ServiceMetadata, config: Config, conn: C) -> Self {
        let endpoint_resolver = match &config.endpoint_resolver {
            Some(resolver) => resolver.clone(),
            None => Arc::new(DefaultResolver::new(metadata.endpoint_prefix)),
        };
        let client = Client::new(conn).with_retry_config(config.retry_config.clone());
        ServiceClient {
            client,
            config: Arc::new(config),
            metadata,
            endpoint_resolver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn metadata(&self) -> &ServiceMetadata {
        &self.metadata
    }

    /// Build the operation for `input`, seeding its property bag for the middleware stack
    ///
    /// Fails without side effects when the input does not validate.
    pub fn make_operation<I: OperationInput>(
        &self,
        input: &I,
    ) -> Result<Operation<I::Handler, AwsErrorRetryPolicy>, BuildError> {
        let request = input.build_request()?;
        let endpoint_prefix = input.endpoint_prefix()?;
        let mut request = operation::Request::new(request);
        {
            let mut props = request.properties_mut();
            props.insert(
                Params::builder()
                    .region(self.config.region.clone())
                    .use_fips(self.config.use_fips)
                    .use_dual_stack(self.config.use_dual_stack)
                    .set_endpoint(self.config.endpoint_url.clone())
                    .build(),
            );
            set_endpoint_resolver(&mut props, self.endpoint_resolver.clone());
            if let Some(endpoint_prefix) = endpoint_prefix {
                props.insert(endpoint_prefix);
            }
            props.insert(SigningService::from_static(self.metadata.signing_name));
            props.insert(OperationSigningConfig::default_config());
            if let Some(provider) = &self.config.credentials_provider {
                set_provider(&mut props, provider.clone());
            }
            props.insert(AwsUserAgent::new_from_environment(
                self.config.env.clone(),
                ApiMetadata::new(self.metadata.service_name, self.metadata.api_version),
                self.config.app_name.clone(),
            ));
            if let Some(signing_time) = self.config.signing_time {
                props.insert(signing_time);
            }
        }
        Ok(Operation::new(request, I::Handler::default())
            .with_metadata(Metadata::new(I::NAME, self.metadata.service_name))
            .with_retry_policy(AwsErrorRetryPolicy::new()))
    }
}

impl<C> ServiceClient<C>
where
    C: Service<http::Request<SdkBody>, Response = http::Response<hyper::Body>>
        + Send
        + Sync
        + Clone
        + 'static,
    C::Error: Into<BoxError> + Send + Sync + 'static,
    C::Future: Send + 'static,
{
    /// Send `input` and wait for the outcome
    ///
    /// The pipeline runs on the calling task: validation, endpoint resolution, signing, dispatch
    /// and response parsing.
    pub async fn send<I: OperationInput>(
        &self,
        input: &I,
    ) -> Result<I::Output, SdkError<I::Error>> {
        self.send_raw(input).await.map(|success| success.parsed)
    }

    /// Like [`send`](ServiceClient::send), but also returns the raw response on success
    pub async fn send_raw<I: OperationInput>(
        &self,
        input: &I,
    ) -> Result<SdkSuccess<I::Output>, SdkError<I::Error>> {
        let operation = self.make_operation(input).map_err(|err| {
            tracing::debug!(operation = I::NAME, err = %err, "failed to construct request");
            SdkError::ConstructionFailure(err.into())
        })?;
        self.client.call_raw(operation).await
    }

    /// Spawn `input` onto the configured executor and return a handle to its outcome
    ///
    /// `input` is cloned before this returns.
    pub fn send_callable<I: OperationInput>(&self, input: &I) -> OutcomeFuture<I::Output, I::Error> {
        let (tx, outcome) = OutcomeFuture::channel();
        let client = self.clone();
        let input = input.clone();
        self.config.executor.spawn(Box::pin(async move {
            let result = client.send(&input).await;
            // the receiver may already be gone
            let _ = tx.send(result);
        }));
        outcome
    }

    /// Spawn `input` onto the configured executor and hand the outcome to `handler`
    ///
    /// `handler` receives this client, the cloned input, the outcome and `context`. The task cannot
    /// be cancelled once spawned.
    pub fn send_async<I, F>(&self, input: &I, handler: F, context: Option<Arc<CallerContext>>)
    where
        I: OperationInput,
        F: FnOnce(&Self, &I, Result<I::Output, SdkError<I::Error>>, Option<Arc<CallerContext>>)
            + Send
            + 'static,
    {
        let client = self.clone();
        let input = input.clone();
        self.config.executor.spawn(Box::pin(async move {
            let outcome = client.send(&input).await;
            handler(&client, &input, outcome, context);
        }));
    }
}

#[cfg(all(test, feature = "test-util"))]
mod test {
    use crate::retry::RetryConfig;
    use crate::test_connection::TestConnection;
    use crate::{CallerContext, Config, OperationInput, ServiceClient, ServiceMetadata};
    use aws_auth::Credentials;
    use aws_types::region::Region;
    use bytes::Bytes;
    use smithy_http::body::SdkBody;
    use smithy_http::label;
    use smithy_http::operation::BuildError;
    use smithy_http::response::ParseStrictResponse;
    use smithy_http::result::SdkError;
    use std::sync::{mpsc, Arc};
    use std::time::{Duration, UNIX_EPOCH};

    const METADATA: ServiceMetadata = ServiceMetadata {
        service_name: "widgets",
        signing_name: "widgets",
        endpoint_prefix: "widgets",
        api_version: "2021-01-01",
    };

    #[derive(Clone, Debug, Default, PartialEq)]
    struct GetWidgetInput {
        name: Option<String>,
    }

    #[derive(Clone, Default)]
    struct GetWidget;

    impl ParseStrictResponse for GetWidget {
        type Output = Result<String, smithy_types::Error>;

        fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
            if response.status().is_success() {
                Ok(String::from_utf8_lossy(response.body()).to_string())
            } else {
                Err(smithy_types::Error::builder()
                    .code(String::from_utf8_lossy(response.body()))
                    .build())
            }
        }
    }

    impl OperationInput for GetWidgetInput {
        const NAME: &'static str = "GetWidget";
        type Output = String;
        type Error = smithy_types::Error;
        type Handler = GetWidget;

        fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
            let name = match self.name.as_deref() {
                Some(name) if !name.is_empty() => label::fmt_string(name, false),
                _ => return Err(BuildError::MissingField { field: "Name" }),
            };
            Ok(http::Request::builder()
                .method("GET")
                .uri(format!("/widgets/{}", name))
                .body(SdkBody::empty())?)
        }
    }

    fn config() -> Config {
        Config::builder()
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::from_keys("AKIAfoo", "bar", None))
            .signing_time(UNIX_EPOCH + Duration::from_secs(1613414417))
            .retry_config(RetryConfig::disabled())
            .build()
    }

    fn response(status: u16, body: &'static str) -> (http::Request<SdkBody>, http::Response<&'static str>) {
        (
            http::Request::builder()
                .uri("https://widgets.us-east-1.amazonaws.com/widgets/w1")
                .body(SdkBody::empty())
                .unwrap(),
            http::Response::builder().status(status).body(body).unwrap(),
        )
    }

    fn input() -> GetWidgetInput {
        GetWidgetInput {
            name: Some("w1".to_string()),
        }
    }

    #[tokio::test]
    async fn missing_field_never_reaches_the_network() {
        let conn = TestConnection::new(vec![response(200, "widget")]);
        let client = ServiceClient::from_conf_conn(METADATA, config(), conn.clone());
        let err = client
            .send(&GetWidgetInput::default())
            .await
            .expect_err("name is required");
        assert!(matches!(err, SdkError::ConstructionFailure(_)));
        assert_eq!(
            err.to_string(),
            "failed to construct request: Missing required field [Name]"
        );
        assert!(conn.requests().is_empty());
    }

    #[tokio::test]
    async fn sends_resolved_and_signed_requests() {
        let conn = TestConnection::new(vec![response(200, "widget")]);
        let client = ServiceClient::from_conf_conn(METADATA, config(), conn.clone());
        let output = client.send(&input()).await.expect("success");
        assert_eq!(output, "widget");
        conn.assert_requests_match(&[]);
        let requests = conn.requests();
        let sent = &requests[0].actual;
        assert!(sent.headers().contains_key("authorization"));
        assert!(sent.headers().contains_key("x-amz-user-agent"));
    }

    #[tokio::test]
    async fn calling_conventions_agree() {
        let conn = TestConnection::new(vec![
            response(404, "NotFound"),
            response(404, "NotFound"),
            response(404, "NotFound"),
        ]);
        let client = ServiceClient::from_conf_conn(METADATA, config(), conn.clone());
        let sync = client.send(&input()).await.expect_err("not found");
        let callable = client
            .send_callable(&input())
            .await
            .expect_err("not found");
        let (tx, rx) = mpsc::channel();
        let context = Arc::new(CallerContext::new());
        client.send_async(
            &input(),
            move |_client, input, outcome, context| {
                tx.send((input.clone(), outcome, context)).unwrap();
            },
            Some(context.clone()),
        );
        let (async_input, async_outcome, async_context) = tokio::task::spawn_blocking(move || {
            rx.recv().expect("handler was invoked")
        })
        .await
        .unwrap();
        let async_err = async_outcome.expect_err("not found");
        assert_eq!(async_input, input());
        assert_eq!(async_context, Some(context));
        for err in &[sync, callable, async_err] {
            assert_eq!(err.service_error().and_then(|e| e.code()), Some("NotFound"));
        }
        assert_eq!(conn.requests().len(), 3);
    }

    #[tokio::test]
    async fn callable_clones_the_input() {
        let conn = TestConnection::new(vec![response(200, "widget")]);
        let client = ServiceClient::from_conf_conn(METADATA, config(), conn.clone());
        let mut input = input();
        let outcome = client.send_callable(&input);
        input.name = Some("changed".to_string());
        assert_eq!(outcome.await.expect("success"), "widget");
        assert_eq!(
            conn.requests()[0].actual.uri().path(),
            "/widgets/w1"
        );
    }
}
