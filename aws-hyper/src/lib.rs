/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Hyper based dispatch of signed AWS requests
//!
//! [`Client`] owns the connector and the retry state and sends fully built [`Operation`]s through
//! the standard middleware stack. [`ServiceClient`] sits on top of it and turns service inputs into
//! operations, offering the three calling conventions: awaited, callable and async.

pub mod config;
pub mod conn;
pub mod executor;
pub mod retry;
mod service;
#[cfg(feature = "test-util")]
pub mod test_connection;

pub use config::Config;
pub use executor::{CallerContext, Executor, OutcomeFuture, TokioExecutor};
pub use service::{OperationInput, ServiceClient, ServiceMetadata};
pub use smithy_http::result::{SdkError, SdkSuccess};

use crate::conn::Standard;
use crate::retry::{RetryConfig, RetryHandlerFactory};
use aws_endpoint::AwsEndpointStage;
use aws_http::user_agent::UserAgentStage;
use aws_sig_auth::middleware::SigV4SigningStage;
use aws_sig_auth::signer::SigV4Signer;
use smithy_http::body::SdkBody;
use smithy_http::operation::Operation;
use smithy_http::response::ParseHttpResponse;
use smithy_http::retry::ClassifyResponse;
use smithy_http_tower::dispatch::DispatchLayer;
use smithy_http_tower::map_request::MapRequestLayer;
use smithy_http_tower::parse_response::ParseResponseLayer;
use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Service, ServiceBuilder, ServiceExt};
use tracing::Instrument;

type BoxError = Box<dyn Error + Send + Sync>;

/// AWS Service Client
///
/// Hyper-based AWS Service Client. Most customers will want to construct a client with
/// [`Client::https()`](Client::https). For testing & other more advanced use cases, a custom
/// connector may be used via [`Client::new(connector)`](Client::new).
///
/// The internal connector must implement the following trait bound to be used to dispatch requests:
/// ```rust,ignore
///    S: Service<http::Request<SdkBody>, Response = http::Response<hyper::Body>>
///        + Send
///        + Sync
///        + Clone
///        + 'static,
///    S::Error: Into<BoxError> + Send + Sync + 'static,
///    S::Future: Send + 'static,
/// ```
#[derive(Clone)]
pub struct Client<S = Standard> {
    inner: S,
    retry_handler: RetryHandlerFactory,
}

impl<S: Debug> Debug for Client<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").field("inner", &self.inner).finish()
    }
}

impl<S> Client<S> {
    pub fn new(connector: S) -> Self {
        Client {
            inner: connector,
            retry_handler: RetryHandlerFactory::new(RetryConfig::default()),
        }
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_handler.with_config(retry_config);
        self
    }
}

impl Client<Standard> {
    /// Construct an `https` based client
    pub fn https() -> Self {
        Client::new(Standard::https())
    }
}

impl<S> Client<S>
where
    S: Service<http::Request<SdkBody>, Response = http::Response<hyper::Body>>
        + Send
        + Sync
        + Clone
        + 'static,
    S::Error: Into<BoxError> + Send + Sync + 'static,
    S::Future: Send + 'static,
{
    /// Dispatch this request to the network
    ///
    /// For ergonomics, this does not include the raw response for successful responses. To
    /// access the raw response use `call_raw`.
    pub async fn call<O, T, E, Retry>(&self, input: Operation<O, Retry>) -> Result<T, SdkError<E>>
    where
        O: ParseHttpResponse<hyper::Body, Output = Result<T, E>> + Send + Sync + Clone + 'static,
        Retry: ClassifyResponse<SdkSuccess<T>, SdkError<E>> + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        self.call_raw(input).await.map(|res| res.parsed)
    }

    /// Dispatch this request to the network
    ///
    /// The returned result contains the raw HTTP response which can be useful for debugging or implementing
    /// unsupported features.
    pub async fn call_raw<O, T, E, Retry>(
        &self,
        input: Operation<O, Retry>,
    ) -> Result<SdkSuccess<T>, SdkError<E>>
    where
        O: ParseHttpResponse<hyper::Body, Output = Result<T, E>> + Send + Sync + Clone + 'static,
        Retry: ClassifyResponse<SdkSuccess<T>, SdkError<E>> + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let span = match input.metadata() {
            Some(metadata) => tracing::info_span!(
                "send_operation",
                operation = metadata.name(),
                service = metadata.service()
            ),
            None => tracing::info_span!("send_operation"),
        };
        let signer = MapRequestLayer::for_mapper(SigV4SigningStage::new(SigV4Signer::new()));
        let endpoint_resolver = MapRequestLayer::for_mapper(AwsEndpointStage);
        let user_agent = MapRequestLayer::for_mapper(UserAgentStage::new());
        let inner = RawRequestLogging {
            inner: self.inner.clone(),
        };
        let mut svc = ServiceBuilder::new()
            // Create a new request-scoped policy
            .retry(self.retry_handler.new_handler())
            .layer(ParseResponseLayer::<O, Retry>::new())
            // These layers can be considered as occurring in order, that is, first resolve the
            // endpoint, then set the user agent, then sign, then dispatch over the wire.
            .layer(endpoint_resolver)
            .layer(user_agent)
            .layer(signer)
            .layer(DispatchLayer::new())
            .service(inner);
        async move { svc.ready().await?.call(input).await }
            .instrument(span)
            .await
    }
}

/// Logs every request handed to the connector and the status of its response
#[derive(Clone, Debug)]
pub struct RawRequestLogging<S> {
    inner: S,
}

impl<S> Service<http::Request<SdkBody>> for RawRequestLogging<S>
where
    S: Service<http::Request<SdkBody>, Response = http::Response<hyper::Body>>,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(|err| err.into())
    }

    fn call(&mut self, req: http::Request<SdkBody>) -> Self::Future {
        tracing::trace!(method = %req.method(), uri = %req.uri(), headers = ?req.headers(), "sending request");
        let fut = self.inner.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(resp) => {
                    tracing::debug!(status = %resp.status(), "received response");
                    Ok(resp)
                }
                Err(err) => {
                    let err = err.into();
                    tracing::debug!(err = %err, "request dispatch failed");
                    Err(err)
                }
            }
        })
    }
}
