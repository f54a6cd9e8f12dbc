/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

#[cfg(feature = "test-util")]
use crate::test_connection::TestConnection;
use crate::BoxError;
use hyper::client::{HttpConnector, ResponseFuture};
use hyper_tls::HttpsConnector;
use smithy_http::body::SdkBody;
use std::fmt;
use std::future::{Future, Ready};
use std::pin::Pin;
use std::task::{Context, Poll};

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, BoxError>> + Send>>;

/// A good base connection type for most use cases
///
/// This supports three options:
/// 1. HTTPS
/// 2. A `TestConnection`
/// 3. Any implementation of the `HttpService` trait
///
/// This is designed to be used with [`aws_hyper::Client`](crate::Client) as a connector.
#[derive(Clone)]
pub struct Standard(Connector);

impl Standard {
    /// An https connection
    pub fn https() -> Self {
        let https = HttpsConnector::new();
        Self(Connector::Https(
            hyper::Client::builder().build::<_, SdkBody>(https),
        ))
    }

    /// A connection based on the provided `impl HttpService`
    ///
    /// Generally, [`Standard::https()`](Standard::https) should be used. This constructor is intended to support
    /// using things like [`TestConnection`](crate::test_connection::TestConnection) or alternative
    /// http implementations.
    pub fn new(connector: impl HttpService + 'static) -> Self {
        Self(Connector::Dyn(Box::new(connector)))
    }
}

impl fmt::Debug for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.0 {
            Connector::Https(_) => "Https",
            #[cfg(feature = "test-util")]
            Connector::Test(_) => "Test",
            Connector::Dyn(_) => "Dyn",
        };
        f.debug_tuple("Standard").field(&kind).finish()
    }
}

#[cfg(feature = "test-util")]
impl From<TestConnection<hyper::Body>> for Standard {
    fn from(conn: TestConnection<hyper::Body>) -> Self {
        Self(Connector::Test(conn))
    }
}

/// An Http connection type for most use cases
///
/// This supports three options:
/// 1. HTTPS
/// 2. A `TestConnection`
/// 3. Any implementation of the `HttpService` trait
///
/// This is designed to be used with [`aws_hyper::Client`](crate::Client) as a connector.
enum Connector {
    /// An Https Connection
    ///
    /// This is the correct connection for use cases talking to real AWS services.
    Https(hyper::Client<HttpsConnector<HttpConnector>, SdkBody>),

    /// A Test Connection
    #[cfg(feature = "test-util")]
    Test(TestConnection<hyper::Body>),

    /// A boxed implementation of the `HttpService` trait
    ///
    /// This enables using any implementation of the HttpService trait as a connection.
    Dyn(Box<dyn HttpService>),
}

impl Clone for Connector {
    fn clone(&self) -> Self {
        match self {
            Connector::Https(client) => Connector::Https(client.clone()),
            #[cfg(feature = "test-util")]
            Connector::Test(test_conn) => Connector::Test(test_conn.clone()),
            Connector::Dyn(box_conn) => Connector::Dyn(box_conn.clone_box()),
        }
    }
}

/// An object safe connection to an HTTP service
///
/// Any `tower::Service` that is `Clone + Send + Sync` with the right request, response and error
/// types implements it automatically.
pub trait HttpService: Send + Sync {
    /// Return whether this service is ready to accept a request
    ///
    /// See [`Service::poll_ready`](tower::Service::poll_ready)
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), BoxError>>;

    /// Call this service and return a response
    ///
    /// See [`Service::call`](tower::Service::call)
    fn call(&mut self, req: http::Request<SdkBody>) -> BoxFuture<http::Response<hyper::Body>>;

    /// Return a Boxed-clone of this service
    ///
    /// `aws_hyper::Client` will clone the inner service for each request so this should be a cheap
    /// clone operation.
    fn clone_box(&self) -> Box<dyn HttpService>;
}

impl<S> HttpService for S
where
    S: tower::Service<http::Request<SdkBody>, Response = http::Response<hyper::Body>>
        + Send
        + Sync
        + Clone
        + 'static,
    S::Error: Into<BoxError> + Send + Sync + 'static,
    S::Future: Send + 'static,
{
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), BoxError>> {
        tower::Service::poll_ready(self, cx).map_err(|err| err.into())
    }

    fn call(&mut self, req: http::Request<SdkBody>) -> BoxFuture<http::Response<hyper::Body>> {
        let fut = tower::Service::call(self, req);
        Box::pin(async move { fut.await.map_err(|err| err.into()) })
    }

    fn clone_box(&self) -> Box<dyn HttpService> {
        Box::new(self.clone())
    }
}

impl tower::Service<http::Request<SdkBody>> for Standard {
    type Response = http::Response<hyper::Body>;
    type Error = BoxError;
    type Future = StandardFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        match &mut self.0 {
            Connector::Https(https) => tower::Service::poll_ready(https, cx).map_err(|err| err.into()),
            Connector::Dyn(conn) => conn.poll_ready(cx),
            #[cfg(feature = "test-util")]
            Connector::Test(_) => Poll::Ready(Ok(())),
        }
    }

    fn call(&mut self, req: http::Request<SdkBody>) -> Self::Future {
        match &mut self.0 {
            Connector::Https(https) => StandardFuture::Https(https.request(req)),
            Connector::Dyn(conn) => StandardFuture::Dyn(conn.call(req)),
            #[cfg(feature = "test-util")]
            Connector::Test(conn) => StandardFuture::TestConn(tower::Service::call(conn, req)),
        }
    }
}

/// Future returned by `Standard`
#[pin_project::pin_project(project = FutProj)]
pub enum StandardFuture {
    Https(#[pin] ResponseFuture),
    TestConn(#[pin] Ready<Result<http::Response<hyper::Body>, BoxError>>),
    Dyn(#[pin] BoxFuture<http::Response<hyper::Body>>),
}

impl Future for StandardFuture {
    type Output = Result<http::Response<hyper::Body>, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            FutProj::TestConn(ready_fut) => ready_fut.poll(cx),
            FutProj::Https(fut) => fut.poll(cx).map_err(|err| err.into()),
            FutProj::Dyn(dyn_fut) => dyn_fut.poll(cx),
        }
    }
}
