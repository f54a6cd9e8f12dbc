/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use http::header::{HeaderName, CONTENT_TYPE};
use http::Request;
use protocol_test_helpers::{assert_ok, validate_body, MediaType};
use smithy_http::body::SdkBody;
use std::collections::VecDeque;
use std::future::Ready;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tower::BoxError;

type ConnectVec<B> = Vec<(http::Request<SdkBody>, http::Response<B>)>;

#[derive(Debug)]
pub struct ValidateRequest {
    pub expected: http::Request<SdkBody>,
    pub actual: http::Request<SdkBody>,
}

impl ValidateRequest {
    /// Assert that the recorded request matches the expected one
    ///
    /// Every expected header must be present with the same value unless it is listed in
    /// `ignore_headers`. Bodies are compared according to the expected `Content-Type`.
    pub fn assert_matches(&self, ignore_headers: Vec<HeaderName>) {
        let (actual, expected) = (&self.actual, &self.expected);
        for (name, value) in expected.headers() {
            if !ignore_headers.contains(name) {
                let actual_header = actual
                    .headers()
                    .get(name)
                    .unwrap_or_else(|| panic!("Header {:?} missing", name));
                assert_eq!(actual_header, value, "Header mismatch for {:?}", name);
            }
        }
        let actual_body = actual.body().bytes().unwrap_or(&[]);
        let expected_body = expected.body().bytes().unwrap_or(&[]);
        let media_type = expected
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(MediaType::from)
            .unwrap_or(MediaType::Other);
        match std::str::from_utf8(expected_body) {
            Ok(expected_body) => assert_ok(validate_body(actual_body, expected_body, media_type)),
            Err(_) => assert_eq!(actual_body, expected_body),
        }
        assert_eq!(actual.uri(), expected.uri());
        assert_eq!(actual.method(), expected.method());
    }
}

/// Connector that replays canned responses and records what was sent
///
/// Each request is paired with the next `(expected request, response)` event; a request beyond
/// the last event fails with a dispatch error.
///
/// ```rust
/// use aws_hyper::test_connection::TestConnection;
/// use smithy_http::body::SdkBody;
/// let events = vec![(
///    http::Request::new(SdkBody::from("request body")),
///    http::Response::builder()
///        .status(200)
///        .body("response body")
///        .unwrap(),
/// )];
/// let conn = TestConnection::new(events);
/// let client = aws_hyper::Client::new(conn);
/// ```
#[derive(Debug)]
pub struct TestConnection<B> {
    events: Arc<Mutex<VecDeque<(http::Request<SdkBody>, http::Response<B>)>>>,
    requests: Arc<Mutex<Vec<ValidateRequest>>>,
}

// clones share the events and the recorded requests, so `B` need not be `Clone`
impl<B> Clone for TestConnection<B> {
    fn clone(&self) -> Self {
        TestConnection {
            events: self.events.clone(),
            requests: self.requests.clone(),
        }
    }
}

impl<B> TestConnection<B> {
    pub fn new(events: ConnectVec<B>) -> Self {
        TestConnection {
            events: Arc::new(Mutex::new(events.into())),
            requests: Default::default(),
        }
    }

    /// Requests received so far, paired with the request that was expected at that position
    pub fn requests(&self) -> impl Deref<Target = Vec<ValidateRequest>> + '_ {
        lock(&self.requests)
    }

    /// Assert that every recorded request matched its expectation
    pub fn assert_requests_match(&self, ignore_headers: &[HeaderName]) {
        for req in self.requests().iter() {
            req.assert_matches(ignore_headers.to_vec())
        }
        let remaining = lock(&self.events).len();
        assert_eq!(remaining, 0, "{} expected requests were never sent", remaining);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<B: Into<hyper::Body>> tower::Service<http::Request<SdkBody>> for TestConnection<B> {
    type Response = http::Response<hyper::Body>;
    type Error = BoxError;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, actual: Request<SdkBody>) -> Self::Future {
        let event = lock(&self.events).pop_front();
        std::future::ready(match event {
            Some((expected, response)) => {
                lock(&self.requests).push(ValidateRequest { expected, actual });
                Ok(response.map(Into::into))
            }
            None => Err(format!("no response left for {} {}", actual.method(), actual.uri()).into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_connection::TestConnection;
    use smithy_http::body::SdkBody;
    use tower::BoxError;
    use tower::{Service, ServiceExt};

    /// Validate that the `TestConnection` meets the required trait bounds to be used with a aws-hyper service
    #[test]
    fn meets_trait_bounds() {
        fn check() -> impl tower::Service<
            http::Request<SdkBody>,
            Response = http::Response<hyper::Body>,
            Error = BoxError,
            Future = impl Send,
        > + Clone {
            TestConnection::<String>::new(vec![])
        }
        let _ = check();
    }

    #[tokio::test]
    async fn replays_responses_in_order() {
        let mut conn = TestConnection::new(vec![
            (
                http::Request::new(SdkBody::from("first")),
                http::Response::builder().status(200).body("one").unwrap(),
            ),
            (
                http::Request::new(SdkBody::from("second")),
                http::Response::builder().status(404).body("two").unwrap(),
            ),
        ]);
        let resp = conn
            .ready()
            .await
            .unwrap()
            .call(http::Request::new(SdkBody::from("first")))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let resp = conn
            .call(http::Request::new(SdkBody::from("second")))
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
        conn.call(http::Request::new(SdkBody::from("third")))
            .await
            .expect_err("no more responses");
        conn.assert_requests_match(&[]);
        assert_eq!(conn.requests().len(), 2);
    }

    #[tokio::test]
    async fn clones_share_events_and_requests() {
        let conn = TestConnection::<hyper::Body>::new(vec![(
            http::Request::new(SdkBody::from("only")),
            http::Response::new(hyper::Body::from("ok")),
        )]);
        let mut clone = conn.clone();
        let resp = clone
            .call(http::Request::new(SdkBody::from("only")))
            .await
            .expect("one response is queued");
        assert_eq!(resp.status(), 200);
        assert_eq!(conn.requests().len(), 1);
        conn.assert_requests_match(&[]);
    }
}
