/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_auth::Credentials;
use aws_hyper::retry::RetryConfig;
use aws_hyper::test_connection::TestConnection;
use aws_types::region::Region;
use ec2::input::EnableReachabilityAnalyzerOrganizationSharingInput;
use ec2::{CallerContext, Client, Config, SdkError};
use smithy_http::body::SdkBody;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

fn config(retry_config: RetryConfig) -> Config {
    Config::builder()
        .region(Region::new("us-west-2"))
        .credentials_provider(Credentials::from_keys("ANOTREAL", "notrealrnrELgWzOk3IfjzDKtFBhDby", None))
        .signing_time(UNIX_EPOCH + Duration::from_secs(1624036048))
        .retry_config(retry_config)
        .build()
}

fn expected(body: &'static str) -> http::Request<SdkBody> {
    http::Request::builder()
        .method("POST")
        .uri("https://ec2.us-west-2.amazonaws.com/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(SdkBody::from(body))
        .unwrap()
}

const SUCCESS: &str = r#"<EnableReachabilityAnalyzerOrganizationSharingResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
    <requestId>59dbff89-35bd-4eac-99ed-be587EXAMPLE</requestId>
    <returnValue>true</returnValue>
</EnableReachabilityAnalyzerOrganizationSharingResponse>"#;

#[tokio::test]
async fn enable_sharing() {
    let conn = TestConnection::new(vec![(
        expected("Action=EnableReachabilityAnalyzerOrganizationSharing&Version=2016-11-15"),
        http::Response::builder().status(200).body(SUCCESS).unwrap(),
    )]);
    let client = Client::from_conf_conn(config(RetryConfig::disabled()), conn.clone());
    let output = client
        .enable_reachability_analyzer_organization_sharing(
            &EnableReachabilityAnalyzerOrganizationSharingInput::default(),
        )
        .await
        .expect("success");
    assert_eq!(output.return_value(), Some(true));
    assert_eq!(
        output.response_metadata().request_id(),
        Some("59dbff89-35bd-4eac-99ed-be587EXAMPLE")
    );
    conn.assert_requests_match(&[]);
}

#[tokio::test]
async fn dry_run_error() {
    let conn = TestConnection::new(vec![(
        expected("Action=EnableReachabilityAnalyzerOrganizationSharing&Version=2016-11-15&DryRun=true"),
        http::Response::builder()
            .status(412)
            .body("<Response><Errors><Error><Code>DryRunOperation</Code><Message>Request would have succeeded, but DryRun flag is set.</Message></Error></Errors><RequestID>req-412</RequestID></Response>")
            .unwrap(),
    )]);
    let client = Client::from_conf_conn(config(RetryConfig::disabled()), conn.clone());
    let input = EnableReachabilityAnalyzerOrganizationSharingInput::builder()
        .dry_run(true)
        .build();
    let err = client
        .enable_reachability_analyzer_organization_sharing(&input)
        .await
        .expect_err("dry run");
    let service_error = err.service_error().expect("service error");
    assert!(service_error.is_dry_run_operation());
    assert_eq!(service_error.request_id(), Some("req-412"));
    conn.assert_requests_match(&[]);
}

#[tokio::test]
async fn missing_credentials_provider_fails_before_dispatch() {
    let conn = TestConnection::<&'static str>::new(vec![]);
    let conf = Config::builder()
        .region(Region::new("us-west-2"))
        .retry_config(RetryConfig::disabled())
        .build();
    let client = Client::from_conf_conn(conf, conn.clone());
    let err = client
        .enable_reachability_analyzer_organization_sharing(
            &EnableReachabilityAnalyzerOrganizationSharingInput::default(),
        )
        .await
        .expect_err("unsigned requests are not sent");
    match err {
        SdkError::ConstructionFailure(err) => assert_eq!(
            err.to_string(),
            "No credentials provider in the property bag"
        ),
        other => panic!("expected a construction failure, got {:?}", other),
    }
    assert!(conn.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn throttled_requests_are_retried() {
    let input = EnableReachabilityAnalyzerOrganizationSharingInput::default();
    let body = "Action=EnableReachabilityAnalyzerOrganizationSharing&Version=2016-11-15";
    let conn = TestConnection::new(vec![
        (
            expected(body),
            http::Response::builder()
                .status(503)
                .body("<Response><Errors><Error><Code>RequestLimitExceeded</Code><Message>Request limit exceeded.</Message></Error></Errors><RequestID>req-503</RequestID></Response>")
                .unwrap(),
        ),
        (
            expected(body),
            http::Response::builder().status(200).body(SUCCESS).unwrap(),
        ),
    ]);
    let client = Client::from_conf_conn(
        config(RetryConfig::new().with_static_base(|| 1_f64)),
        conn.clone(),
    );
    let output = client
        .enable_reachability_analyzer_organization_sharing(&input)
        .await
        .expect("retried");
    assert_eq!(output.return_value(), Some(true));
    assert_eq!(conn.requests().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn async_dispatch_hands_back_the_context() {
    let conn = TestConnection::new(vec![(
        expected("Action=EnableReachabilityAnalyzerOrganizationSharing&Version=2016-11-15"),
        http::Response::builder().status(200).body(SUCCESS).unwrap(),
    )]);
    let client = Client::from_conf_conn(config(RetryConfig::disabled()), conn.clone());
    let (tx, rx) = tokio::sync::oneshot::channel();
    let context = Arc::new(CallerContext::new());
    client.send_async(
        &EnableReachabilityAnalyzerOrganizationSharingInput::default(),
        move |_client, _input, outcome, context| {
            let _ = tx.send((outcome.map(|output| output.return_value()), context));
        },
        Some(context.clone()),
    );
    let (outcome, returned_context) = rx.await.expect("handler was invoked");
    assert_eq!(outcome.expect("success"), Some(true));
    assert_eq!(returned_context.map(|ctx| *ctx.id()), Some(*context.id()));
}
