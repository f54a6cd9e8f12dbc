/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_auth::Credentials;
use aws_hyper::retry::RetryConfig;
use aws_hyper::test_connection::TestConnection;
use aws_types::region::Region;
use http::header::AUTHORIZATION;
use smithy_http::body::SdkBody;
use std::time::{Duration, UNIX_EPOCH};
use workspaces::input::{DescribeTagsInput, DescribeWorkspacesInput};
use workspaces::model::WorkspaceState;
use workspaces::{Client, Config};

fn client(conn: TestConnection<&'static str>) -> Client<TestConnection<&'static str>> {
    let conf = Config::builder()
        .region(Region::new("eu-west-1"))
        .credentials_provider(Credentials::from_keys("ANOTREAL", "notrealrnrELgWzOk3IfjzDKtFBhDby", None))
        .signing_time(UNIX_EPOCH + Duration::from_secs(1624036048))
        .retry_config(RetryConfig::disabled())
        .build();
    Client::from_conf_conn(conf, conn)
}

fn expected(target: &str, body: &'static str) -> http::Request<SdkBody> {
    http::Request::builder()
        .method("POST")
        .uri("https://workspaces.eu-west-1.amazonaws.com/")
        .header("content-type", "application/x-amz-json-1.1")
        .header("x-amz-target", target)
        .body(SdkBody::from(body))
        .unwrap()
}

#[tokio::test]
async fn describe_workspaces_without_filters() {
    let conn = TestConnection::new(vec![(
        expected("WorkspacesService.DescribeWorkspaces", "{}"),
        http::Response::builder()
            .status(200)
            .body(r#"{"Workspaces": [{"WorkspaceId": "ws-1", "State": "AVAILABLE", "UserName": "jdoe"}]}"#)
            .unwrap(),
    )]);
    let client = client(conn.clone());
    let output = client
        .describe_workspaces(&DescribeWorkspacesInput::default())
        .await
        .expect("no member is required");
    let workspaces = output.workspaces.expect("workspaces");
    assert_eq!(workspaces.len(), 1);
    assert_eq!(workspaces[0].state, Some(WorkspaceState::Available));
    conn.assert_requests_match(&[]);
    let requests = conn.requests();
    let authorization = requests[0].actual.headers()[AUTHORIZATION].to_str().unwrap();
    assert!(authorization.contains("/eu-west-1/workspaces/aws4_request"));
    assert!(authorization.contains("x-amz-target"));
}

#[tokio::test]
async fn modeled_errors() {
    let conn = TestConnection::new(vec![(
        expected(
            "WorkspacesService.DescribeTags",
            r#"{"ResourceId": "ws-404"}"#,
        ),
        http::Response::builder()
            .status(400)
            .body(r#"{"__type": "ResourceNotFoundException", "message": "The resource could not be found."}"#)
            .unwrap(),
    )]);
    let client = client(conn.clone());
    let input = DescribeTagsInput::builder().resource_id("ws-404").build();
    let err = client.describe_tags(&input).await.expect_err("not found");
    let service_error = err.service_error().expect("service error");
    assert!(service_error.is_resource_not_found_exception());
    assert_eq!(
        service_error.message(),
        Some("The resource could not be found.")
    );
    conn.assert_requests_match(&[]);
}

#[tokio::test(flavor = "multi_thread")]
async fn callable_dispatch() {
    let conn = TestConnection::new(vec![(
        expected("WorkspacesService.DescribeTags", r#"{"ResourceId": "ws-1"}"#),
        http::Response::builder()
            .status(200)
            .body(r#"{"TagList": [{"Key": "team", "Value": "sdk"}]}"#)
            .unwrap(),
    )]);
    let client = client(conn.clone());
    let input = DescribeTagsInput::builder().resource_id("ws-1").build();
    let output = client.callable(&input).await.expect("success");
    let tags = output.tag_list.expect("tags");
    assert_eq!(tags[0].key.as_deref(), Some("team"));
    assert_eq!(tags[0].value.as_deref(), Some("sdk"));
}
