/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Generic error parsing for the restJson1 and awsJson1_x protocols

use crate::request_id::extract_request_id;
use http::HeaderMap;
use serde_json::{Map, Value};

/// Strip the namespace prefix and trailing URL from an error code
///
/// `aws.protocoltests.restjson#FooError:http://internal.amazon.com/coral/...` becomes `FooError`.
pub fn sanitize_error_code(error_code: &str) -> &str {
    // Trim a trailing URL from the error code, beginning with a `:`
    let error_code = match error_code.find(':') {
        Some(idx) => &error_code[..idx],
        None => error_code,
    };

    // Trim a prefixing namespace from the error code, beginning with a `#`
    match error_code.find('#') {
        Some(idx) => &error_code[idx + 1..],
        None => error_code,
    }
}

fn string_member<'a>(body: &'a Map<String, Value>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| body.get(*name).and_then(Value::as_str))
}

/// Parse the generic error fields out of a JSON error response
///
/// The error code is read from the `x-amzn-errortype` header, then the `code` and `__type` body
/// members. Bodies that are not JSON objects still yield a request id from the headers.
pub fn parse_generic_error(body: &[u8], headers: &HeaderMap) -> smithy_types::Error {
    let body = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let code = headers
        .get("x-amzn-errortype")
        .and_then(|header| header.to_str().ok())
        .or_else(|| string_member(&body, &["code", "__type"]))
        .map(sanitize_error_code);
    let message = string_member(&body, &["message", "Message", "errorMessage"]);

    let mut builder = smithy_types::Error::builder();
    if let Some(code) = code {
        builder = builder.code(code);
    }
    if let Some(message) = message {
        builder = builder.message(message);
    }
    builder.set_request_id(extract_request_id(headers).map(str::to_string));
    builder.build()
}
