/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Response handlers, one per operation

use crate::error::Error;
use crate::output;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use smithy_http::response::ParseStrictResponse;

fn parse_json<T: DeserializeOwned>(response: &http::Response<Bytes>) -> Result<T, Error> {
    if !response.status().is_success() {
        return Err(Error::from_response(response));
    }
    let body: &[u8] = match response.body().as_ref() {
        b"" => &b"{}"[..],
        body => body,
    };
    serde_json::from_slice(body).map_err(Error::unhandled)
}

macro_rules! json_handler {
    ($($handler:ident => $output:ident),+ $(,)?) => {
        $(
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $handler;

            impl ParseStrictResponse for $handler {
                type Output = Result<output::$output, Error>;

                fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
                    parse_json(response)
                }
            }
        )+
    };
}

json_handler! {
    CreateExperiment => CreateExperimentOutput,
    GetExperiment => GetExperimentOutput,
    DeleteExperiment => DeleteExperimentOutput,
    ListExperiments => ListExperimentsOutput,
    StartExperiment => StartExperimentOutput,
    StopExperiment => StopExperimentOutput,
    EvaluateFeature => EvaluateFeatureOutput,
}
