/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Client for Amazon EC2 (ec2Query)

mod client;
pub mod error;
pub mod input;
pub mod model;
pub mod operation;
pub mod output;

pub use aws_hyper::{CallerContext, Config, SdkError};
pub use client::Client;
pub use error::{Error, ErrorKind};

use aws_hyper::ServiceMetadata;

pub const METADATA: ServiceMetadata = ServiceMetadata {
    service_name: "ec2",
    signing_name: "ec2",
    endpoint_prefix: "ec2",
    api_version: "2016-11-15",
};
