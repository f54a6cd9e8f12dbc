/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Client for Amazon CloudWatch Evidently
//!
//! ```no_run
//! # async fn docs() -> Result<(), evidently::SdkError<evidently::Error>> {
//! use evidently::input::EvaluateFeatureInput;
//!
//! let client = evidently::Client::from_env();
//! let evaluation = client
//!     .evaluate_feature(
//!         &EvaluateFeatureInput::builder()
//!             .project("proj")
//!             .feature("feat")
//!             .entity_id("user-1")
//!             .build(),
//!     )
//!     .await?;
//! println!("assigned variation: {:?}", evaluation.variation);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod error;
pub mod input;
pub mod model;
pub mod operation;
pub mod output;
mod serde_util;

pub use aws_hyper::{CallerContext, Config, SdkError};
pub use client::Client;
pub use error::{Error, ErrorKind};

use aws_hyper::ServiceMetadata;

pub const METADATA: ServiceMetadata = ServiceMetadata {
    service_name: "evidently",
    signing_name: "evidently",
    endpoint_prefix: "evidently",
    api_version: "2021-02-01",
};
