/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS Signature Authentication Package
//!
//! The SigV4 algorithm itself lives in `aws-sigv4`; this crate adapts it to the request pipeline.

pub mod middleware;
pub mod signer;
