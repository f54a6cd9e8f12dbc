/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Core HTTP primitives shared by every service client: request bodies, the operation envelope,
//! response parsing, endpoints and URI encoding.

pub mod body;
pub mod endpoint;
pub mod label;
pub mod middleware;
pub mod operation;
mod pin_util;
pub mod property_bag;
pub mod query;
pub mod response;
pub mod result;
pub mod retry;
mod urlencode;
