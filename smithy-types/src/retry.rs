/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Retry classification shared by error types and retry policies

use std::time::Duration;

/// Why a failed attempt may be retried
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ErrorKind {
    /// The request may never have reached the service: timeouts, connection resets, or a
    /// 500/502/503/504 without a recognized code
    ///
    /// Costs more retry quota than the other kinds.
    TransientError,

    /// The service asked the client to slow down, eg. `ThrottlingException`
    ThrottlingError,

    /// A modeled server fault that is safe to retry, eg. `InternalServerException`
    ServerError,

    /// A client fault the service marks as retryable
    ClientError,
}

/// Implemented by service errors so retry policies can classify them
pub trait ProvideErrorKind {
    /// The modeled retry kind, or `None` when the decision depends on the code or HTTP status
    fn retryable_error_kind(&self) -> Option<ErrorKind>;

    /// The service error code, eg. `ResourceNotFoundException`
    fn code(&self) -> Option<&str>;
}

/// Verdict of a retry policy on one attempt
#[derive(Eq, PartialEq, Debug)]
pub enum RetryKind {
    Error(ErrorKind),

    /// The service named the delay, through `x-amz-retry-after`
    ///
    /// Explicit retries count toward the attempt limit but not against the retry quota.
    Explicit(Duration),

    NotRetryable,
}
