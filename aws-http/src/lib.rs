/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod json_errors;
pub mod request_id;
pub mod user_agent;

use smithy_http::result::{SdkError, SdkSuccess};
use smithy_http::retry::ClassifyResponse;
use smithy_types::retry::{ErrorKind, ProvideErrorKind, RetryKind};
use std::time::Duration;

/// A retry policy that models AWS error codes as outlined in the SEP
///
/// In order of priority:
/// 1. The `x-amz-retry-after` header is checked
/// 2. The modeled error retry mode is checked
/// 3. The code is checked against a predetermined list of throttling errors & transient error codes
/// 4. The status code is checked against a predetermined list of status codes
///
/// Requests that failed before they were sent are never retried. Requests that failed during
/// dispatch are treated as transient.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct AwsErrorRetryPolicy;

const TRANSIENT_ERROR_STATUS_CODES: &[u16] = &[500, 502, 503, 504];
const THROTTLING_ERRORS: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottledException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "TransactionInProgressException",
    "RequestLimitExceeded",
    "BandwidthLimitExceeded",
    "LimitExceededException",
    "RequestThrottled",
    "SlowDown",
    "PriorRequestNotComplete",
    "EC2ThrottledException",
];
const TRANSIENT_ERRORS: &[&str] = &["RequestTimeout", "RequestTimeoutException"];

/// Delay requested by the service through `x-amz-retry-after`, in milliseconds
fn retry_after<B>(response: &http::Response<B>) -> Option<Duration> {
    let millis = response
        .headers()
        .get("x-amz-retry-after")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()?;
    Some(Duration::from_millis(millis))
}

fn kind_from_code(code: &str) -> Option<ErrorKind> {
    if THROTTLING_ERRORS.contains(&code) {
        Some(ErrorKind::ThrottlingError)
    } else if TRANSIENT_ERRORS.contains(&code) {
        Some(ErrorKind::TransientError)
    } else {
        None
    }
}

impl AwsErrorRetryPolicy {
    /// Create an `AwsErrorRetryPolicy` with the default set of known error & status codes
    pub fn new() -> Self {
        AwsErrorRetryPolicy
    }

    fn classify_service_error<E, B>(&self, err: &E, response: &http::Response<B>) -> RetryKind
    where
        E: ProvideErrorKind,
    {
        if let Some(delay) = retry_after(response) {
            return RetryKind::Explicit(delay);
        }
        let kind = err
            .retryable_error_kind()
            .or_else(|| err.code().and_then(kind_from_code))
            .or_else(|| {
                TRANSIENT_ERROR_STATUS_CODES
                    .contains(&response.status().as_u16())
                    .then(|| ErrorKind::TransientError)
            });
        match kind {
            Some(kind) => RetryKind::Error(kind),
            None => RetryKind::NotRetryable,
        }
    }
}

impl Default for AwsErrorRetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> ClassifyResponse<SdkSuccess<T>, SdkError<E>> for AwsErrorRetryPolicy
where
    E: ProvideErrorKind,
{
    fn classify(&self, response: Result<&SdkSuccess<T>, &SdkError<E>>) -> RetryKind {
        match response {
            Ok(_) | Err(SdkError::ConstructionFailure(_)) => RetryKind::NotRetryable,
            Err(SdkError::ServiceError { err, raw }) => self.classify_service_error(err, raw),
            Err(SdkError::DispatchFailure(_)) | Err(SdkError::ResponseError { .. }) => {
                RetryKind::Error(ErrorKind::TransientError)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::AwsErrorRetryPolicy;
    use smithy_http::result::{ResponseBody, SdkError, SdkSuccess};
    use smithy_http::retry::ClassifyResponse;
    use smithy_types::retry::{ErrorKind, ProvideErrorKind, RetryKind};
    use std::time::Duration;

    fn classify<E: ProvideErrorKind>(err: SdkError<E>) -> RetryKind {
        let policy = AwsErrorRetryPolicy::new();
        ClassifyResponse::<SdkSuccess<()>, SdkError<E>>::classify(&policy, Err(&err))
    }

    fn service_error(status: u16, code: Option<&str>) -> SdkError<smithy_types::Error> {
        let mut err = smithy_types::Error::builder();
        if let Some(code) = code {
            err = err.code(code);
        }
        SdkError::ServiceError {
            err: err.build(),
            raw: http::Response::builder()
                .status(status)
                .body(ResponseBody::from("error!"))
                .unwrap(),
        }
    }

    #[test]
    fn successes_are_final() {
        let policy = AwsErrorRetryPolicy::new();
        let ok = SdkSuccess {
            raw: http::Response::new(ResponseBody::from("OK")),
            parsed: (),
        };
        assert_eq!(
            ClassifyResponse::<_, SdkError<smithy_types::Error>>::classify(&policy, Ok(&ok)),
            RetryKind::NotRetryable
        );
    }

    #[test]
    fn classify_by_response_status() {
        for status in &[500, 502, 503, 504] {
            assert_eq!(
                classify(service_error(*status, None)),
                RetryKind::Error(ErrorKind::TransientError),
                "{}",
                status
            );
        }
        assert_eq!(classify(service_error(400, None)), RetryKind::NotRetryable);
        assert_eq!(classify(service_error(501, None)), RetryKind::NotRetryable);
    }

    #[test]
    fn classify_by_error_code() {
        for (code, expected) in &[
            ("Throttling", ErrorKind::ThrottlingError),
            ("SlowDown", ErrorKind::ThrottlingError),
            ("RequestLimitExceeded", ErrorKind::ThrottlingError),
            ("RequestTimeout", ErrorKind::TransientError),
        ] {
            assert_eq!(
                classify(service_error(400, Some(code))),
                RetryKind::Error(*expected),
                "{}",
                code
            );
        }
        assert_eq!(
            classify(service_error(400, Some("ValidationException"))),
            RetryKind::NotRetryable
        );
    }

    #[test]
    fn modeled_kind_wins_over_code() {
        struct ModeledRetries;
        impl ProvideErrorKind for ModeledRetries {
            fn retryable_error_kind(&self) -> Option<ErrorKind> {
                Some(ErrorKind::ClientError)
            }

            fn code(&self) -> Option<&str> {
                Some("Throttling")
            }
        }
        let err = SdkError::ServiceError {
            err: ModeledRetries,
            raw: http::Response::new(ResponseBody::from("OK")),
        };
        assert_eq!(classify(err), RetryKind::Error(ErrorKind::ClientError));
    }

    #[test]
    fn retry_after_header_wins() {
        let err = SdkError::ServiceError {
            err: smithy_types::Error::builder().code("Throttling").build(),
            raw: http::Response::builder()
                .status(503)
                .header("x-amz-retry-after", "5000")
                .body(ResponseBody::from("retry later"))
                .unwrap(),
        };
        assert_eq!(
            classify(err),
            RetryKind::Explicit(Duration::from_millis(5000))
        );
    }

    #[test]
    fn construction_failures_are_not_retried() {
        assert_eq!(
            classify::<smithy_types::Error>(SdkError::ConstructionFailure("missing field".into())),
            RetryKind::NotRetryable
        );
    }

    #[test]
    fn dispatch_failures_are_transient() {
        assert_eq!(
            classify::<smithy_types::Error>(SdkError::DispatchFailure("connection reset".into())),
            RetryKind::Error(ErrorKind::TransientError)
        );
    }
}
