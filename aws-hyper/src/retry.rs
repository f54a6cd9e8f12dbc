/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Retry support for aws-hyper
//!
//! Retries are owned by the transport layer: a failed attempt is classified by the operation's
//! [`ClassifyResponse`] policy and, when retryable, re-sent after an exponential backoff. All
//! requests sent through a [`Client`](crate::Client) draw from one shared [`RetryQuota`].

use smithy_http::operation::Operation;
use smithy_http::result::{SdkError, SdkSuccess};
use smithy_http::retry::ClassifyResponse;
use smithy_types::retry::{ErrorKind, RetryKind};
use std::convert::TryFrom;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::Instrument;

const MAX_ATTEMPTS: u32 = 3;
const MAX_BACKOFF: Duration = Duration::from_secs(20);
const INITIAL_RETRY_TOKENS: usize = 500;
const RETRY_COST: usize = 5;
const TIMEOUT_RETRY_COST: usize = 10;
const SUCCESS_REFUND: usize = 1;

/// Retry configuration
///
/// The defaults follow the standard retry mode: 3 attempts, a 500 token quota, and an exponential
/// backoff with a random base capped at 20 seconds.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    max_attempts: u32,
    max_backoff: Duration,
    quota: QuotaCosts,
    base: fn() -> f64,
}

#[derive(Clone, Copy, Debug)]
struct QuotaCosts {
    initial: usize,
    retry: usize,
    timeout: usize,
    success: usize,
}

impl RetryConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Send every request exactly once
    pub fn disabled() -> Self {
        Self::default().with_max_attempts(1)
    }

    /// Total number of attempts, including the first one
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    /// Replace the random backoff base, eg. `|| 1_f64` for deterministic delays in tests
    pub fn with_static_base(mut self, base: fn() -> f64) -> Self {
        self.base = base;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before retry number `retry` (zero based), clamped to `[0, max_backoff]`
    fn backoff(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let delay = (self.base)() * 2_f64.powi(exponent);
        if delay.is_nan() || delay <= 0.0 {
            Duration::from_secs(0)
        } else if delay >= self.max_backoff.as_secs_f64() {
            self.max_backoff
        } else {
            Duration::from_secs_f64(delay)
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: MAX_ATTEMPTS,
            max_backoff: MAX_BACKOFF,
            quota: QuotaCosts {
                initial: INITIAL_RETRY_TOKENS,
                retry: RETRY_COST,
                timeout: TIMEOUT_RETRY_COST,
                success: SUCCESS_REFUND,
            },
            base: fastrand::f64,
        }
    }
}

/// Tokens shared by every request of one client
///
/// A retry withdraws tokens, a success refunds the last withdrawal (or a small reward when no retry
/// was needed). The balance never exceeds the initial quota.
#[derive(Debug)]
pub(crate) struct RetryQuota {
    available: usize,
    last_withdrawal: Option<usize>,
    costs: QuotaCosts,
}

impl RetryQuota {
    fn new(costs: QuotaCosts) -> Self {
        RetryQuota {
            available: costs.initial,
            last_withdrawal: None,
            costs,
        }
    }

    fn withdraw(&mut self, kind: ErrorKind) -> bool {
        let cost = match kind {
            ErrorKind::TransientError => self.costs.timeout,
            _ => self.costs.retry,
        };
        match self.available.checked_sub(cost) {
            Some(remaining) => {
                self.available = remaining;
                self.last_withdrawal = Some(cost);
                true
            }
            None => false,
        }
    }

    fn refund(&mut self) {
        let refund = self.last_withdrawal.take().unwrap_or(self.costs.success);
        self.available = (self.available + refund).min(self.costs.initial);
    }

    pub(crate) fn available(&self) -> usize {
        self.available
    }
}

pub(crate) struct RetryState {
    quota: RetryQuota,
    config: RetryConfig,
}

impl RetryState {
    fn new(config: RetryConfig) -> Self {
        RetryState {
            quota: RetryQuota::new(config.quota),
            config,
        }
    }
}

/// Creates a [`StandardRetryStrategy`] for each request, all sharing one [`RetryState`]
#[derive(Clone)]
pub(crate) struct RetryHandlerFactory {
    state: Arc<Mutex<RetryState>>,
}

impl RetryHandlerFactory {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(RetryState::new(config))),
        }
    }

    /// Replace the configuration; the quota starts over
    pub fn with_config(&mut self, config: RetryConfig) {
        *self = Self::new(config);
    }

    pub fn new_handler(&self) -> StandardRetryStrategy {
        StandardRetryStrategy {
            retries: 0,
            state: self.state.clone(),
        }
    }
}

/// Retry state of a single request
///
/// `retries` counts the retries already made for this request, the quota is shared.
#[derive(Clone)]
pub(crate) struct StandardRetryStrategy {
    retries: u32,
    state: Arc<Mutex<RetryState>>,
}

impl StandardRetryStrategy {
    fn state(&self) -> MutexGuard<'_, RetryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn attempts_exhausted(&self, state: &RetryState) -> bool {
        self.retries + 1 >= state.config.max_attempts
    }

    fn next(&self) -> Self {
        StandardRetryStrategy {
            retries: self.retries + 1,
            state: self.state.clone(),
        }
    }

    fn on_success(&self) {
        self.state().quota.refund();
    }

    fn on_error(&self, kind: ErrorKind) -> Option<(Self, Duration)> {
        let mut state = self.state();
        if self.attempts_exhausted(&state) {
            if state.config.max_attempts > 1 {
                tracing::warn!(
                    attempts = self.retries + 1,
                    "not retrying: maximum attempts reached"
                );
            }
            return None;
        }
        if !state.quota.withdraw(kind) {
            tracing::warn!(
                quota = state.quota.available(),
                "not retrying: retry quota exhausted"
            );
            return None;
        }
        Some((self.next(), state.config.backoff(self.retries)))
    }

    /// Retry after a server-provided delay; does not touch the quota
    fn on_explicit_retry(&self, delay: Duration) -> Option<(Self, Duration)> {
        if self.attempts_exhausted(&self.state()) {
            return None;
        }
        Some((self.next(), delay))
    }
}

impl<Handler, R, T, E> tower::retry::Policy<Operation<Handler, R>, SdkSuccess<T>, SdkError<E>>
    for StandardRetryStrategy
where
    Handler: Clone,
    R: ClassifyResponse<SdkSuccess<T>, SdkError<E>>,
{
    type Future = Pin<Box<dyn Future<Output = Self> + Send>>;

    fn retry(
        &self,
        req: &Operation<Handler, R>,
        result: Result<&SdkSuccess<T>, &SdkError<E>>,
    ) -> Option<Self::Future> {
        let (next, delay) = match req.retry_policy().classify(result) {
            RetryKind::Explicit(delay) => self.on_explicit_retry(delay)?,
            RetryKind::Error(kind) => self.on_error(kind)?,
            RetryKind::NotRetryable => {
                if result.is_ok() {
                    self.on_success();
                }
                return None;
            }
        };
        let span = tracing::debug_span!("retry", attempt = next.retries + 1, delay = ?delay);
        Some(Box::pin(
            async move {
                tokio::time::sleep(delay).await;
                next
            }
            .instrument(span),
        ))
    }

    fn clone_request(&self, req: &Operation<Handler, R>) -> Option<Operation<Handler, R>> {
        req.try_clone()
    }
}

#[cfg(test)]
mod test {
    use crate::retry::{RetryConfig, RetryHandlerFactory, StandardRetryStrategy};
    use smithy_types::retry::ErrorKind;
    use std::time::Duration;

    fn strategy(config: RetryConfig) -> StandardRetryStrategy {
        RetryHandlerFactory::new(config.with_static_base(|| 1_f64)).new_handler()
    }

    /// Retry on `ServerError` until refused, recording `(delay secs, quota)` after each retry
    fn retry_until_refused(
        mut strategy: StandardRetryStrategy,
    ) -> (StandardRetryStrategy, Vec<(u64, usize)>) {
        let mut steps = vec![];
        while let Some((next, delay)) = strategy.on_error(ErrorKind::ServerError) {
            steps.push((delay.as_secs(), next.state().quota.available()));
            strategy = next;
        }
        (strategy, steps)
    }

    #[test]
    fn eventual_success_refunds_the_last_retry() {
        let strategy = strategy(RetryConfig::default());
        let (strategy, _) = strategy.on_error(ErrorKind::ServerError).expect("retry");
        let (strategy, _) = strategy.on_error(ErrorKind::ServerError).expect("retry");
        assert_eq!(strategy.state().quota.available(), 490);
        strategy.on_success();
        assert_eq!(strategy.state().quota.available(), 495);
    }

    #[test]
    fn success_without_retries_never_exceeds_the_initial_quota() {
        let strategy = strategy(RetryConfig::default());
        strategy.on_success();
        assert_eq!(strategy.state().quota.available(), 500);
    }

    #[test]
    fn attempts_are_bounded() {
        let (_, steps) = retry_until_refused(strategy(RetryConfig::default()));
        assert_eq!(steps, vec![(1, 495), (2, 490)]);
    }

    #[test]
    fn backoff_doubles_until_the_cap() {
        let (_, steps) = retry_until_refused(strategy(RetryConfig::default().with_max_attempts(5)));
        assert_eq!(steps, vec![(1, 495), (2, 490), (4, 485), (8, 480)]);

        let (_, steps) = retry_until_refused(strategy(
            RetryConfig::default()
                .with_max_attempts(5)
                .with_max_backoff(Duration::from_secs(3)),
        ));
        assert_eq!(steps, vec![(1, 495), (2, 490), (3, 485), (3, 480)]);
    }

    #[test]
    fn empty_quota_stops_retries() {
        let mut config = RetryConfig::default().with_max_attempts(10);
        config.quota.initial = 5;
        let (strategy, steps) = retry_until_refused(strategy(config));
        assert_eq!(steps, vec![(1, 0)]);
        assert_eq!(strategy.retries, 1);
    }

    #[test]
    fn transient_errors_cost_more() {
        let strategy = strategy(RetryConfig::default());
        let (strategy, _) = strategy.on_error(ErrorKind::TransientError).expect("retry");
        assert_eq!(strategy.state().quota.available(), 490);
    }

    #[test]
    fn explicit_retries_count_as_attempts() {
        let strategy = strategy(RetryConfig::default());
        let (strategy, delay) = strategy
            .on_explicit_retry(Duration::from_millis(1500))
            .expect("retry");
        assert_eq!(delay, Duration::from_millis(1500));
        let (strategy, _) = strategy.on_error(ErrorKind::ServerError).expect("retry");
        assert!(strategy.on_explicit_retry(Duration::from_secs(1)).is_none());
        assert_eq!(strategy.state().quota.available(), 495);
    }

    #[test]
    fn disabled_retries() {
        let strategy = strategy(RetryConfig::disabled());
        assert!(strategy.on_error(ErrorKind::ServerError).is_none());
        assert!(strategy
            .on_explicit_retry(Duration::from_secs(1))
            .is_none());
        assert_eq!(strategy.state().quota.available(), 500);
    }

    #[test]
    fn long_retry_chains_stay_capped() {
        let config = RetryConfig::new()
            .with_max_attempts(80)
            .with_static_base(|| 0.9);
        let mut strategy = RetryHandlerFactory::new(config).new_handler();
        let mut delays = vec![];
        while let Some((next, delay)) = strategy.on_error(ErrorKind::ServerError) {
            delays.push(delay);
            strategy = next;
        }
        assert_eq!(delays.len(), 79);
        assert_eq!(delays[0], Duration::from_secs_f64(0.9));
        assert_eq!(delays[78], Duration::from_secs(20));
    }

    #[test]
    fn degenerate_bases_do_not_panic() {
        let negative = RetryConfig::new().with_static_base(|| -1_f64);
        assert_eq!(negative.backoff(3), Duration::from_secs(0));
        let nan = RetryConfig::new().with_static_base(|| f64::NAN);
        assert_eq!(nan.backoff(0), Duration::from_secs(0));
        let infinite = RetryConfig::new().with_static_base(|| f64::INFINITY);
        assert_eq!(infinite.backoff(0), Duration::from_secs(20));
        let unit = RetryConfig::new().with_static_base(|| 1_f64);
        assert_eq!(unit.backoff(u32::MAX), Duration::from_secs(20));
    }
}
