/*!
 * Mock translator for tests and dry runs.
 *
 * The mock simulates different provider behaviours:
 * - `MockTranslator::identity()` - returns the input unchanged
 * - `MockTranslator::uppercase()` - returns the input upper-cased
 * - `MockTranslator::fail_on_call(n)` - fails on the n-th call (1-based)
 * - `MockTranslator::fail_when_contains(s)` - fails for any text containing `s`
 * - `MockTranslator::failing()` - always fails
 * - `MockTranslator::slow(ms)` - identity after a delay
 *
 * Every call is recorded, and the number of simultaneous calls is tracked so
 * tests can check concurrency limits.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Echo the text back
    Identity,
    /// Upper-case the text
    Uppercase,
    /// Fail on the given call number (1-based), succeed otherwise
    FailOnCall { call: usize },
    /// Fail whenever the text contains the marker
    FailWhenContains(String),
    /// Always fail
    Failing,
    /// Echo the text back after a delay
    Slow { delay_ms: u64 },
}

/// A recorded call
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub text: String,
    pub target_language: String,
}

/// Mock translator for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockTranslator {
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<MockCall>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when the call ends, even if it is dropped
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    pub fn uppercase() -> Self {
        Self::new(MockBehavior::Uppercase)
    }

    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    pub fn fail_when_contains(marker: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailWhenContains(marker.into()))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// All calls made so far, in call order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Highest number of calls that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let call = {
            let mut calls = self.calls.lock();
            calls.push(MockCall {
                text: text.to_string(),
                target_language: target_language.to_string(),
            });
            calls.len()
        };

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Identity => Ok(text.to_string()),
            MockBehavior::Uppercase => Ok(text.to_uppercase()),
            MockBehavior::FailOnCall { call: failing_call } => {
                if call == *failing_call {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated failure (request #{})", call),
                    })
                } else {
                    Ok(text.to_string())
                }
            }
            MockBehavior::FailWhenContains(marker) => {
                if text.contains(marker.as_str()) {
                    Err(ProviderError::ApiError {
                        status_code: 422,
                        message: format!("Simulated failure on '{}'", marker),
                    })
                } else {
                    Ok(text.to_string())
                }
            }
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(text.to_string())
            }
        }
    }
}
