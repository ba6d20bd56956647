//! Recording Submission Gateway for testing.
//!
//! Captures every delivered submission so tests can assert on what
//! reviewers would have received.
//!
//! # Features
//!
//! - Call tracking for verification
//! - Scripted failures, consumed in order
//! - Simulated delivery latency
//!
//! # Example
//!
//! ```ignore
//! let gateway = RecordingGateway::new()
//!     .with_failure(GatewayError::Delivery("timeout".into()));
//!
//! assert!(gateway.submit(channel, &submission).await.is_err());
//! assert_eq!(gateway.delivered_count().await, 0);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::domain::summary::Submission;
use crate::ports::{GatewayError, ReviewChannelId, SubmissionGateway};

/// A submission the gateway accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub channel: ReviewChannelId,
    pub submission: Submission,
}

/// Gateway that stores deliveries in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
    failures: Arc<Mutex<VecDeque<GatewayError>>>,
    attempts: Arc<Mutex<usize>>,
    delay: Duration,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error for the next delivery attempt.
    pub fn with_failure(self, error: GatewayError) -> Self {
        if let Ok(mut failures) = self.failures.try_lock() {
            failures.push_back(error);
        }
        self
    }

    /// Sets simulated latency per delivery.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Successful deliveries so far.
    pub async fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().await.clone()
    }

    pub async fn delivered_count(&self) -> usize {
        self.deliveries.lock().await.len()
    }

    /// Every call to `submit`, failed or not.
    pub async fn attempt_count(&self) -> usize {
        *self.attempts.lock().await
    }
}

#[async_trait]
impl SubmissionGateway for RecordingGateway {
    async fn submit(
        &self,
        channel: ReviewChannelId,
        submission: &Submission,
    ) -> Result<(), GatewayError> {
        *self.attempts.lock().await += 1;

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Some(error) = self.failures.lock().await.pop_front() {
            return Err(error);
        }

        self.deliveries.lock().await.push(Delivery {
            channel,
            submission: submission.clone(),
        });
        Ok(())
    }
}
