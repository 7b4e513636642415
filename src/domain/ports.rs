use super::event::FailureEvent;
use super::payment::{PaymentIntent, Receipt};
use super::region::Currency;
use crate::error::StrategyError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Executes a payment against a region-specific processor.
///
/// Implementations own the network boundary: retries, idempotency and backoff
/// live here, never in the dispatcher. `cancel` fires when the caller gives up;
/// an implementation should stop its attempt and return
/// [`StrategyError::Cancelled`].
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    async fn execute(
        &self,
        intent: &PaymentIntent,
        currency: Currency,
        cancel: CancellationToken,
    ) -> Result<Receipt, StrategyError>;
}

/// Receives structured failure events from the dispatcher.
pub trait EventReporter: Send + Sync {
    fn report(&self, event: &FailureEvent);
}

pub type StrategyRef = Arc<dyn PaymentStrategy>;
pub type EventReporterBox = Box<dyn EventReporter>;
