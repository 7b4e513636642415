use crate::domain::payment::{PaymentIntent, Receipt};
use crate::domain::ports::PaymentStrategy;
use crate::domain::region::{Currency, PaymentRail};
use crate::error::StrategyError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A stand-in processor that settles over a single rail.
///
/// It waits for `latency` to mimic a network round-trip, then either declines
/// (when the amount exceeds the configured limit) or confirms. Receipt ids are
/// derived from the intent's reference, so replaying the same intent yields
/// the same receipt.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    rail: PaymentRail,
    latency: Duration,
    decline_above: Option<Decimal>,
}

impl SimulatedProcessor {
    pub fn new(rail: PaymentRail) -> Self {
        Self {
            rail,
            latency: Duration::ZERO,
            decline_above: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Declines every payment strictly larger than `limit`.
    pub fn with_decline_above(mut self, limit: Decimal) -> Self {
        self.decline_above = Some(limit);
        self
    }
}

#[async_trait]
impl PaymentStrategy for SimulatedProcessor {
    async fn execute(
        &self,
        intent: &PaymentIntent,
        currency: Currency,
        cancel: CancellationToken,
    ) -> Result<Receipt, StrategyError> {
        tokio::select! {
            _ = cancel.cancelled() => return Err(StrategyError::Cancelled),
            _ = tokio::time::sleep(self.latency) => {}
        }

        if let Some(limit) = self.decline_above
            && intent.amount.value() > limit
        {
            return Err(StrategyError::Declined(format!(
                "amount {} {} exceeds limit {}",
                intent.amount.value(),
                currency,
                limit
            )));
        }

        Ok(
            Receipt::new(format!("{}-{}", currency.code().to_lowercase(), intent.reference))
                .with_processor_reference(self.rail.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Amount;
    use crate::domain::region::Region;
    use rust_decimal_macros::dec;

    fn intent(amount: Decimal) -> PaymentIntent {
        PaymentIntent::new(Region::Poland, Amount::new(amount).unwrap(), "order-42").unwrap()
    }

    #[tokio::test]
    async fn test_confirms_with_deterministic_receipt() {
        let processor = SimulatedProcessor::new(PaymentRail::Blik);
        let first = processor
            .execute(&intent(dec!(10)), Currency::PolishZloty, CancellationToken::new())
            .await
            .unwrap();
        let second = processor
            .execute(&intent(dec!(10)), Currency::PolishZloty, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(first.id, "pln-order-42");
        assert_eq!(first.processor_reference.as_deref(), Some("blik"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_declines_above_limit() {
        let processor =
            SimulatedProcessor::new(PaymentRail::CardNetwork).with_decline_above(dec!(100));
        let result = processor
            .execute(&intent(dec!(100.01)), Currency::PolishZloty, CancellationToken::new())
            .await;
        assert!(matches!(result, Err(StrategyError::Declined(_))));
    }

    #[tokio::test]
    async fn test_stops_when_cancelled() {
        let processor = SimulatedProcessor::new(PaymentRail::CardNetwork)
            .with_latency(Duration::from_secs(60));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = processor
            .execute(&intent(dec!(1)), Currency::PolishZloty, cancel)
            .await;
        assert_eq!(result, Err(StrategyError::Cancelled));
    }
}
